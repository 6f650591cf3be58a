//! Parent linking: every group points to the group its winners advance to.

use crate::models::{GroupKey, GroupPlan, TreeGenerationError};

/// 1-based position of the parent of the `match_number`-th (1-based) group of a round.
pub fn parent_index(match_number: usize) -> usize {
    (match_number + 1) / 2
}

/// Link each group of rounds `1..round_count` to a group of the next round.
///
/// Within a round, groups are numbered by ascending (area, order); the `m`-th group gets the
/// `parent_index(m)`-th group of the next round. Groups of the last round get no parent.
pub fn link_parents(
    groups: &mut [GroupPlan],
    round_count: u32,
) -> Result<(), TreeGenerationError> {
    for round in 1..round_count {
        let mut parents: Vec<GroupKey> = groups
            .iter()
            .filter(|g| g.round == round + 1)
            .map(GroupPlan::key)
            .collect();
        parents.sort_by_key(|k| (k.area, k.order));

        let mut children: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.round == round)
            .map(|(i, _)| i)
            .collect();
        children.sort_by_key(|&i| (groups[i].area, groups[i].order));

        for (m, idx) in children.into_iter().enumerate() {
            let parent = parents.get(parent_index(m + 1) - 1).copied().ok_or_else(|| {
                TreeGenerationError::InvalidConfiguration(format!(
                    "round {} has no group for match {} of round {}",
                    round + 1,
                    m + 1,
                    round
                ))
            })?;
            groups[idx].parent = Some(parent);
        }
    }

    for g in groups.iter_mut().filter(|g| g.round >= round_count) {
        g.parent = None;
    }
    Ok(())
}

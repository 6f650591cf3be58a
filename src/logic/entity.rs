//! Entity grouping: cluster fighters by federation, association or club.

use crate::models::{Fighter, GroupingKey};

/// Group fighters by affiliation.
///
/// With a key, fighters sharing the same value end up in the same group (fighters with no
/// value for that level share one group). Groups keep first-seen order, and so do fighters
/// inside a group. Without a key every fighter is its own group.
pub fn group_by_entity(fighters: &[Fighter], key: Option<GroupingKey>) -> Vec<Vec<Fighter>> {
    let Some(key) = key else {
        return fighters.iter().map(|f| vec![f.clone()]).collect();
    };

    let mut values: Vec<Option<u32>> = Vec::new();
    let mut groups: Vec<Vec<Fighter>> = Vec::new();
    for fighter in fighters {
        let value = fighter.affiliation.get(key);
        match values.iter().position(|v| *v == value) {
            Some(idx) => groups[idx].push(fighter.clone()),
            None => {
                values.push(value);
                groups.push(vec![fighter.clone()]);
            }
        }
    }
    groups
}

/// Size of the biggest entity group (0 when there are none).
pub fn max_entity_size(groups: &[Vec<Fighter>]) -> usize {
    groups.iter().map(Vec::len).max().unwrap_or(0)
}

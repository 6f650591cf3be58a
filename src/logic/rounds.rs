//! Round generation: first-round groups per format and empty elimination groups above them.

use crate::models::{ChampionshipSettings, GroupPlan, Slot, TournamentFormat};
use rand::seq::SliceRandom;
use rand::Rng;

/// Slots in an elimination group (round 2 and later, and every direct elimination match).
pub const ELIMINATION_GROUP_SIZE: usize = 2;

/// Cut each area into first-round groups.
///
/// - Preliminary: pools of `preliminary_group_size`.
/// - Direct elimination: matches of 2.
/// - Round robin: the whole area in one group.
///
/// With `shuffle`, the order of the groups inside an area and the order of the fighters
/// inside each group are randomized. Fighters never move from one group to another, so the
/// entity separation done by the distributor is kept.
pub fn first_round_groups<R: Rng + ?Sized>(
    areas: Vec<Vec<Slot>>,
    settings: &ChampionshipSettings,
    shuffle: bool,
    rng: &mut R,
) -> Vec<GroupPlan> {
    let mut groups = Vec::new();
    for (area_idx, slots) in areas.into_iter().enumerate() {
        if slots.is_empty() {
            continue;
        }
        let mut chunks: Vec<Vec<Slot>> = match settings.format {
            TournamentFormat::Preliminary => slots
                .chunks(settings.preliminary_group_size.max(1) as usize)
                .map(<[Slot]>::to_vec)
                .collect(),
            TournamentFormat::DirectElimination => slots
                .chunks(ELIMINATION_GROUP_SIZE)
                .map(<[Slot]>::to_vec)
                .collect(),
            TournamentFormat::RoundRobin => vec![slots],
        };
        if shuffle {
            chunks.shuffle(rng);
            for chunk in &mut chunks {
                chunk.shuffle(rng);
            }
        }

        let area = area_idx as u32 + 1;
        groups.extend(
            chunks
                .into_iter()
                .enumerate()
                .map(|(i, chunk)| GroupPlan::new(area, i as u32 + 1, 1, chunk)),
        );
    }
    groups
}

/// Fighters entering the elimination tree. A preliminary pool sends two survivors up.
pub fn eliminatory_count(tree_size: usize, settings: &ChampionshipSettings) -> usize {
    if settings.has_preliminary() {
        tree_size / settings.preliminary_group_size.max(1) as usize * 2
    } else {
        tree_size
    }
}

/// Number of rounds of an elimination tree fed by `eliminatory` fighters: `floor(log2(n))`.
pub fn round_count(eliminatory: usize) -> u32 {
    if eliminatory < 2 {
        1
    } else {
        eliminatory.ilog2()
    }
}

/// Empty 2-slot groups for rounds 2..=`rounds`, all in area 1.
/// Round `r` has `eliminatory / 2^r` groups; winners are filled in once matches are played.
pub fn elimination_rounds(eliminatory: usize, rounds: u32) -> Vec<GroupPlan> {
    let mut groups = Vec::new();
    for round in 2..=rounds {
        let count = eliminatory >> round;
        for order in 1..=count {
            groups.push(GroupPlan::new(
                1,
                order as u32,
                round,
                vec![Slot::Bye; ELIMINATION_GROUP_SIZE],
            ));
        }
    }
    groups
}

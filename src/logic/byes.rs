//! Tree capacity and bye count.

use crate::models::{ChampionshipSettings, Slot, TournamentFormat};

/// Multipliers of the group size a first round may have.
const TREE_MULTIPLIERS: [usize; 7] = [1, 2, 4, 8, 16, 32, 64];

/// Size of the groups the first round is cut into, or `None` for round robin (no tree).
pub fn group_size_for(settings: &ChampionshipSettings) -> Option<usize> {
    match settings.format {
        TournamentFormat::Preliminary => Some(settings.preliminary_group_size as usize),
        TournamentFormat::DirectElimination => Some(2),
        TournamentFormat::RoundRobin => None,
    }
}

/// Number of first-round slots: the least of `group_size * {1, 2, 4, .., 64}` holding every
/// fighter, capped at `64 * group_size`.
pub fn tree_size(fighter_count: usize, group_size: usize) -> usize {
    TREE_MULTIPLIERS
        .iter()
        .map(|m| m * group_size)
        .find(|&limit| fighter_count <= limit)
        .unwrap_or(64 * group_size)
}

/// Byes needed to fill the tree. Zero when the roster exceeds the cap.
pub fn bye_count(fighter_count: usize, group_size: usize) -> usize {
    tree_size(fighter_count, group_size).saturating_sub(fighter_count)
}

/// The bye placeholders themselves.
pub fn bye_slots(fighter_count: usize, group_size: usize) -> Vec<Slot> {
    vec![Slot::Bye; bye_count(fighter_count, group_size)]
}

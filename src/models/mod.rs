//! Data structures for championship trees: fighters, settings, groups.

mod championship;
mod fighter;
mod group;

pub use championship::{
    ChampionshipId, ChampionshipSettings, TournamentFormat, TreeGenerationError,
    DEFAULT_PRELIMINARY_GROUP_SIZE, MAX_FIGHTING_AREAS, MAX_PRELIMINARY_GROUP_SIZE,
    MIN_COMPETITORS_BY_AREA,
};
pub use fighter::{Affiliation, Fighter, FighterId, FighterKind, GroupingKey, Slot};
pub use group::{FightersGroup, GroupId, GroupKey, GroupPlan, Tree, TreePlan};

//! Championship tree generator: library with models, bracket logic, and store interfaces.

pub mod logic;
pub mod models;
pub mod roster;
pub mod store;

pub use logic::{
    bye_count, bye_slots, check_min_competitors, distribute, elimination_rounds,
    eliminatory_count, first_round_groups, group_by_entity, group_size_for, insert_byes,
    link_parents, max_entity_size, parent_index, plan_tree, repart, round_count, split_by_area,
    tree_size, TreeGenerator, TreeOptions, ELIMINATION_GROUP_SIZE,
};
pub use models::{
    Affiliation, ChampionshipId, ChampionshipSettings, Fighter, FighterId, FighterKind,
    FightersGroup, GroupId, GroupKey, GroupPlan, GroupingKey, Slot, TournamentFormat, Tree,
    TreeGenerationError, TreePlan, DEFAULT_PRELIMINARY_GROUP_SIZE, MAX_FIGHTING_AREAS,
    MAX_PRELIMINARY_GROUP_SIZE, MIN_COMPETITORS_BY_AREA,
};
pub use roster::read_roster;
pub use store::{FighterSource, GroupRef, GroupStore, InMemoryStore, StoreError, StoreResult};

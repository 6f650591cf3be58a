//! Tree generation logic: entity grouping, byes, distribution, areas, rounds, parents.

mod areas;
mod byes;
mod distribute;
mod entity;
mod generator;
mod parents;
mod rounds;

pub use areas::{check_min_competitors, split_by_area};
pub use byes::{bye_count, bye_slots, group_size_for, tree_size};
pub use distribute::{distribute, insert_byes, repart};
pub use entity::{group_by_entity, max_entity_size};
pub use generator::{plan_tree, TreeGenerator, TreeOptions};
pub use parents::{link_parents, parent_index};
pub use rounds::{
    elimination_rounds, eliminatory_count, first_round_groups, round_count, ELIMINATION_GROUP_SIZE,
};

//! Fighters groups (matches / pools), their planned form, and the read-side tree view.

use crate::models::championship::{ChampionshipId, TournamentFormat};
use crate::models::fighter::{FighterKind, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for a stored group.
pub type GroupId = Uuid;

/// Position of a group inside a tree. Unique per championship.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GroupKey {
    pub round: u32,
    pub area: u32,
    pub order: u32,
}

/// A group as computed, before it is persisted. Parents are addressed by key, not by id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupPlan {
    pub area: u32,
    pub order: u32,
    pub round: u32,
    /// Fighters in fighting order; byes included.
    pub slots: Vec<Slot>,
    pub parent: Option<GroupKey>,
}

impl GroupPlan {
    pub fn new(area: u32, order: u32, round: u32, slots: Vec<Slot>) -> Self {
        Self {
            area,
            order,
            round,
            slots,
            parent: None,
        }
    }

    pub fn key(&self) -> GroupKey {
        GroupKey {
            round: self.round,
            area: self.area,
            order: self.order,
        }
    }

    /// Number of real fighters (byes excluded).
    pub fn fighter_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_bye()).count()
    }
}

/// The full computed tree of a championship.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TreePlan {
    pub championship_id: ChampionshipId,
    pub kind: FighterKind,
    pub format: TournamentFormat,
    /// Round-1 slot count (fighters + byes). Equals the fighter count for round robin.
    pub tree_size: usize,
    pub bye_count: usize,
    /// Highest round number (the final). 1 when there is no elimination tree.
    pub round_count: u32,
    /// Groups sorted by (round, area, order).
    pub groups: Vec<GroupPlan>,
}

impl TreePlan {
    pub fn round(&self, round: u32) -> impl Iterator<Item = &GroupPlan> {
        self.groups.iter().filter(move |g| g.round == round)
    }

    pub fn get(&self, key: GroupKey) -> Option<&GroupPlan> {
        self.groups.iter().find(|g| g.key() == key)
    }
}

/// A group as stored by a group store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FightersGroup {
    pub id: GroupId,
    pub championship_id: ChampionshipId,
    pub area: u32,
    pub order: u32,
    pub round: u32,
    pub parent_id: Option<GroupId>,
    pub slots: Vec<Slot>,
    pub created_at: DateTime<Utc>,
}

impl FightersGroup {
    pub fn new(
        championship_id: ChampionshipId,
        area: u32,
        order: u32,
        round: u32,
        parent_id: Option<GroupId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            championship_id,
            area,
            order,
            round,
            parent_id,
            slots: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn key(&self) -> GroupKey {
        GroupKey {
            round: self.round,
            area: self.area,
            order: self.order,
        }
    }
}

/// Stored groups of one championship bucketed by round, for display.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Tree {
    pub rounds: BTreeMap<u32, Vec<FightersGroup>>,
}

impl Tree {
    /// Bucket groups by round; each round is sorted by (area, order).
    pub fn from_groups(groups: impl IntoIterator<Item = FightersGroup>) -> Self {
        let mut rounds: BTreeMap<u32, Vec<FightersGroup>> = BTreeMap::new();
        for g in groups {
            rounds.entry(g.round).or_default().push(g);
        }
        for groups in rounds.values_mut() {
            groups.sort_by_key(|g| (g.area, g.order));
        }
        Self { rounds }
    }

    /// The final: the single group of the highest round, if the tree has one.
    pub fn root(&self) -> Option<&FightersGroup> {
        self.rounds
            .values()
            .next_back()
            .filter(|groups| groups.len() == 1)
            .and_then(|groups| groups.first())
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

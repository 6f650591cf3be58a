//! Fighter, Affiliation, and Slot data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fighter (competitor or team).
pub type FighterId = Uuid;

/// Whether the championship category is fought by individuals or by teams.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterKind {
    #[default]
    Individual,
    Team,
}

/// Which affiliation level fighters are kept apart by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingKey {
    Federation,
    Association,
    Club,
}

/// Federation / association / club a fighter belongs to. Any level may be unknown.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Affiliation {
    #[serde(default)]
    pub federation_id: Option<u32>,
    #[serde(default)]
    pub association_id: Option<u32>,
    #[serde(default)]
    pub club_id: Option<u32>,
}

impl Affiliation {
    /// Value of the given affiliation level.
    pub fn get(&self, key: GroupingKey) -> Option<u32> {
        match key {
            GroupingKey::Federation => self.federation_id,
            GroupingKey::Association => self.association_id,
            GroupingKey::Club => self.club_id,
        }
    }
}

/// A competitor or a team. The tree algorithm only looks at `id` and `affiliation`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub name: String,
    #[serde(default)]
    pub affiliation: Affiliation,
}

impl Fighter {
    /// Create a fighter with a fresh id and no affiliation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            affiliation: Affiliation::default(),
        }
    }

    /// Builder-style setter for the affiliation.
    pub fn with_affiliation(mut self, affiliation: Affiliation) -> Self {
        self.affiliation = affiliation;
        self
    }

    pub fn slot(&self) -> Slot {
        Slot::Fighter(self.id)
    }
}

/// One position in a group: a real fighter, or a bye (empty placeholder).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Fighter(FighterId),
    Bye,
}

impl Slot {
    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }

    /// Fighter id, `None` for a bye.
    pub fn fighter_id(&self) -> Option<FighterId> {
        match self {
            Slot::Fighter(id) => Some(*id),
            Slot::Bye => None,
        }
    }
}

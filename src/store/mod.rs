//! Collaborators the tree generator talks to: where fighters come from and where groups go.

mod memory;

pub use memory::InMemoryStore;

use crate::models::{ChampionshipId, Fighter, GroupId, Slot};
use serde::Serialize;
use std::sync::Arc;

/// Errors reported by a fighter source or group store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// No stored group has this id.
    GroupNotFound(GroupId),
    /// Commit or rollback without a matching `begin`.
    NoTransaction(ChampionshipId),
    /// A transaction for this championship is already open.
    TransactionInProgress(ChampionshipId),
    /// Anything the backend itself failed on.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::GroupNotFound(id) => write!(f, "Group {} not found", id),
            StoreError::NoTransaction(id) => {
                write!(f, "No open transaction for championship {}", id)
            }
            StoreError::TransactionInProgress(id) => {
                write!(f, "A transaction is already open for championship {}", id)
            }
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// A stored group as seen when resolving parents: id plus its position in the round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct GroupRef {
    pub id: GroupId,
    pub area: u32,
    pub order: u32,
}

/// Source of the fighters (competitors or teams) of a championship.
pub trait FighterSource: Send + Sync {
    /// Fighters in registration order.
    fn list_fighters(&self, championship_id: ChampionshipId) -> StoreResult<Vec<Fighter>>;
}

/// Persistence of fighters groups.
///
/// Regeneration is wrapped in `begin` / `commit`; on any failure the generator calls
/// `rollback`, which must put the championship's groups back as they were at `begin`.
pub trait GroupStore: Send + Sync {
    fn begin(&self, championship_id: ChampionshipId) -> StoreResult<()>;

    fn commit(&self, championship_id: ChampionshipId) -> StoreResult<()>;

    fn rollback(&self, championship_id: ChampionshipId) -> StoreResult<()>;

    fn delete_all_groups(&self, championship_id: ChampionshipId) -> StoreResult<()>;

    fn create_group(
        &self,
        championship_id: ChampionshipId,
        area: u32,
        order: u32,
        round: u32,
        parent_id: Option<GroupId>,
    ) -> StoreResult<GroupId>;

    /// Replace the group's fighters. Byes are stored as `Slot::Bye`.
    fn attach_fighters(&self, group_id: GroupId, slots: &[Slot]) -> StoreResult<()>;

    /// Groups of one round, sorted by (area, order).
    fn list_groups_by_round(
        &self,
        championship_id: ChampionshipId,
        round: u32,
    ) -> StoreResult<Vec<GroupRef>>;
}

impl<T: FighterSource + ?Sized> FighterSource for Arc<T> {
    fn list_fighters(&self, championship_id: ChampionshipId) -> StoreResult<Vec<Fighter>> {
        (**self).list_fighters(championship_id)
    }
}

impl<T: GroupStore + ?Sized> GroupStore for Arc<T> {
    fn begin(&self, championship_id: ChampionshipId) -> StoreResult<()> {
        (**self).begin(championship_id)
    }

    fn commit(&self, championship_id: ChampionshipId) -> StoreResult<()> {
        (**self).commit(championship_id)
    }

    fn rollback(&self, championship_id: ChampionshipId) -> StoreResult<()> {
        (**self).rollback(championship_id)
    }

    fn delete_all_groups(&self, championship_id: ChampionshipId) -> StoreResult<()> {
        (**self).delete_all_groups(championship_id)
    }

    fn create_group(
        &self,
        championship_id: ChampionshipId,
        area: u32,
        order: u32,
        round: u32,
        parent_id: Option<GroupId>,
    ) -> StoreResult<GroupId> {
        (**self).create_group(championship_id, area, order, round, parent_id)
    }

    fn attach_fighters(&self, group_id: GroupId, slots: &[Slot]) -> StoreResult<()> {
        (**self).attach_fighters(group_id, slots)
    }

    fn list_groups_by_round(
        &self,
        championship_id: ChampionshipId,
        round: u32,
    ) -> StoreResult<Vec<GroupRef>> {
        (**self).list_groups_by_round(championship_id, round)
    }
}

//! In-memory fighter source and group store with snapshot transactions.

use crate::models::{ChampionshipId, Fighter, FighterId, FightersGroup, GroupId, Slot};
use crate::store::{FighterSource, GroupRef, GroupStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    fighters: HashMap<ChampionshipId, Vec<Fighter>>,
    groups: HashMap<ChampionshipId, Vec<FightersGroup>>,
    /// Groups as they were at `begin`, per open transaction.
    snapshots: HashMap<ChampionshipId, Vec<FightersGroup>>,
}

/// Thread-safe store keeping rosters and trees in memory (web server state, tests).
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    /// Register a fighter at the end of the championship's roster.
    pub fn add_fighter(&self, championship_id: ChampionshipId, fighter: Fighter) -> StoreResult<()> {
        self.write()?
            .fighters
            .entry(championship_id)
            .or_default()
            .push(fighter);
        Ok(())
    }

    /// Remove a fighter from the roster. Returns whether it was registered.
    pub fn remove_fighter(
        &self,
        championship_id: ChampionshipId,
        fighter_id: FighterId,
    ) -> StoreResult<bool> {
        let mut g = self.write()?;
        let Some(roster) = g.fighters.get_mut(&championship_id) else {
            return Ok(false);
        };
        let before = roster.len();
        roster.retain(|f| f.id != fighter_id);
        Ok(roster.len() != before)
    }

    /// All stored groups of a championship sorted by (round, area, order).
    ///
    /// While a transaction is open this is the tree as it was at `begin`, so readers never
    /// see a half-written tree.
    pub fn groups(&self, championship_id: ChampionshipId) -> StoreResult<Vec<FightersGroup>> {
        let g = self.read()?;
        let mut groups = g
            .snapshots
            .get(&championship_id)
            .or_else(|| g.groups.get(&championship_id))
            .cloned()
            .unwrap_or_default();
        groups.sort_by_key(|g| g.key());
        Ok(groups)
    }
}

fn find_group_mut(inner: &mut Inner, group_id: GroupId) -> StoreResult<&mut FightersGroup> {
    inner
        .groups
        .values_mut()
        .flat_map(|groups| groups.iter_mut())
        .find(|group| group.id == group_id)
        .ok_or(StoreError::GroupNotFound(group_id))
}

impl FighterSource for InMemoryStore {
    fn list_fighters(&self, championship_id: ChampionshipId) -> StoreResult<Vec<Fighter>> {
        Ok(self
            .read()?
            .fighters
            .get(&championship_id)
            .cloned()
            .unwrap_or_default())
    }
}

impl GroupStore for InMemoryStore {
    fn begin(&self, championship_id: ChampionshipId) -> StoreResult<()> {
        let mut g = self.write()?;
        if g.snapshots.contains_key(&championship_id) {
            return Err(StoreError::TransactionInProgress(championship_id));
        }
        let current = g.groups.get(&championship_id).cloned().unwrap_or_default();
        g.snapshots.insert(championship_id, current);
        Ok(())
    }

    fn commit(&self, championship_id: ChampionshipId) -> StoreResult<()> {
        self.write()?
            .snapshots
            .remove(&championship_id)
            .map(|_| ())
            .ok_or(StoreError::NoTransaction(championship_id))
    }

    fn rollback(&self, championship_id: ChampionshipId) -> StoreResult<()> {
        let mut g = self.write()?;
        let snapshot = g
            .snapshots
            .remove(&championship_id)
            .ok_or(StoreError::NoTransaction(championship_id))?;
        g.groups.insert(championship_id, snapshot);
        Ok(())
    }

    fn delete_all_groups(&self, championship_id: ChampionshipId) -> StoreResult<()> {
        self.write()?.groups.remove(&championship_id);
        Ok(())
    }

    fn create_group(
        &self,
        championship_id: ChampionshipId,
        area: u32,
        order: u32,
        round: u32,
        parent_id: Option<GroupId>,
    ) -> StoreResult<GroupId> {
        let group = FightersGroup::new(championship_id, area, order, round, parent_id);
        let id = group.id;
        self.write()?
            .groups
            .entry(championship_id)
            .or_default()
            .push(group);
        Ok(id)
    }

    fn attach_fighters(&self, group_id: GroupId, slots: &[Slot]) -> StoreResult<()> {
        let mut g = self.write()?;
        find_group_mut(&mut g, group_id)?.slots = slots.to_vec();
        Ok(())
    }

    fn list_groups_by_round(
        &self,
        championship_id: ChampionshipId,
        round: u32,
    ) -> StoreResult<Vec<GroupRef>> {
        let g = self.read()?;
        let mut refs: Vec<GroupRef> = g
            .groups
            .get(&championship_id)
            .map(|groups| {
                groups
                    .iter()
                    .filter(|group| group.round == round)
                    .map(|group| GroupRef {
                        id: group.id,
                        area: group.area,
                        order: group.order,
                    })
                    .collect()
            })
            .unwrap_or_default();
        refs.sort_by_key(|r| (r.area, r.order));
        Ok(refs)
    }
}

//! Tree generation: compute the whole tree, then replace the stored one in a single transaction.

use crate::logic::areas::{check_min_competitors, split_by_area};
use crate::logic::byes::{bye_count, group_size_for, tree_size};
use crate::logic::distribute::distribute;
use crate::logic::entity::group_by_entity;
use crate::logic::parents::link_parents;
use crate::logic::rounds::{elimination_rounds, eliminatory_count, first_round_groups, round_count};
use crate::models::{
    ChampionshipId, ChampionshipSettings, Fighter, GroupId, GroupKey, GroupingKey, TreeGenerationError,
    TreePlan,
};
use crate::store::{FighterSource, GroupRef, GroupStore, StoreError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Largest first round multiplier; rosters above `64 * group_size` do not fit a tree.
const MAX_TREE_MULTIPLIER: usize = 64;

/// Per-run options of tree generation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TreeOptions {
    /// Keep fighters of the same federation / association / club apart.
    #[serde(default)]
    pub grouping_key: Option<GroupingKey>,
    /// Randomize group order and fighter order inside first-round groups.
    #[serde(default)]
    pub shuffle: bool,
}

/// Where a regeneration run currently is. Any failure aborts the run and rolls back.
///
/// The grouping, rounds and parent stages are reached while planning; the stored tree is
/// only deleted once the plan is complete.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GenerationStage {
    NotStarted,
    PreviousTreeDeleted,
    AreaGrouped,
    RoundsGenerated,
    ParentsLinked,
    Complete,
}

/// Compute a championship tree without touching any store.
///
/// Fails with `InvalidConfiguration` or `InsufficientFighters` before doing any work.
pub fn plan_tree<R: Rng + ?Sized>(
    championship_id: ChampionshipId,
    settings: &ChampionshipSettings,
    fighters: &[Fighter],
    options: &TreeOptions,
    rng: &mut R,
) -> Result<TreePlan, TreeGenerationError> {
    let stage = GenerationStage::NotStarted;
    settings.validate()?;
    let fighter_count = fighters.len();
    check_min_competitors(fighter_count, settings)?;

    let (size, byes, unit) = match group_size_for(settings) {
        Some(group_size) => {
            if fighter_count > MAX_TREE_MULTIPLIER * group_size {
                return Err(TreeGenerationError::InvalidConfiguration(format!(
                    "{} fighters do not fit a tree of at most {} slots",
                    fighter_count,
                    MAX_TREE_MULTIPLIER * group_size
                )));
            }
            (
                tree_size(fighter_count, group_size),
                bye_count(fighter_count, group_size),
                group_size,
            )
        }
        None => (fighter_count, 0, 1),
    };

    let entities = group_by_entity(fighters, options.grouping_key);
    let slots = distribute(&entities, byes);
    let areas = split_by_area(slots, settings.fighting_areas, unit);
    log::debug!(
        "championship {}: {} fighters + {} byes over {} area(s)",
        championship_id,
        fighter_count,
        byes,
        areas.len()
    );
    let stage = transition(championship_id, stage, GenerationStage::AreaGrouped);

    let mut groups = first_round_groups(areas, settings, options.shuffle, rng);
    let rounds = if settings.has_tree() {
        let eliminatory = eliminatory_count(size, settings);
        let rounds = round_count(eliminatory);
        groups.extend(elimination_rounds(eliminatory, rounds));
        rounds
    } else {
        1
    };
    let stage = transition(championship_id, stage, GenerationStage::RoundsGenerated);

    link_parents(&mut groups, rounds)?;
    groups.sort_by_key(|g| g.key());
    transition(championship_id, stage, GenerationStage::ParentsLinked);

    Ok(TreePlan {
        championship_id,
        kind: settings.kind,
        format: settings.format,
        tree_size: size,
        bye_count: byes,
        round_count: rounds,
        groups,
    })
}

/// Generates championship trees against a fighter source and a group store.
///
/// Regenerations of the same championship are serialized; different championships run
/// independently.
pub struct TreeGenerator<S, G> {
    source: S,
    store: G,
    locks: Mutex<HashMap<ChampionshipId, Arc<Mutex<()>>>>,
}

impl<S: FighterSource, G: GroupStore> TreeGenerator<S, G> {
    pub fn new(source: S, store: G) -> Self {
        Self {
            source,
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &G {
        &self.store
    }

    fn championship_lock(&self, championship_id: ChampionshipId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(championship_id).or_default().clone()
    }

    /// Drop the championship's lock entry unless another run holds or waits on it.
    fn release_lock(&self, championship_id: ChampionshipId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // one reference in the table, one here
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&championship_id);
        }
    }

    /// Number of championships with a regeneration running or waiting.
    pub fn active_locks(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Build the championship's tree and replace whatever tree was stored before.
    ///
    /// Either the new tree is fully stored and returned, or the error is returned and the
    /// previous tree is left as it was.
    pub fn generate_tree<R: Rng + ?Sized>(
        &self,
        championship_id: ChampionshipId,
        settings: &ChampionshipSettings,
        options: &TreeOptions,
        rng: &mut R,
    ) -> Result<TreePlan, TreeGenerationError> {
        let lock = self.championship_lock(championship_id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            self.regenerate(championship_id, settings, options, rng)
        };
        self.release_lock(championship_id, lock);
        result
    }

    fn regenerate<R: Rng + ?Sized>(
        &self,
        championship_id: ChampionshipId,
        settings: &ChampionshipSettings,
        options: &TreeOptions,
        rng: &mut R,
    ) -> Result<TreePlan, TreeGenerationError> {
        let fighters = self.source.list_fighters(championship_id)?;
        let plan = plan_tree(championship_id, settings, &fighters, options, rng)?;

        self.store.begin(championship_id)?;
        let saved = self
            .save_tree(&plan)
            .and_then(|()| self.store.commit(championship_id));
        if let Err(e) = saved {
            log::warn!(
                "championship {}: tree generation failed, rolling back: {}",
                championship_id,
                e
            );
            if let Err(rb) = self.store.rollback(championship_id) {
                log::warn!("championship {}: rollback failed: {}", championship_id, rb);
            }
            return Err(e.into());
        }

        log::info!(
            "championship {}: tree generated ({} groups, {} rounds, {} byes)",
            championship_id,
            plan.groups.len(),
            plan.round_count,
            plan.bye_count
        );
        Ok(plan)
    }

    /// Write a computed tree: delete the old groups, then create rounds from the final one
    /// down to the first so every parent already exists when its children are created.
    fn save_tree(&self, plan: &TreePlan) -> Result<(), StoreError> {
        let championship_id = plan.championship_id;

        self.store.delete_all_groups(championship_id)?;
        let stage = transition(
            championship_id,
            GenerationStage::ParentsLinked,
            GenerationStage::PreviousTreeDeleted,
        );

        for round in (1..=plan.round_count).rev() {
            let parents = if round < plan.round_count {
                self.store.list_groups_by_round(championship_id, round + 1)?
            } else {
                Vec::new()
            };
            for group in plan.round(round) {
                let parent_id = match group.parent {
                    Some(parent) => Some(find_ref(&parents, parent)?),
                    None => None,
                };
                let id = self.store.create_group(
                    championship_id,
                    group.area,
                    group.order,
                    group.round,
                    parent_id,
                )?;
                self.store.attach_fighters(id, &group.slots)?;
            }
        }
        log::debug!(
            "championship {}: stored {} group(s) in {} round(s)",
            championship_id,
            plan.groups.len(),
            plan.round_count
        );

        transition(championship_id, stage, GenerationStage::Complete);
        Ok(())
    }
}

fn transition(
    championship_id: ChampionshipId,
    from: GenerationStage,
    to: GenerationStage,
) -> GenerationStage {
    log::debug!("championship {}: {:?} -> {:?}", championship_id, from, to);
    to
}

fn find_ref(refs: &[GroupRef], key: GroupKey) -> Result<GroupId, StoreError> {
    refs.iter()
        .find(|r| r.area == key.area && r.order == key.order)
        .map(|r| r.id)
        .ok_or_else(|| {
            StoreError::Backend(format!(
                "no stored group at round {} area {} order {}",
                key.round, key.area, key.order
            ))
        })
}

//! Championship settings, tournament format, and tree generation errors.

use crate::models::fighter::FighterKind;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a championship (one category of a tournament).
pub type ChampionshipId = Uuid;

/// Group size used for preliminary pools when none is configured.
pub const DEFAULT_PRELIMINARY_GROUP_SIZE: u32 = 3;

/// Largest accepted number of fighting areas.
pub const MAX_FIGHTING_AREAS: u32 = 64;

/// Largest accepted preliminary pool. Bigger pools are round robins in all but name.
pub const MAX_PRELIMINARY_GROUP_SIZE: u32 = 16;

/// Minimum fighters per fighting area when none is configured.
pub const MIN_COMPETITORS_BY_AREA: u32 = 1;

/// How the championship is fought.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Everybody in an area fights everybody; no elimination tree.
    RoundRobin,
    /// Small round-robin pools, two survivors each, then direct elimination.
    Preliminary,
    /// Single elimination from the first round.
    #[default]
    DirectElimination,
}

/// Read-only settings of a championship.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChampionshipSettings {
    #[serde(default = "default_fighting_areas")]
    pub fighting_areas: u32,
    #[serde(default = "default_preliminary_group_size")]
    pub preliminary_group_size: u32,
    #[serde(default = "default_min_competitors_per_area")]
    pub min_competitors_per_area: u32,
    #[serde(default)]
    pub format: TournamentFormat,
    #[serde(default)]
    pub kind: FighterKind,
}

fn default_fighting_areas() -> u32 {
    1
}

fn default_preliminary_group_size() -> u32 {
    DEFAULT_PRELIMINARY_GROUP_SIZE
}

fn default_min_competitors_per_area() -> u32 {
    MIN_COMPETITORS_BY_AREA
}

impl Default for ChampionshipSettings {
    fn default() -> Self {
        Self {
            fighting_areas: default_fighting_areas(),
            preliminary_group_size: default_preliminary_group_size(),
            min_competitors_per_area: default_min_competitors_per_area(),
            format: TournamentFormat::default(),
            kind: FighterKind::default(),
        }
    }
}

impl ChampionshipSettings {
    pub fn new(format: TournamentFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn has_preliminary(&self) -> bool {
        self.format == TournamentFormat::Preliminary
    }

    pub fn is_direct_elimination(&self) -> bool {
        self.format == TournamentFormat::DirectElimination
    }

    /// Whether the format builds an elimination tree above round 1.
    pub fn has_tree(&self) -> bool {
        self.format != TournamentFormat::RoundRobin
    }

    /// Reject settings that would divide by zero or blow up the tree size later on.
    pub fn validate(&self) -> Result<(), TreeGenerationError> {
        if self.fighting_areas == 0 {
            return Err(TreeGenerationError::InvalidConfiguration(
                "fighting_areas must be at least 1".to_string(),
            ));
        }
        if self.fighting_areas > MAX_FIGHTING_AREAS {
            return Err(TreeGenerationError::InvalidConfiguration(format!(
                "fighting_areas must be at most {}",
                MAX_FIGHTING_AREAS
            )));
        }
        if self.has_preliminary() && self.preliminary_group_size == 0 {
            return Err(TreeGenerationError::InvalidConfiguration(
                "preliminary_group_size must be at least 1".to_string(),
            ));
        }
        if self.has_preliminary() && self.preliminary_group_size > MAX_PRELIMINARY_GROUP_SIZE {
            return Err(TreeGenerationError::InvalidConfiguration(format!(
                "preliminary_group_size must be at most {}",
                MAX_PRELIMINARY_GROUP_SIZE
            )));
        }
        Ok(())
    }
}

/// Errors that can occur while generating a championship tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TreeGenerationError {
    /// Fewer fighters per area than the settings require. Nothing was changed.
    InsufficientFighters {
        fighters: usize,
        areas: u32,
        min_per_area: u32,
    },
    /// Settings are missing or inconsistent for the chosen format. Nothing was changed.
    InvalidConfiguration(String),
    /// The fighter source or group store failed; the previous tree was restored.
    StoreFailure(StoreError),
}

impl std::fmt::Display for TreeGenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeGenerationError::InsufficientFighters {
                fighters,
                areas,
                min_per_area,
            } => write!(
                f,
                "Not enough fighters: {} fighters across {} area(s), need at least {} per area",
                fighters, areas, min_per_area
            ),
            TreeGenerationError::InvalidConfiguration(reason) => {
                write!(f, "Invalid championship configuration: {}", reason)
            }
            TreeGenerationError::StoreFailure(e) => write!(f, "Group store failure: {}", e),
        }
    }
}

impl std::error::Error for TreeGenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeGenerationError::StoreFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for TreeGenerationError {
    fn from(e: StoreError) -> Self {
        TreeGenerationError::StoreFailure(e)
    }
}

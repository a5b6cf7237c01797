//! Session configuration.
//!
//! A config describes everything needed to start a game. All fields have
//! defaults matching the standard four-faction 6x6 setup, so a TOML file only
//! needs the keys it changes:
//!
//! ```toml
//! grid_size = 8
//! seed = 42
//!
//! [[factions]]
//! name = "North"
//!
//! [[factions]]
//! name = "South"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SetupError};
use crate::game::{
    ActionCosts, Faction, FactionId, MAX_FACTIONS, MAX_GRID_SIZE, MIN_FACTIONS, MIN_GRID_SIZE,
    Resources, STARTING_RESOURCES,
};

/// Display metadata for one faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactionConfig {
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Flavor label.
    pub specialty: String,
}

impl Default for FactionConfig {
    fn default() -> Self {
        Self {
            name: "Faction".to_string(),
            color: String::new(),
            specialty: String::new(),
        }
    }
}

impl FactionConfig {
    fn new(name: &str, color: &str, specialty: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            specialty: specialty.to_string(),
        }
    }
}

/// Parameters for a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Side length of the square grid.
    pub grid_size: u16,
    /// Combat seed; `None` seeds from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Factions in turn order.
    pub factions: Vec<FactionConfig>,
    /// Pool each faction starts with.
    pub starting_resources: Resources,
    /// Price of each paid action.
    pub costs: ActionCosts,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 6,
            seed: None,
            factions: vec![
                FactionConfig::new("Faction 1", "#b3cde0", "Economic"),
                FactionConfig::new("Faction 2", "#fbb4ae", "Military"),
                FactionConfig::new("Faction 3", "#ccebc5", "Population"),
                FactionConfig::new("Faction 4", "#decbe4", "Technology"),
            ],
            starting_resources: STARTING_RESOURCES,
            costs: ActionCosts::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config or describes an
    /// impossible game.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render this config as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Keep only the first `count` factions.
    #[must_use]
    pub fn with_faction_count(mut self, count: usize) -> Self {
        self.factions.truncate(count);
        self
    }

    /// Check that the config describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns an error for a faction count outside 2..=4, a grid smaller
    /// than the corner placement needs, or a grid above [`MAX_GRID_SIZE`].
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.factions.len() < MIN_FACTIONS {
            return Err(SetupError::TooFewFactions(self.factions.len()));
        }
        if self.factions.len() > MAX_FACTIONS {
            return Err(SetupError::TooManyFactions(self.factions.len()));
        }
        if self.grid_size < MIN_GRID_SIZE {
            return Err(SetupError::GridTooSmall {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
            });
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(SetupError::GridTooLarge {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(())
    }

    /// Build the faction list in turn order.
    #[must_use]
    pub fn build_factions(&self) -> Vec<Faction> {
        self.factions
            .iter()
            .zip(0..=FactionId::MAX)
            .map(|(entry, id)| {
                Faction::new(id, entry.name.clone())
                    .with_color(entry.color.clone())
                    .with_specialty(entry.specialty.clone())
                    .with_resources(self.starting_resources)
            })
            .collect()
    }
}

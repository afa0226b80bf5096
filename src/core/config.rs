//! Match configuration with documented constants
//!
//! The defaults reproduce the reference match: twenty territories, two power
//! on every node at the start, and a two hundred turn horizon.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConquestError, Result};

/// Number of territories on a generated map
///
/// Also the roster capacity: every player needs one home node.
pub const NODE_COUNT: u32 = 20;

/// Power every node starts with, home nodes included
pub const STARTING_POWER: u32 = 2;

/// Number of `advance` calls before the match loop emits stop
pub const TURN_HORIZON: u32 = 200;

/// Configuration for a single match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// How many nodes the generator creates
    ///
    /// Upper bound on roster size. The map is a random recursive tree,
    /// so this also fixes the edge count at `node_count - 1`.
    pub node_count: u32,

    /// Initial power on every node, at least 1
    ///
    /// Home nodes receive no bonus; ownership is the only thing that
    /// distinguishes them at turn 0.
    pub starting_power: u32,

    /// Number of turns the match loop runs before stopping
    pub horizon: u32,

    /// Seed for the match randomness
    ///
    /// `None` lets the caller pick one (the CLI draws a random seed).
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            node_count: NODE_COUNT,
            starting_power: STARTING_POWER,
            horizon: TURN_HORIZON,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.node_count == 0 {
            return Err(ConquestError::InvalidConfig(
                "node_count must be at least 1".into(),
            ));
        }

        if self.starting_power == 0 {
            return Err(ConquestError::InvalidConfig(
                "starting_power must be at least 1".into(),
            ));
        }

        if self.horizon == 0 {
            return Err(ConquestError::InvalidConfig(
                "horizon must be at least 1 turn".into(),
            ));
        }

        Ok(())
    }

    /// Check that a roster of `players` entries fits this map
    pub fn check_roster_size(&self, players: usize) -> Result<()> {
        if players == 0 {
            return Err(ConquestError::EmptyRoster);
        }

        let capacity = self.node_count as usize;
        if players > capacity {
            return Err(ConquestError::RosterExceedsCapacity { players, capacity });
        }

        Ok(())
    }
}

use thiserror::Error;

use crate::core::types::PlayerId;

#[derive(Error, Debug)]
pub enum ConquestError {
    #[error("Configuration error: player roster is empty")]
    EmptyRoster,

    #[error("Configuration error: {players} players exceed node capacity {capacity}")]
    RosterExceedsCapacity { players: usize, capacity: usize },

    #[error("Configuration error: player {0} appears more than once in the roster")]
    DuplicatePlayer(PlayerId),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Match already reached its horizon of {horizon} turns")]
    MatchFinished { horizon: u32 },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ConquestError {
    /// True for errors caused by a bad roster or config rather than a bug
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ConquestError::EmptyRoster
                | ConquestError::RosterExceedsCapacity { .. }
                | ConquestError::DuplicatePlayer(_)
                | ConquestError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConquestError>;

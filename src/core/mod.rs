pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::MatchConfig;
pub use error::{ConquestError, Result};
pub use random::{LowestIndex, RandomSource, ScriptedSource, SeededSource};
pub use types::{NodeId, Owner, PlayerId};

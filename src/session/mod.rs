//! Match session layer
//!
//! Wraps the engine in the loop an external transport drives: one snapshot
//! for the generated state, one per turn, then a stop message.

pub mod batch;
pub mod runner;
pub mod sink;
pub mod snapshot;

pub use batch::{play_out, run_batch, BatchReport, PlayerRecord};
pub use runner::{Match, MatchRunner, MatchSummary};
pub use sink::{JsonLinesSink, MatchHistory, SnapshotSink};
pub use snapshot::{MatchMessage, Snapshot};

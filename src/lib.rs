//! Conquest - Deterministic Territory Conquest Engine
//!
//! A procedurally generated graph of territories contested by a fixed roster
//! of players, advanced one ply at a time through a deploy phase and a
//! move/combat phase.
//!
//! ```text
//! generate_initial ──> State ──> TurnSimulator::advance (× horizon) ──> Snapshots ──> sink
//! ```

pub mod core;
pub mod engine;
pub mod graph;
pub mod session;

pub use crate::core::{ConquestError, MatchConfig, NodeId, Owner, PlayerId, RandomSource, Result};
pub use crate::engine::{State, TurnEvents, TurnSimulator};
pub use crate::graph::generate_initial;
pub use crate::session::{Match, MatchRunner};

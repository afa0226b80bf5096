//! Match engine
//!
//! Holds the mutable match state and the turn simulator that advances it.
//! Everything here is synchronous and single-threaded; the only source of
//! non-determinism is the `RandomSource` passed into each call.

pub mod events;
pub mod invariants;
pub mod state;
pub mod turn;

pub use events::{DeployEvent, MoveEvent, MoveKind, TurnEvents};
pub use invariants::{check_invariants, ensure_invariants};
pub use state::{Player, Standing, State};
pub use turn::{advance, TurnSimulator};

//! Turn resolution: deploy phase, then move phase
//!
//! Both phases walk the roster in stored order. The move phase recomputes a
//! player's owned nodes when that player's slot is reached, so a node lost to
//! an earlier player in the same phase does not act, and a node captured
//! during a player's own slot first acts on the following turn.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::core::error::Result;
use crate::core::random::{choose, RandomSource};
use crate::core::types::{NodeId, Owner};
use crate::engine::events::{DeployEvent, MoveEvent, MoveKind, TurnEvents};
use crate::engine::invariants::ensure_invariants;
use crate::engine::state::State;

/// Advances a match state one ply at a time
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnSimulator;

impl TurnSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Run one deploy phase and one move phase, mutating `state` in place
    ///
    /// The returned events describe only this ply. Fails with
    /// `InvariantViolation` before touching anything if `state` is corrupt.
    pub fn advance(&self, state: &mut State, rng: &mut dyn RandomSource) -> Result<TurnEvents> {
        ensure_invariants(state)?;

        let mut events = TurnEvents::new();
        deploy_phase(state, rng, &mut events);
        move_phase(state, rng, &mut events);

        debug!(
            deploys = events.deploys.len(),
            moves = events.moves.len(),
            captures = events.captures().count(),
            "turn resolved"
        );

        Ok(events)
    }
}

/// Shorthand for `TurnSimulator::new().advance(state, rng)`
pub fn advance(state: &mut State, rng: &mut dyn RandomSource) -> Result<TurnEvents> {
    TurnSimulator::new().advance(state, rng)
}

/// Each living player adds its territory count to one random owned node
fn deploy_phase(state: &mut State, rng: &mut dyn RandomSource, events: &mut TurnEvents) {
    for index in 0..state.players.len() {
        let player = state.players[index].id;
        let owned = state.nodes_owned_by(player);
        let power = owned.len() as u32;
        state.players[index].power = power;

        let Some(&target) = choose(rng, &owned) else {
            trace!(%player, "no territory, skipping deploy");
            continue;
        };

        let node = &mut state.nodes[target.index()];
        node.power = node.power.saturating_add(power);
        trace!(%player, %target, power, "deploy");
        events.deploys.push(DeployEvent { target, power });
    }
}

/// Every owned node sends half its power to a random neighbor
fn move_phase(state: &mut State, rng: &mut dyn RandomSource, events: &mut TurnEvents) {
    for index in 0..state.players.len() {
        let player = state.players[index].id;

        for source in state.nodes_owned_by(player) {
            let candidates = state.neighbors(source);
            let Some(&target) = choose(rng, &candidates) else {
                continue;
            };

            let event = resolve_move(state, source, target);
            trace!(%player, source = %event.source, target = %event.target, power = event.power, kind = ?event.kind, "move");
            events.moves.push(event);
        }
    }
}

/// Apply one move; `source` and `target` are distinct existing nodes
fn resolve_move(state: &mut State, source: NodeId, target: NodeId) -> MoveEvent {
    let attacker = state.nodes[source.index()].owner;
    let origin = &mut state.nodes[source.index()];
    let power = origin.power / 2;
    origin.power -= power;

    let defender = &mut state.nodes[target.index()];
    let kind = if defender.owner == attacker {
        defender.power = defender.power.saturating_add(power);
        MoveKind::Reinforce
    } else {
        match defender.power.cmp(&power) {
            Ordering::Greater => {
                defender.power -= power;
                MoveKind::Attack
            }
            Ordering::Equal => {
                defender.power = 0;
                defender.owner = Owner::Unowned;
                MoveKind::Neutralize
            }
            Ordering::Less => {
                defender.power = power - defender.power;
                defender.owner = attacker;
                MoveKind::Capture
            }
        }
    };

    MoveEvent {
        source,
        target,
        power,
        kind,
    }
}

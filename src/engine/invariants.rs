//! State invariants - sanity checks that detect bugs
//!
//! A state produced by `generate_initial` and advanced only by the turn
//! simulator never trips these. A violation means something outside the
//! engine corrupted the state; the turn refuses to run instead of repairing.

use std::collections::HashSet;

use tracing::error;

use crate::core::error::{ConquestError, Result};
use crate::core::types::Owner;
use crate::engine::state::State;
use crate::graph::topology::{find_duplicate_edge, is_connected};

/// Check all state invariants
///
/// Returns a description of each violation found, or empty if all hold.
pub fn check_invariants(state: &State) -> Vec<String> {
    let mut violations = Vec::new();
    let node_count = state.nodes.len();

    if state.players.len() > node_count {
        violations.push(format!(
            "{} players but only {} nodes",
            state.players.len(),
            node_count
        ));
    }

    let mut roster = HashSet::new();
    for player in &state.players {
        if !roster.insert(player.id) {
            violations.push(format!("player {} listed twice", player.id));
        }
    }

    for (index, node) in state.nodes.iter().enumerate() {
        if node.id.index() != index {
            violations.push(format!("node at index {index} has id {}", node.id));
        }
        if let Owner::Player(owner) = node.owner {
            if !roster.contains(&owner) {
                violations.push(format!("node {} owned by unknown player {owner}", node.id));
            }
        }
    }

    let mut edges_valid = true;
    for edge in &state.edges {
        if edge.a.index() >= node_count || edge.b.index() >= node_count {
            violations.push(format!("edge {}-{} references a missing node", edge.a, edge.b));
            edges_valid = false;
        } else if edge.a == edge.b {
            violations.push(format!("self-loop on node {}", edge.a));
        }
    }

    if let Some(dup) = find_duplicate_edge(&state.edges) {
        violations.push(format!("duplicate edge {}-{}", dup.a, dup.b));
    }

    if node_count > 0 && state.edges.len() != node_count - 1 {
        violations.push(format!(
            "{} edges for {} nodes, expected {}",
            state.edges.len(),
            node_count,
            node_count - 1
        ));
    }

    if edges_valid && !is_connected(node_count, &state.edges) {
        violations.push("territory graph is disconnected".to_string());
    }

    violations
}

/// Fail fast if any invariant is violated
pub fn ensure_invariants(state: &State) -> Result<()> {
    let violations = check_invariants(state);
    if violations.is_empty() {
        return Ok(());
    }

    error!(count = violations.len(), "state invariants violated");
    Err(ConquestError::InvariantViolation(violations.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MatchConfig;
    use crate::core::random::SeededSource;
    use crate::core::types::{NodeId, PlayerId};
    use crate::graph::generation::generate_initial;
    use crate::graph::node::Edge;

    fn fresh_state() -> State {
        let players = [PlayerId(0), PlayerId(1), PlayerId(2)];
        generate_initial(&players, &MatchConfig::default(), &mut SeededSource::new(7)).unwrap()
    }

    #[test]
    fn test_generated_state_is_clean() {
        assert!(check_invariants(&fresh_state()).is_empty());
        assert!(ensure_invariants(&fresh_state()).is_ok());
    }

    #[test]
    fn test_dangling_edge_detected() {
        let mut state = fresh_state();
        state.edges[0] = Edge::new(NodeId(0), NodeId(99));
        let violations = check_invariants(&state);
        assert!(violations.iter().any(|v| v.contains("missing node")));
    }

    #[test]
    fn test_unknown_owner_detected() {
        let mut state = fresh_state();
        state.nodes[3].owner = Owner::Player(PlayerId(42));
        let err = ensure_invariants(&state).unwrap_err();
        assert!(matches!(err, ConquestError::InvariantViolation(ref msg) if msg.contains("unknown player")));
    }

    #[test]
    fn test_missing_edge_detected() {
        let mut state = fresh_state();
        state.edges.pop();
        let violations = check_invariants(&state);
        assert!(violations.iter().any(|v| v.contains("expected 19")));
        assert!(violations.iter().any(|v| v.contains("disconnected")));
    }

    #[test]
    fn test_duplicate_player_detected() {
        let mut state = fresh_state();
        state.players[2].id = PlayerId(0);
        let violations = check_invariants(&state);
        assert!(violations.iter().any(|v| v.contains("listed twice")));
    }
}

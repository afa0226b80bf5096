//! Initial map generation

use std::collections::HashSet;

use tracing::debug;

use crate::core::config::MatchConfig;
use crate::core::error::{ConquestError, Result};
use crate::core::random::RandomSource;
use crate::core::types::{NodeId, Owner, PlayerId};
use crate::engine::state::{Player, State};
use crate::graph::node::{Edge, Node};

/// Build the turn-0 state for a roster
///
/// Players keep the order they are given in; that order drives every phase
/// of every turn afterwards.
pub fn generate_initial(
    players: &[PlayerId],
    config: &MatchConfig,
    rng: &mut dyn RandomSource,
) -> Result<State> {
    validate_roster(players, config)?;

    let mut nodes = generate_nodes(config.node_count, config.starting_power);
    assign_homes(&mut nodes, players);
    let edges = build_spanning_tree(config.node_count, rng);

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        players = players.len(),
        "generated initial map"
    );

    // Each player holds exactly its home node
    let roster = players
        .iter()
        .map(|&id| Player { id, power: 1 })
        .collect();
    Ok(State::new(roster, nodes, edges))
}

/// Check a config and roster without building a map
pub fn validate_roster(players: &[PlayerId], config: &MatchConfig) -> Result<()> {
    config.validate()?;
    config.check_roster_size(players.len())?;
    check_unique(players)
}

fn check_unique(players: &[PlayerId]) -> Result<()> {
    let mut seen = HashSet::new();
    match players.iter().find(|&&id| !seen.insert(id)) {
        Some(&duplicate) => Err(ConquestError::DuplicatePlayer(duplicate)),
        None => Ok(()),
    }
}

fn generate_nodes(count: u32, power: u32) -> Vec<Node> {
    (0..count).map(|id| Node::new(NodeId(id), power)).collect()
}

/// Player k takes node N-1-k; home nodes get no power bonus
fn assign_homes(nodes: &mut [Node], players: &[PlayerId]) {
    let last = nodes.len() - 1;
    for (k, &player) in players.iter().enumerate() {
        nodes[last - k].owner = Owner::Player(player);
    }
}

/// Random recursive tree: node i links to a uniform pick among 0..i
fn build_spanning_tree(count: u32, rng: &mut dyn RandomSource) -> Vec<Edge> {
    (1..count)
        .map(|i| {
            let parent = rng.pick_index(i as usize) as u32;
            Edge::new(NodeId(i), NodeId(parent))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{LowestIndex, SeededSource};
    use crate::graph::topology::{find_duplicate_edge, is_connected};

    fn roster(count: u32) -> Vec<PlayerId> {
        (0..count).map(PlayerId).collect()
    }

    #[test]
    fn test_two_player_reference_layout() {
        let state = generate_initial(&roster(2), &MatchConfig::default(), &mut LowestIndex).unwrap();

        assert_eq!(state.nodes.len(), 20);
        assert_eq!(state.edges.len(), 19);
        assert_eq!(state.nodes[19].owner, Owner::Player(PlayerId(0)));
        assert_eq!(state.nodes[18].owner, Owner::Player(PlayerId(1)));
        for node in &state.nodes[..18] {
            assert_eq!(node.owner, Owner::Unowned);
        }
        assert!(state.nodes.iter().all(|n| n.power == 2));
        for (k, player) in state.players.iter().enumerate() {
            assert_eq!(player.power, 1);
            assert_eq!(player.power, state.owned_count(PlayerId(k as u32)));
        }
    }

    #[test]
    fn test_lowest_index_builds_star() {
        let state = generate_initial(&roster(1), &MatchConfig::default(), &mut LowestIndex).unwrap();
        assert!(state.edges.iter().all(|e| e.b == NodeId(0)));
    }

    #[test]
    fn test_tree_shape_for_many_seeds() {
        let config = MatchConfig::default();
        for seed in 0..50 {
            let state = generate_initial(&roster(4), &config, &mut SeededSource::new(seed)).unwrap();
            assert_eq!(state.edges.len(), 19);
            assert!(is_connected(state.nodes.len(), &state.edges));
            assert!(find_duplicate_edge(&state.edges).is_none());
            assert!(state.edges.iter().all(|e| e.a != e.b));
        }
    }

    #[test]
    fn test_full_roster_owns_every_node() {
        let state = generate_initial(&roster(20), &MatchConfig::default(), &mut LowestIndex).unwrap();
        assert!(state.nodes.iter().all(|n| n.owner != Owner::Unowned));
        assert_eq!(state.nodes[0].owner, Owner::Player(PlayerId(19)));
    }

    #[test]
    fn test_roster_errors() {
        let config = MatchConfig::default();
        let empty = generate_initial(&[], &config, &mut LowestIndex).unwrap_err();
        assert!(matches!(empty, ConquestError::EmptyRoster));

        let too_many = generate_initial(&roster(21), &config, &mut LowestIndex).unwrap_err();
        assert!(too_many.is_configuration());

        let dup = generate_initial(&[PlayerId(4), PlayerId(4)], &config, &mut LowestIndex).unwrap_err();
        assert!(matches!(dup, ConquestError::DuplicatePlayer(PlayerId(4))));
    }

    #[test]
    fn test_validate_roster_matches_generation() {
        let config = MatchConfig::default();
        assert!(validate_roster(&roster(20), &config).is_ok());
        assert!(matches!(validate_roster(&[], &config), Err(ConquestError::EmptyRoster)));
        assert!(validate_roster(&roster(21), &config).unwrap_err().is_configuration());
        assert!(matches!(
            validate_roster(&[PlayerId(2), PlayerId(5), PlayerId(2)], &config),
            Err(ConquestError::DuplicatePlayer(PlayerId(2)))
        ));

        let broken = MatchConfig {
            horizon: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(
            validate_roster(&roster(2), &broken),
            Err(ConquestError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_node_map() {
        let config = MatchConfig {
            node_count: 1,
            ..MatchConfig::default()
        };
        let state = generate_initial(&roster(1), &config, &mut LowestIndex).unwrap();
        assert!(state.edges.is_empty());
        assert_eq!(state.nodes[0].owner, Owner::Player(PlayerId(0)));
    }
}

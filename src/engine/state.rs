//! State - the match state container

use serde::{Deserialize, Serialize};

use crate::core::types::{NodeId, PlayerId};
use crate::graph::node::{Edge, Node};
use crate::graph::topology;

/// A roster entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Territory count as of the last deploy phase or generation
    pub power: u32,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self { id, power: 0 }
    }
}

/// Per-player summary used for reporting and winner queries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub nodes: u32,
    pub power: u64,
}

/// Complete match state: roster, territories, links
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Roster in fixed order; this order drives phase iteration
    pub players: Vec<Player>,
    /// Indexed by node id
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl State {
    pub fn new(players: Vec<Player>, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            players,
            nodes,
            edges,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    /// Nodes currently owned by `player`, ascending by id
    pub fn nodes_owned_by(&self, player: PlayerId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_owned_by(player))
            .map(|n| n.id)
            .collect()
    }

    pub fn owned_count(&self, player: PlayerId) -> u32 {
        self.nodes.iter().filter(|n| n.is_owned_by(player)).count() as u32
    }

    /// A player owning no nodes can never act again
    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.owned_count(player) == 0
    }

    /// Nodes adjacent to `node`, ascending by id
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        topology::neighbors(&self.edges, node)
    }

    pub fn total_power(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.power)).sum()
    }

    /// Node count and summed power per player, in roster order
    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .map(|p| {
                let owned = self.nodes.iter().filter(|n| n.is_owned_by(p.id));
                let (nodes, power) = owned.fold((0u32, 0u64), |(count, sum), n| {
                    (count + 1, sum + u64::from(n.power))
                });
                Standing {
                    player: p.id,
                    nodes,
                    power,
                }
            })
            .collect()
    }

    /// The single player owning the most nodes
    ///
    /// `None` when the top node count is shared or nobody owns anything.
    pub fn leader(&self) -> Option<PlayerId> {
        let standings = self.standings();
        let best = standings.iter().map(|s| s.nodes).max()?;
        if best == 0 {
            return None;
        }
        let mut top = standings.iter().filter(|s| s.nodes == best);
        match (top.next(), top.next()) {
            (Some(only), None) => Some(only.player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Owner;

    fn owned(id: u32, owner: Option<u32>, power: u32) -> Node {
        let mut node = Node::new(NodeId(id), power);
        if let Some(p) = owner {
            node.owner = Owner::Player(PlayerId(p));
        }
        node
    }

    fn sample_state() -> State {
        State::new(
            vec![Player::new(PlayerId(0)), Player::new(PlayerId(1))],
            vec![owned(0, Some(1), 4), owned(1, None, 2), owned(2, Some(0), 3), owned(3, Some(1), 1)],
            vec![
                Edge::new(NodeId(1), NodeId(0)),
                Edge::new(NodeId(2), NodeId(1)),
                Edge::new(NodeId(3), NodeId(0)),
            ],
        )
    }

    #[test]
    fn test_owned_nodes_in_id_order() {
        let state = sample_state();
        assert_eq!(state.nodes_owned_by(PlayerId(1)), vec![NodeId(0), NodeId(3)]);
        assert_eq!(state.owned_count(PlayerId(0)), 1);
        assert!(!state.is_eliminated(PlayerId(0)));
        assert!(state.is_eliminated(PlayerId(9)));
    }

    #[test]
    fn test_standings_and_leader() {
        let state = sample_state();
        let standings = state.standings();
        assert_eq!(standings[0], Standing { player: PlayerId(0), nodes: 1, power: 3 });
        assert_eq!(standings[1], Standing { player: PlayerId(1), nodes: 2, power: 5 });
        assert_eq!(state.leader(), Some(PlayerId(1)));
        assert_eq!(state.total_power(), 10);
    }

    #[test]
    fn test_leader_tie_is_none() {
        let mut state = sample_state();
        state.nodes[1].owner = Owner::Player(PlayerId(0));
        assert_eq!(state.leader(), None);
    }

    #[test]
    fn test_leader_none_when_all_unowned() {
        let mut state = sample_state();
        for node in &mut state.nodes {
            node.owner = Owner::Unowned;
        }
        assert_eq!(state.leader(), None);
    }
}

//! Node and Edge - the territory graph data model

use serde::{Deserialize, Serialize};

use crate::core::types::{NodeId, Owner, PlayerId};

/// A territory on the map
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub owner: Owner,
    /// The contested resource held at this territory
    pub power: u32,
}

impl Node {
    pub fn new(id: NodeId, power: u32) -> Self {
        Self {
            id,
            name: format!("node{}", id.0),
            owner: Owner::Unowned,
            power,
        }
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner.is_owned_by(player)
    }
}

/// Undirected link between two territories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }

    /// Endpoints ordered low to high, for duplicate detection
    pub fn key(&self) -> (NodeId, NodeId) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

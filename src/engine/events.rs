//! Per-turn event report

use serde::{Deserialize, Serialize};

use crate::core::types::NodeId;

/// A player reinforced one of its nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployEvent {
    pub target: NodeId,
    pub power: u32,
}

/// How a move resolved at its target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Target shares the source's owner
    Reinforce,
    /// Target survived with its owner unchanged
    Attack,
    /// Target dropped to exactly zero and became unowned
    Neutralize,
    /// Target went negative and flipped to the source's owner
    Capture,
}

/// Power sent from one node to a neighbor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub source: NodeId,
    pub target: NodeId,
    /// Amount taken out of the source
    pub power: u32,
    pub kind: MoveKind,
}

/// What happened during one ply, in resolution order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvents {
    pub deploys: Vec<DeployEvent>,
    pub moves: Vec<MoveEvent>,
}

impl TurnEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.deploys.is_empty() && self.moves.is_empty()
    }

    pub fn captures(&self) -> impl Iterator<Item = &MoveEvent> {
        self.moves.iter().filter(|m| m.kind == MoveKind::Capture)
    }
}

//! Serializable match snapshots handed to the outside world

use serde::{Deserialize, Serialize};

use crate::engine::events::TurnEvents;
use crate::engine::state::{Player, State};
use crate::graph::node::{Edge, Node};

/// The full match state after a turn, plus what happened during it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 0 for the generated state, then 1..=horizon
    pub turn: u32,
    pub players: Vec<Player>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub events: TurnEvents,
}

impl Snapshot {
    pub fn capture(turn: u32, state: &State, events: &TurnEvents) -> Self {
        Self {
            turn,
            players: state.players.clone(),
            nodes: state.nodes.clone(),
            edges: state.edges.clone(),
            events: events.clone(),
        }
    }

    /// Rebuild the state this snapshot was taken from
    pub fn to_state(&self) -> State {
        State::new(self.players.clone(), self.nodes.clone(), self.edges.clone())
    }
}

/// One message of the outbound match stream
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchMessage {
    State(Snapshot),
    /// Sent once after the last turn; no further state follows
    Stop { turns: u32 },
}

impl MatchMessage {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            MatchMessage::State(snapshot) => Some(snapshot),
            MatchMessage::Stop { .. } => None,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, MatchMessage::Stop { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MatchConfig;
    use crate::core::random::LowestIndex;
    use crate::core::types::PlayerId;
    use crate::graph::generation::generate_initial;

    #[test]
    fn test_state_message_is_tagged() {
        let state = generate_initial(&[PlayerId(5)], &MatchConfig::default(), &mut LowestIndex).unwrap();
        let message = MatchMessage::State(Snapshot::capture(0, &state, &TurnEvents::new()));

        let json: serde_json::Value = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "state");
        assert_eq!(json["turn"], 0);
        assert_eq!(json["nodes"][19]["owner"]["player"], 5);
        assert_eq!(json["nodes"][0]["owner"], "unowned");
        assert_eq!(json["events"]["deploys"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_stop_message_shape() {
        let json = serde_json::to_string(&MatchMessage::Stop { turns: 200 }).unwrap();
        assert_eq!(json, r#"{"type":"stop","turns":200}"#);
        let back: MatchMessage = serde_json::from_str(&json).unwrap();
        assert!(back.is_stop());
    }

    #[test]
    fn test_snapshot_restores_state() {
        let state = generate_initial(&[PlayerId(1), PlayerId(2)], &MatchConfig::default(), &mut LowestIndex).unwrap();
        let snapshot = Snapshot::capture(3, &state, &TurnEvents::new());
        assert_eq!(snapshot.to_state(), state);
    }
}

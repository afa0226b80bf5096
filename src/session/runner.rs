//! Match loop: generate once, advance to the horizon, then stop

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::MatchConfig;
use crate::core::error::{ConquestError, Result};
use crate::core::random::RandomSource;
use crate::core::types::PlayerId;
use crate::engine::events::TurnEvents;
use crate::engine::state::{Standing, State};
use crate::engine::turn::TurnSimulator;
use crate::graph::generation::generate_initial;
use crate::session::sink::SnapshotSink;
use crate::session::snapshot::{MatchMessage, Snapshot};

/// A match in progress
///
/// Owns its state and randomness; the caller drives it one turn at a time.
#[derive(Debug)]
pub struct Match<R: RandomSource> {
    config: MatchConfig,
    state: State,
    turn: u32,
    last_events: TurnEvents,
    simulator: TurnSimulator,
    rng: R,
}

impl<R: RandomSource> Match<R> {
    /// Generate the initial state for `players`
    pub fn start(players: &[PlayerId], config: MatchConfig, mut rng: R) -> Result<Self> {
        let state = generate_initial(players, &config, &mut rng)?;
        Ok(Self {
            config,
            state,
            turn: 0,
            last_events: TurnEvents::new(),
            simulator: TurnSimulator::new(),
            rng,
        })
    }

    /// Run the next ply
    pub fn advance(&mut self) -> Result<&TurnEvents> {
        if self.is_finished() {
            return Err(ConquestError::MatchFinished {
                horizon: self.config.horizon,
            });
        }

        self.last_events = self.simulator.advance(&mut self.state, &mut self.rng)?;
        self.turn += 1;
        Ok(&self.last_events)
    }

    /// Current state and the events of the turn that produced it
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.turn, &self.state, &self.last_events)
    }

    pub fn is_finished(&self) -> bool {
        self.turn >= self.config.horizon
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn horizon(&self) -> u32 {
        self.config.horizon
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_state(self) -> State {
        self.state
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            turns_played: self.turn,
            standings: self.state.standings(),
            leader: self.state.leader(),
        }
    }
}

/// Outcome of a completed match loop
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub turns_played: u32,
    pub standings: Vec<Standing>,
    /// Player owning the most nodes; `None` on a tie
    pub leader: Option<PlayerId>,
}

/// Drives a full match and streams every snapshot to a sink
#[derive(Clone, Debug, Default)]
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Emit turn 0, then one snapshot per advance up to the horizon, then stop
    pub fn run<R, S>(&self, players: &[PlayerId], rng: R, sink: &mut S) -> Result<MatchSummary>
    where
        R: RandomSource,
        S: SnapshotSink + ?Sized,
    {
        let mut game = Match::start(players, self.config.clone(), rng)?;
        info!(
            players = players.len(),
            nodes = self.config.node_count,
            horizon = self.config.horizon,
            "match started"
        );

        sink.deliver(&MatchMessage::State(game.snapshot()))?;

        while !game.is_finished() {
            game.advance()?;
            debug!(turn = game.turn(), "turn complete");
            sink.deliver(&MatchMessage::State(game.snapshot()))?;
        }

        sink.deliver(&MatchMessage::Stop { turns: game.turn() })?;

        let summary = game.summary();
        info!(
            turns = summary.turns_played,
            leader = ?summary.leader,
            "match stopped"
        );
        Ok(summary)
    }
}

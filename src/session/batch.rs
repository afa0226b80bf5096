//! Many seeded matches in parallel, aggregated into a leader table
//!
//! Each game `i` uses seed `base_seed + i`, so a batch is reproducible and
//! any single game can be replayed on its own.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::config::MatchConfig;
use crate::core::error::Result;
use crate::core::random::SeededSource;
use crate::core::types::PlayerId;
use crate::graph::generation::validate_roster;
use crate::session::runner::Match;

/// How often one player finished as sole leader
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player: PlayerId,
    pub leads: u64,
}

/// Aggregated result of a batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub base_seed: u64,
    pub games: u64,
    pub records: Vec<PlayerRecord>,
    /// Games ending with a shared top node count, or with nobody owning anything
    pub draws: u64,
    /// Games that stopped on an engine error
    pub failed: u64,
}

/// Per-thread accumulator, merged at the end
#[derive(Clone, Debug)]
struct Tally {
    games: u64,
    leads: Vec<u64>,
    draws: u64,
    failed: u64,
}

impl Tally {
    fn new(players: usize) -> Self {
        Self {
            games: 0,
            leads: vec![0; players],
            draws: 0,
            failed: 0,
        }
    }

    fn add(&mut self, players: &[PlayerId], outcome: Result<Option<PlayerId>>) {
        self.games += 1;
        match outcome {
            Ok(Some(leader)) => {
                if let Some(slot) = players.iter().position(|&p| p == leader) {
                    self.leads[slot] += 1;
                }
            }
            Ok(None) => self.draws += 1,
            Err(e) => {
                warn!(error = %e, "batch game failed");
                self.failed += 1;
            }
        }
    }

    fn merge(mut self, other: Tally) -> Self {
        self.games += other.games;
        self.draws += other.draws;
        self.failed += other.failed;
        for (mine, theirs) in self.leads.iter_mut().zip(other.leads) {
            *mine += theirs;
        }
        self
    }
}

/// Play one full match and return its leader
pub fn play_out(players: &[PlayerId], config: &MatchConfig, seed: u64) -> Result<Option<PlayerId>> {
    let mut game = Match::start(players, config.clone(), SeededSource::new(seed))?;
    while !game.is_finished() {
        game.advance()?;
    }
    Ok(game.state().leader())
}

/// Run `games` matches in parallel and count sole leaders per player
///
/// The roster and config are checked once up front; a bad roster fails the
/// whole batch instead of every game.
pub fn run_batch(
    players: &[PlayerId],
    config: &MatchConfig,
    base_seed: u64,
    games: u64,
) -> Result<BatchReport> {
    validate_roster(players, config)?;

    let tally = (0..games)
        .into_par_iter()
        .fold(
            || Tally::new(players.len()),
            |mut local, i| {
                local.add(players, play_out(players, config, base_seed.wrapping_add(i)));
                local
            },
        )
        .reduce(|| Tally::new(players.len()), Tally::merge);

    info!(
        games = tally.games,
        draws = tally.draws,
        failed = tally.failed,
        "batch complete"
    );

    Ok(BatchReport {
        base_seed,
        games: tally.games,
        records: players
            .iter()
            .zip(tally.leads)
            .map(|(&player, leads)| PlayerRecord { player, leads })
            .collect(),
        draws: tally.draws,
        failed: tally.failed,
    })
}

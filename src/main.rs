//! Conquest - Entry Point
//!
//! Runs matches headless and streams snapshots as JSON lines, standing in
//! for the transport that would normally deliver them to players.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use conquest::core::{MatchConfig, PlayerId, Result, SeededSource};
use conquest::session::{run_batch, JsonLinesSink, MatchRunner};

/// Conquest - deterministic territory conquest engine
#[derive(Parser, Debug)]
#[command(name = "conquest")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single match and stream every snapshot as JSON lines
    Run {
        /// Player ids in roster order
        #[arg(short, long, num_args = 1.., default_values_t = [0u32, 1])]
        players: Vec<u32>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Turn horizon (overrides the config file)
        #[arg(short, long)]
        turns: Option<u32>,

        /// Match config TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the stream to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run many seeded matches in parallel and report who led
    Batch {
        /// Player ids in roster order
        #[arg(short, long, num_args = 1.., default_values_t = [0u32, 1])]
        players: Vec<u32>,

        /// Number of matches
        #[arg(short, long, default_value_t = 1000)]
        games: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Worker threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Match config TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conquest=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            players,
            seed,
            turns,
            config,
            output,
        } => run_match(players, seed, turns, config.as_deref(), output.as_deref()),
        Commands::Batch {
            players,
            games,
            seed,
            threads,
            config,
        } => run_many(players, games, seed, threads, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::load(path),
        None => Ok(MatchConfig::default()),
    }
}

fn roster(ids: Vec<u32>) -> Vec<PlayerId> {
    ids.into_iter().map(PlayerId).collect()
}

fn run_match(
    players: Vec<u32>,
    seed: Option<u64>,
    turns: Option<u32>,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(turns) = turns {
        config.horizon = turns;
    }
    config.validate()?;

    let seed = seed.or(config.seed).unwrap_or_else(rand::random);
    tracing::info!(seed, "seeding match");

    let runner = MatchRunner::new(config);
    let players = roster(players);
    let rng = SeededSource::new(seed);

    let summary = match output {
        Some(path) => {
            let mut sink = JsonLinesSink::new(BufWriter::new(File::create(path)?));
            runner.run(&players, rng, &mut sink)?
        }
        None => {
            let mut sink = JsonLinesSink::new(io::stdout().lock());
            runner.run(&players, rng, &mut sink)?
        }
    };

    for standing in &summary.standings {
        tracing::info!(
            player = %standing.player,
            nodes = standing.nodes,
            power = standing.power,
            "final standing"
        );
    }

    Ok(())
}

fn run_many(
    players: Vec<u32>,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;

    if let Some(num_threads) = threads {
        // Ignore the error if the global pool is already built
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok();
    }

    let base_seed = seed.or(config.seed).unwrap_or_else(rand::random);
    let report = run_batch(&roster(players), &config, base_seed, games)?;

    serde_json::to_writer_pretty(io::stdout().lock(), &report)?;
    println!();
    Ok(())
}

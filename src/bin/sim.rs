//! Pit the targeting engine against randomly placed fleets and report how many
//! shots each difficulty needs to clear a board.

use std::collections::BTreeMap;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use rand::{rngs::SmallRng, SeedableRng};
use salvo::{init_logging, Board, Difficulty, GameConfig, TargetingEngine, DEFAULT_FLEET};
use serde::Serialize;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Expert,
    All,
}

impl DifficultyArg {
    fn selected(self) -> Vec<Difficulty> {
        match self {
            DifficultyArg::Easy => vec![Difficulty::Easy],
            DifficultyArg::Medium => vec![Difficulty::Medium],
            DifficultyArg::Hard => vec![Difficulty::Hard],
            DifficultyArg::Expert => vec![Difficulty::Expert],
            DifficultyArg::All => Difficulty::ALL.to_vec(),
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Games to play per difficulty.
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = DifficultyArg::All)]
    difficulty: DifficultyArg,
    #[arg(long, default_value_t = salvo::DEFAULT_GRID_SIZE)]
    grid_size: usize,
    /// Comma separated ship lengths.
    #[arg(long, value_delimiter = ',')]
    fleet: Vec<usize>,
    /// Log every shot.
    #[arg(long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Summary {
    games: usize,
    mean_shots: f64,
    min_shots: usize,
    max_shots: usize,
}

/// Play one engine-versus-board game, returning the number of shots fired.
fn play(
    config: &GameConfig,
    difficulty: Difficulty,
    rng: &mut SmallRng,
) -> anyhow::Result<usize> {
    let mut board = Board::new(config.grid_size);
    board.place_fleet_randomly(rng, &config.fleet)?;
    let mut engine = TargetingEngine::new(difficulty);
    let mut shots = 0;
    while board.has_ships_remaining() {
        let Some((row, col)) = engine.next_target(&board, rng) else {
            bail!("{:?} engine ran out of targets with ships remaining", difficulty);
        };
        let result = board.attack(row, col)?;
        let sunk = board.is_sunk_at(row, col);
        engine.record(&board, (row, col), result, sunk);
        debug!("shot {} at ({}, {}): {:?} sunk={}", shots + 1, row, col, result, sunk);
        shots += 1;
    }
    Ok(shots)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(Some(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }));

    let fleet = if cli.fleet.is_empty() {
        DEFAULT_FLEET.to_vec()
    } else {
        cli.fleet.clone()
    };
    let config = GameConfig {
        grid_size: cli.grid_size,
        fleet,
        ..GameConfig::default()
    };
    config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let mut rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let mut results = BTreeMap::new();
    for difficulty in cli.difficulty.selected() {
        let mut shots = Vec::with_capacity(cli.games);
        for game in 0..cli.games {
            let n = play(&config, difficulty, &mut rng)
                .with_context(|| format!("{:?} game {}", difficulty, game))?;
            shots.push(n);
        }
        let summary = Summary {
            games: shots.len(),
            mean_shots: shots.iter().sum::<usize>() as f64 / shots.len() as f64,
            min_shots: shots.iter().copied().min().unwrap_or(0),
            max_shots: shots.iter().copied().max().unwrap_or(0),
        };
        info!("{:?}: mean {:.2} shots", difficulty, summary.mean_shots);
        results.insert(format!("{:?}", difficulty).to_lowercase(), summary);
    }

    println!("{}", serde_json::to_string(&results)?);
    Ok(())
}

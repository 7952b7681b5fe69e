//! Headless block puzzle runner (default binary).
//!
//! Plays one seeded game with a first-fit strategy: every turn the first
//! placeable piece is dropped on the first slot where it fits. The final board
//! is printed to stdout; logs go to stderr.
//!
//! Environment:
//! - `BLOCK_PUZZLE_CONFIG`: path to a JSON [`GameConfig`] (default: standard 8x8)
//! - `BLOCK_PUZZLE_SEED`: shape provider seed (default: 1)
//! - `BLOCK_PUZZLE_SCORE_FILE`: JSON high-score file (default: in-memory only)
//! - `BLOCK_PUZZLE_MAX_TURNS`: stop after this many turns (default: 10000)
//! - `BLOCK_PUZZLE_LOG`: `error`, `warn`, `info`, `debug` or `trace` (default: `info`)

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

use block_puzzle::core::{
    find_anchor, GameConfig, GameSession, HighScoreStore, MemoryHighScoreStore, NullObserver,
    SeededShapeProvider,
};
use block_puzzle::types::{PieceId, SlotId};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr(),
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = std::env::var("BLOCK_PUZZLE_LOG")
        .ok()
        .and_then(|s| s.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Runner settings read from the environment
#[derive(Debug, Clone)]
struct RunConfig {
    config_path: Option<PathBuf>,
    seed: u32,
    score_file: Option<PathBuf>,
    max_turns: u32,
}

impl RunConfig {
    fn from_env() -> Self {
        use std::env;

        let path = |key: &str| {
            env::var(key)
                .ok()
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
        };

        let seed = env::var("BLOCK_PUZZLE_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1);

        let max_turns = env::var("BLOCK_PUZZLE_MAX_TURNS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(10_000);

        Self {
            config_path: path("BLOCK_PUZZLE_CONFIG"),
            seed,
            score_file: path("BLOCK_PUZZLE_SCORE_FILE"),
            max_turns,
        }
    }

    fn game_config(&self) -> Result<GameConfig> {
        let Some(path) = &self.config_path else {
            return Ok(GameConfig::standard());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        GameConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: i64,
}

/// High score kept in a small JSON file
struct JsonFileHighScoreStore {
    path: PathBuf,
}

impl HighScoreStore for JsonFileHighScoreStore {
    fn load_high_score(&self) -> i64 {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return 0;
        };
        match serde_json::from_str::<HighScoreFile>(&json) {
            Ok(file) => file.high_score,
            Err(e) => {
                log::warn!("ignoring unreadable high score file {}: {e}", self.path.display());
                0
            }
        }
    }

    fn save_high_score(&mut self, high_score: i64) {
        let result = serde_json::to_string(&HighScoreFile { high_score })
            .map_err(anyhow::Error::from)
            .and_then(|json| fs::write(&self.path, json).map_err(anyhow::Error::from));
        if let Err(e) = result {
            log::warn!("failed to save high score to {}: {e}", self.path.display());
        }
    }
}

/// First active piece that fits somewhere, with the slot to drop it on
fn first_fit(session: &GameSession) -> Option<(PieceId, SlotId)> {
    session
        .active_pieces()
        .filter(|p| p.is_placeable())
        .find_map(|p| {
            find_anchor(p.shape(), session.board(), session.tolerance()).map(|slot| (p.id(), slot))
        })
}

fn main() -> Result<()> {
    init_logging();

    let run = RunConfig::from_env();
    let config = run.game_config()?;

    let store: Box<dyn HighScoreStore> = match &run.score_file {
        Some(path) => Box::new(JsonFileHighScoreStore { path: path.clone() }),
        None => Box::new(MemoryHighScoreStore::new()),
    };
    let provider = SeededShapeProvider::new(config.shapes.clone(), config.palette_size, run.seed);
    let mut session = GameSession::new(&config, Box::new(provider), store, Box::new(NullObserver))
        .context("starting session")?;

    while !session.is_game_over() && session.turns() < run.max_turns {
        let Some((piece, slot)) = first_fit(&session) else {
            break;
        };
        session
            .place_at(piece, slot)
            .with_context(|| format!("placing {piece} at {slot}"))?;
    }

    if !session.is_game_over() {
        log::info!("stopped after {} turns", session.turns());
    }

    println!("{}", session.snapshot().to_text());
    Ok(())
}

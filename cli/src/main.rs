use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use blockpop_core::*;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::command::{Command, HELP};
use crate::render::{Board, MAX_BLOCK_TYPES};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Clear groups of matching blocks before the moves run out", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON engine configuration, individual flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<Coord>,

    #[arg(long)]
    height: Option<Coord>,

    /// Number of distinct block colors
    #[arg(short = 't', long)]
    block_types: Option<u8>,

    /// Move budget per session
    #[arg(short, long)]
    moves: Option<MoveCount>,

    /// Pause between a clear and the refill, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid engine config in {}", path.display()))?
            }
            None => EngineConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid.size.0 = width;
        }
        if let Some(height) = self.height {
            config.grid.size.1 = height;
        }
        if let Some(block_types) = self.block_types {
            config.grid.block_types = block_types;
        }
        if let Some(moves) = self.moves {
            config.initial_moves = moves;
        }

        config.grid.validate().context("Unusable grid configuration")?;
        if config.grid.block_types > MAX_BLOCK_TYPES {
            bail!(
                "At most {MAX_BLOCK_TYPES} block types can be drawn, got {}",
                config.grid.block_types
            );
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.engine_config()?;
    let seed = args
        .seed
        .unwrap_or_else(|| SmallRng::from_os_rng().random());
    log::info!("seed: {seed}");
    log::debug!("config: {config:?}");

    let engine = Engine::from_seed(config, seed)?;
    play(engine, Duration::from_millis(args.delay_ms))
}

fn play(mut engine: Engine, delay: Duration) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;
    write!(out, "{}", Board(&Snapshot::from_engine(&engine)))?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Replay => engine.replay(),
            Command::Tap(coords) => match engine.tap(coords) {
                Ok(TapOutcome::Cleared(clearance)) => {
                    writeln!(out, "Cleared {} blocks", clearance.size)?;
                    if !delay.is_zero() {
                        write!(out, "{}", Board(&Snapshot::from_engine(&engine)))?;
                        out.flush()?;
                        thread::sleep(delay);
                    }
                    engine.commit_refill();
                }
                Ok(TapOutcome::NoOp) => {
                    writeln!(out, "Nothing to clear at {} {}", coords.0, coords.1)?;
                    continue;
                }
                Ok(TapOutcome::Rejected(RejectReason::GameOver)) => {
                    writeln!(out, "Game over, `r` to play again")?;
                    continue;
                }
                Ok(TapOutcome::Rejected(RejectReason::Busy)) => {
                    writeln!(out, "Still refilling")?;
                    continue;
                }
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            },
        }

        write!(out, "{}", Board(&Snapshot::from_engine(&engine)))?;
        if engine.session().is_game_over() {
            writeln!(
                out,
                "Game over! Final score {}, `r` to play again",
                engine.session().score()
            )?;
        }
        out.flush()?;
    }

    Ok(())
}

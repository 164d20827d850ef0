#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line bot that plays the bomb-placement game over standard streams.

mod config;
mod protocol;
mod session;

use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command-line arguments accepted by the bot.
#[derive(Debug, Parser)]
#[command(name = "hypersonic", about = "Box-clearing bot for the bomb-placement game")]
struct CliArgs {
    /// TOML file overriding the built-in heuristics.
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,
    /// Reads game input from a recorded transcript instead of standard input.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Log filter directive used when `RUST_LOG` is unset.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    log: String,
}

/// Entry point for the bot.
fn main() -> Result<()> {
    let args = CliArgs::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log))
        .with_context(|| format!("invalid log filter '{}'", args.log))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let tuning = config::load_tuning(args.tuning.as_deref())?;
    tracing::debug!(?tuning, "loaded tuning");

    let stdout = io::stdout().lock();
    let turns = match args.input {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open transcript {}", path.display()))?;
            session::run(BufReader::new(file), stdout, tuning)?
        }
        None => session::run(io::stdin().lock(), stdout, tuning)?,
    };

    tracing::info!(turns, "game finished");
    Ok(())
}

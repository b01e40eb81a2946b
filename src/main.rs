use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gambit_core::Setup;
use gambit_console::Session;
use gambit_engine::{Engine, EngineConfig, config};

#[derive(Parser, Debug)]
#[command(name = "gambit", about = "Two-player chess on the console")]
struct Args {
    /// CSV file the move log is appended to
    #[arg(long = "log", default_value = config::DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    /// Number of recent moves shown by `history`
    #[arg(long = "history", default_value_t = config::DEFAULT_HISTORY_WINDOW)]
    history_window: usize,

    /// Start from this FEN position instead of the initial one
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the game; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig {
        log_path: args.log_path,
        history_window: args.history_window,
    };
    let engine = match args.fen.as_deref() {
        Some(fen) => {
            let setup: Setup = fen.parse().with_context(|| format!("invalid --fen position: {fen}"))?;
            Engine::from_setup(setup, config)
        }
        None => Engine::with_config(config),
    };
    info!(log = %engine.config().log_path.display(), "gambit starting");

    let stdin = io::stdin();
    let mut session = Session::new(engine, stdin.lock(), io::stdout().lock());
    session.run().context("console session failed")?;
    Ok(())
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! slotlock - bounded-concurrency locks over a shared Redis store

mod commands;
mod error;
mod output;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{reclaim, run, status};
use error::CliError;
use output::OutputFormat;
use settings::Settings;
use slotlock_core::SystemClock;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slotlock",
    version,
    about = "Bounded-concurrency locks: up to N holders per pool, coordinated through Redis"
)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, env = "SLOTLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Store URL [default: config file, then redis://127.0.0.1:6379]
    #[arg(long, global = true, env = "SLOTLOCK_STORE_URL")]
    store_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the holders of a pool
    Status(status::StatusArgs),
    /// Run a command while holding a slot
    Run(run::RunArgs),
    /// Free a slot left behind by a dead holder
    Reclaim(reclaim::ReclaimArgs),
}

fn setup_logging() {
    let filter = EnvFilter::try_from_env("SLOTLOCK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn dispatch(cli: Cli, settings: &Settings) -> Result<u8> {
    let store = settings.open_store()?;

    match cli.command {
        Commands::Status(args) => {
            status::handle(args, store, &SystemClock, cli.output).await?;
        }
        Commands::Run(args) => return run::handle(args, store, &settings.file).await,
        Commands::Reclaim(args) => {
            reclaim::handle(args, store, &SystemClock, cli.output).await?;
        }
    }

    Ok(0)
}

fn report(err: CliError) -> ExitCode {
    eprint!("{}", err);
    ExitCode::from(err.exit_code)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    let settings = match Settings::load(cli.config.as_deref(), cli.store_url.clone()) {
        Ok(settings) => settings,
        Err(e) => return report(CliError::config(e)),
    };
    tracing::debug!(store_url = settings.store_url(), "settings loaded");

    match dispatch(cli, &settings).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => report(CliError::from_anyhow(err, settings.store_url())),
    }
}

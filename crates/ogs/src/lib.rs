//! # Order Guard Service
//!
//! Command line front end over [`ogs_infrastructure::AppContext`].

use anyhow::Context;
use clap::{Parser, Subcommand};
use ogs_domain::value_objects::{FanOutMode, JobStatus};
use ogs_infrastructure::AppContext;
use ogs_infrastructure::config::{AppConfig, ConfigLoader};
use ogs_infrastructure::logging::init_logging;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Command line interface for the Order Guard Service
#[derive(Parser, Debug)]
#[command(name = "ogs")]
#[command(about = "Order Guard Service - lock-guarded order generation")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Service operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the order job once under the distributed lock
    Run,

    /// Invoke the order job several times
    FanOut {
        /// Number of invocations (clamped to `job.max_fan_out`)
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Start all invocations at once instead of one after another
        #[arg(long)]
        concurrent: bool,
    },

    /// Statistics over the most recent orders
    Stats,

    /// Check Redis, the lock directory and the order store
    Check,
}

impl Command {
    /// Fan-out scheduling requested on the command line
    pub fn fan_out_mode(concurrent: bool) -> FanOutMode {
        if concurrent {
            FanOutMode::Concurrent
        } else {
            FanOutMode::Sequential
        }
    }
}

/// Load configuration for the given CLI arguments
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    loader.load().context("Failed to load configuration")
}

/// Execute one CLI invocation
///
/// A job error or a failed health check exits non-zero; a skipped job
/// does not.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    init_logging(&config.logging).context("Failed to initialize logging")?;
    debug!(command = ?cli.command, "Starting");

    let context = AppContext::build(&config)
        .await
        .context("Failed to build application context")?;

    match cli.command {
        Command::Run => {
            let report = context.run_job().await;
            print_json(&report)?;
            Ok(exit_code(report.status != JobStatus::Error))
        }
        Command::FanOut { count, concurrent } => {
            let report = context
                .fan_out(count, Command::fan_out_mode(concurrent))
                .await?;
            print_json(&report)?;
            Ok(exit_code(report.summary.errors == 0))
        }
        Command::Stats => {
            let report = context.statistics().await?;
            print_json(&report)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => {
            let health = context.check().await;
            print_json(&health)?;
            Ok(exit_code(health.is_operational()))
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

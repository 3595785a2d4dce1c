//! Order Guard Service - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ogs run` | Run the lock-guarded order job once |
//! | `ogs fan-out -n N [--concurrent]` | Invoke the job N times |
//! | `ogs stats` | Recent-order statistics, cached briefly |
//! | `ogs check` | Health of Redis, lock directory and order store |
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.

use clap::Parser;
use ogs::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    ogs::run(cli).await
}

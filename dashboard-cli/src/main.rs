//! Binary crate for the `dashboard` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Printing rendered widgets and managing stored preferences

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cmd = cli::Cli::parse();
    cmd.run().await
}

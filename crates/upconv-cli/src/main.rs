//! Command-line entry point for upconv.

use anyhow::Result;
use clap::Parser;
use upconv_planner::cli::{run_cli, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run_cli(cli)
}

//! Command-line entry point for rebuilding requirement control trees.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}

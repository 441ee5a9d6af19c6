use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use control_tree::{
    render::{nested, notion},
    write_output, Config,
};
use tracing::instrument;

use super::terminal::{summary, Tone};

#[derive(Debug, Parser)]
#[command(about = "Convert nested JSON output into Notion import blocks")]
pub struct Notion {
    /// Nested JSON written by `parse --format json`
    input: PathBuf,

    /// Destination of the Notion block JSON
    output: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Notion {
    #[instrument(level = "debug", skip(self), fields(input = %self.input.display()))]
    pub fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!("{e}"))?,
            None => Config::default(),
        };

        let json = fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let records = nested::from_json(&json)
            .with_context(|| format!("{} is not a nested control tree", self.input.display()))?;

        let blocks = notion::convert(&records, &config.notion_note);
        let mut text = notion::to_json(&blocks).context("failed to render Notion blocks")?;
        text.push('\n');
        write_output(Some(&self.output), &text)?;

        summary(
            Tone::Done,
            format_args!("Notion import JSON written to {}", self.output.display()),
        );
        Ok(())
    }
}

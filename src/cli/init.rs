use std::path::PathBuf;

use clap::Parser;
use control_tree::Config;
use tracing::instrument;

use super::terminal::{summary, Tone};

#[derive(Debug, Parser)]
#[command(about = "Write a configuration file holding the default settings")]
pub struct Init {
    /// Where to write the configuration
    #[arg(default_value = "ctree.toml")]
    path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

impl Init {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn run(self) -> anyhow::Result<()> {
        if self.path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.path.display()
            );
        }

        Config::default()
            .save(&self.path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        summary(
            Tone::Done,
            format_args!("Wrote default configuration to {}", self.path.display()),
        );
        Ok(())
    }
}

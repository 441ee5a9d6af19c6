use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use control_tree::{parse_tables, write_output, BuildReport, Config, OutputFormat, TableDump};
use tracing::instrument;

use super::terminal::{summary, Tone};

#[derive(Debug, Parser)]
#[command(about = "Rebuild the control tree from an extracted table dump")]
pub struct Parse {
    /// Table dump of the source document (JSON, or YAML by extension)
    source: PathBuf,

    /// Output encoding
    #[arg(short, long, value_name = "FORMAT", default_value = "yaml")]
    format: OutputFormat,

    /// Write to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Wrap titles in the structured document at this width
    #[arg(long, value_name = "COLUMNS")]
    wrap_width: Option<usize>,
}

impl Parse {
    #[instrument(level = "debug", skip(self), fields(source = %self.source.display()))]
    pub fn run(self) -> anyhow::Result<()> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!("{e}"))?,
            None => Config::default(),
        };
        if let Some(width) = self.wrap_width {
            config.set_wrap_width(width);
        }

        let dump = TableDump::load(&self.source)?;
        let parsed = parse_tables(dump.tables(), &config)
            .with_context(|| format!("failed to parse {}", self.source.display()))?;

        let text = self
            .format
            .render(&parsed.tree, &config)
            .context("failed to render control tree")?;
        write_output(self.output.as_deref(), &text)?;

        print_summary(parsed.tree.len(), &parsed.report);
        Ok(())
    }
}

fn print_summary(nodes: usize, report: &BuildReport) {
    summary(
        Tone::Done,
        format_args!("Parsed {nodes} requirements from {} blobs", report.blobs()),
    );

    let dropped = report.unparseable().len();
    if dropped > 0 {
        summary(
            Tone::Note,
            format_args!("Dropped {dropped} blobs without an identifier"),
        );
    }

    for duplicate in report.duplicates() {
        summary(
            Tone::Alert,
            format_args!(
                "Identifier {} appears {} times",
                duplicate.identifier, duplicate.occurrences
            ),
        );
    }
}

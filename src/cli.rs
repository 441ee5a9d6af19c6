mod init;
mod notion;
mod parse;
mod terminal;

use clap::ArgAction;
use init::Init;
use notion::Notion;
use parse::Parse;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // Rendered output goes to stdout, so logs must not.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Rebuild the control tree from an extracted table dump
    Parse(Parse),

    /// Convert nested JSON output into Notion import blocks
    Notion(Notion),

    /// Write a configuration file holding the default settings
    Init(Init),
}

impl Command {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Parse(command) => command.run(),
            Self::Notion(command) => command.run(),
            Self::Init(command) => command.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::{CommandFactory, Parser};
    use tempfile::tempdir;

    use super::*;

    fn run(args: &[&str]) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(std::iter::once("ctree").chain(args.iter().copied()))?;
        cli.command.run()
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults_to_yaml_on_stdout() {
        let cli = Cli::try_parse_from(["ctree", "parse", "tables.json"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Command::Parse(_)));
    }

    #[test]
    fn verbosity_is_global() {
        let cli = Cli::try_parse_from(["ctree", "notion", "in.json", "out.json", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn init_has_default_path() {
        let cli = Cli::try_parse_from(["ctree", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init(_)));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["ctree"]).is_err());
    }

    #[test]
    fn parse_run_writes_json_output() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("tables.yaml");
        let output = tmp.path().join("controls.json");
        fs::write(
            &source,
            "- - [\"Requirements and Testing Procedures\"]\n  - [\"1 Install controls.\"]\n  - [\"1.1 Define processes.\"]\n",
        )
        .unwrap();

        run(&[
            "parse",
            source.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"id\": \"1.1\""));
        assert!(written.contains("\"title\": \"Define processes.\""));
    }

    #[test]
    fn parse_run_fails_without_requirements() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("tables.json");
        fs::write(&source, r#"[[["Guidance"], ["Nothing here"]]]"#).unwrap();

        let error = run(&["parse", source.to_str().unwrap()]).unwrap_err();

        assert!(error.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn notion_run_converts_nested_json() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("controls.json");
        let output = tmp.path().join("notion.json");
        fs::write(
            &input,
            r#"[{"id": "1", "title": "Top", "children": [{"id": "1.1", "title": "Child", "children": []}]}]"#,
        )
        .unwrap();

        run(&["notion", input.to_str().unwrap(), output.to_str().unwrap()]).unwrap();

        let blocks: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(blocks[0]["type"], "heading_1");
        assert_eq!(
            blocks[0]["children"][1]["heading_1"]["rich_text"][0]["text"]["content"],
            "1.1 — Child"
        );
    }

    #[test]
    fn init_run_writes_loadable_config() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ctree.toml");

        run(&["init", path.to_str().unwrap()]).unwrap();

        let config = control_tree::Config::load(&path).unwrap();
        assert_eq!(config, control_tree::Config::default());
    }

    #[test]
    fn init_run_refuses_to_overwrite() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ctree.toml");
        fs::write(&path, "keep me").unwrap();

        assert!(run(&["init", path.to_str().unwrap()]).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        run(&["init", path.to_str().unwrap(), "--force"]).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "keep me");
    }
}

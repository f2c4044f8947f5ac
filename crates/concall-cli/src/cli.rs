//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Concall - digest earnings-call transcripts and filings into structured reports.
#[derive(Debug, Parser)]
#[command(name = "concall")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.concall/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (subjects only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a batch of discovered entries
    Run(RunArgs),

    /// Inspect or edit the processed set
    Processed(ProcessedArgs),

    /// Show or initialise the configuration file
    Config(ConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// JSON file of entries produced by the scraper
    #[arg(short, long)]
    pub entries: PathBuf,

    /// Only process entries published on this date (e.g. "15 March 2024"; default: yesterday)
    #[arg(short, long, conflicts_with = "all_dates")]
    pub date: Option<String>,

    /// Process every entry regardless of publication date
    #[arg(long)]
    pub all_dates: bool,

    /// LLM API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for processed-set management.
#[derive(Debug, Parser)]
pub struct ProcessedArgs {
    #[command(subcommand)]
    pub action: ProcessedAction,
}

/// Processed-set actions.
#[derive(Debug, Subcommand)]
pub enum ProcessedAction {
    /// List processed subjects in the order they were completed
    List,

    /// Remove a subject so the next run processes it again
    Forget {
        /// Subject identifier
        subject: String,
    },
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (API key masked)
    Show,

    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command() {
        let cli = Cli::try_parse_from([
            "concall",
            "run",
            "--entries",
            "entries.json",
            "--date",
            "15 March 2024",
            "--api-key",
            "gsk_test",
        ])
        .unwrap();

        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.entries, PathBuf::from("entries.json"));
                assert_eq!(args.date.as_deref(), Some("15 March 2024"));
                assert!(!args.all_dates);
                assert_eq!(args.api_key.as_deref(), Some("gsk_test"));
            }
            other => panic!("Expected Run command, got {:?}", other),
        }
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_date_conflicts_with_all_dates() {
        let result = Cli::try_parse_from([
            "concall",
            "run",
            "--entries",
            "entries.json",
            "--date",
            "15 March 2024",
            "--all-dates",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_processed_forget() {
        let cli = Cli::try_parse_from(["concall", "processed", "forget", "AcmeCorp"]).unwrap();
        match cli.command {
            Command::Processed(ProcessedArgs {
                action: ProcessedAction::Forget { subject },
            }) => assert_eq!(subject, "AcmeCorp"),
            other => panic!("Expected Processed Forget, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "concall",
            "config",
            "init",
            "--force",
            "--config",
            "/tmp/concall.toml",
            "--format",
            "json",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/concall.toml")));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, crate::config::OutputFormat::Quiet);
    }
}

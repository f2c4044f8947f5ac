//! Concall CLI - digest earnings calls and filings into structured reports.

use clap::Parser;
use concall_cli::cli::{ConfigAction, ConfigArgs};
use concall_cli::commands;
use concall_cli::{Cli, Command, ConcallConfig, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> concall_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for json/quiet output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ConcallConfig::default_path()?,
    };

    // `config init` must work whatever is (or is not) at the path
    let config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => ConcallConfig::default(),
        _ => ConcallConfig::load(cli.config.as_deref())?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &config, &formatter).await?,
        Command::Processed(args) => commands::execute_processed(args, &config, &formatter)?,
        Command::Config(args) => {
            commands::execute_config(args, &config_path, &config, &formatter)?
        }
    }

    Ok(())
}

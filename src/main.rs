//! Rack - barbell plate calculator
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use rack::cli::args::{ConfigAction, ConfigArgs};
use rack::cli::{Cli, Commands};
use rack::config::{Config, ConfigManager};
use rack::error::RackResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RackResult<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::resolve(cli.config.clone());
    // Regenerating the file must work even when the current one is broken
    let config = match (&cli.command, config_manager.load().await) {
        (Commands::Config(ConfigArgs { action: Some(ConfigAction::Init { force: true }) }), Err(_)) => {
            Config::default()
        }
        (_, loaded) => loaded?,
    };

    init_logging(cli.verbose, &config.general.log_format);

    match cli.command {
        Commands::Calc(args) => rack::cli::commands::calc(args, &config).await,
        Commands::Serve(args) => rack::cli::commands::serve(args, &config).await,
        Commands::Config(args) => {
            rack::cli::commands::config(args, &config_manager, &config).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; RUST_LOG wins when set
fn init_logging(verbose: u8, log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("rack=warn"),
        1 => EnvFilter::new("rack=info"),
        _ => EnvFilter::new("rack=debug"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

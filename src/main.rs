//! CTT Downloader - incrementally download telemetry exports.
//!
//! Pulls sensor/unit telemetry export data from the CTT account API and
//! saves it to timestamped CSV files. Each run resumes from the newest
//! local export file, so repeated invocations only fetch new data.
//!
//! QUICK START:
//!   CTT_API_TOKEN=... ctt-downloader            # download new data
//!   ctt-downloader units                        # list account units
//!   ctt-downloader cursor                       # show the next start date
//!   ctt-downloader -v run                       # same, with info logging

mod application;
mod cli;
mod domain;
mod infrastructure;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{format_outcome, format_units_table, DownloadService};
use cli::{Cli, Commands};
use infrastructure::{find_latest_export, load_config, resolve_cursor, CttApiClient};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let config = load_config(cli.data_folder.as_deref())?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(config),
        Commands::Units => cmd_units(&config),
        Commands::Cursor => cmd_cursor(&config),
    }
}

/// Download new export data since the last local export.
fn cmd_run(config: domain::AppConfig) -> domain::Result<()> {
    let outcome = DownloadService::new(config).run()?;

    println!("{}", format_outcome(&outcome));

    Ok(())
}

/// List the units registered to the account.
fn cmd_units(config: &domain::AppConfig) -> domain::Result<()> {
    let client = CttApiClient::new(config.api_token.clone(), config.api_endpoint.clone());
    let units = client.list_units()?;

    println!("{}", format_units_table(&units));
    println!();
    println!("Total: {} unit(s)", units.len());

    Ok(())
}

/// Show the data folder and the cursor the next run would use.
fn cmd_cursor(config: &domain::AppConfig) -> domain::Result<()> {
    let latest = find_latest_export(&config.data_folder)?;
    let cursor = resolve_cursor(&config.data_folder, config.default_begin)?;

    println!("{}", "Export cursor".bold());
    println!();
    println!("  Data folder: {}", config.data_folder.display());
    match latest {
        Some(path) => println!("  Latest file: {}", path.display()),
        None => println!("  Latest file: {}", "none".dimmed()),
    }
    println!(
        "  Next export starts at: {}",
        cursor
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .cyan()
    );

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

//! CLI interface using clap.
//!
//! Invoking the binary with no arguments runs a download pass; the
//! subcommands expose the individual pieces.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CTT Downloader - incrementally download telemetry exports from the CTT
/// account API.
#[derive(Parser, Debug)]
#[command(name = "ctt-downloader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Data folder override (defaults to $CTT_DATA_FOLDER, then "ctt-data").
    #[arg(short, long)]
    pub data_folder: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download new export data since the last local export (the default).
    Run,

    /// List the units registered to the account.
    Units,

    /// Show the data folder and the cursor the next run would use.
    Cursor,
}

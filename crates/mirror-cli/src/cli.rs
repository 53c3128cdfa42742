//! CLI argument parsing using clap derive

use clap::Parser;
use std::path::PathBuf;

/// Folder Mirror - Periodically mirror a source directory into a replica
///
/// Runs forever: every INTERVAL seconds the source and replica trees are
/// re-scanned and the replica is reconciled to match the source. Every
/// change is appended to LOG_FILE and echoed to stdout.
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to mirror from
    pub source: PathBuf,

    /// Directory to mirror into (exclusively written by this process)
    pub replica: PathBuf,

    /// Append-only change log file (must exist)
    pub log_file: PathBuf,

    /// Seconds to pause between cycles
    pub interval: u64,

    /// Run exactly one cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Report what would change without touching the replica (implies --once)
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

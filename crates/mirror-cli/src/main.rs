//! Folder Mirror CLI
//!
//! The command-line launcher for the one-way directory synchronizer.

mod cli;
mod error;

use std::thread;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use mirror_core::{FileJournal, Settings, SyncEngine, SyncOptions};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    // Bad settings are fatal before any cycle runs.
    let settings = Settings::new(&cli.source, &cli.replica, &cli.log_file, cli.interval)?;
    let options = SyncOptions {
        dry_run: cli.dry_run,
    };
    let engine = SyncEngine::from_settings(&settings, options);
    let mut journal = FileJournal::new(settings.log_file.to_native());

    let single_pass = cli.once || cli.dry_run;

    loop {
        match engine.run_cycle(&mut journal) {
            Ok(report) => {
                if cli.dry_run {
                    if report.actions.is_empty() {
                        println!("{} Replica already matches source.", "OK".green().bold());
                    } else {
                        for action in &report.actions {
                            println!("   {} {}", "+".green(), action);
                        }
                    }
                }
                for error in &report.errors {
                    eprintln!("{}: {}", "warn".yellow().bold(), error);
                }
            }
            // A vanished root or unwritable journal aborts the cycle, not
            // the process: the next scheduled cycle is the retry. A single
            // pass has no next cycle, so there the failure is the result.
            Err(e) if single_pass => return Err(e.into()),
            Err(e) => {
                eprintln!("{}: cycle failed: {}", "warn".yellow().bold(), e);
            }
        }

        if single_pass {
            break;
        }
        thread::sleep(settings.interval);
    }

    Ok(())
}

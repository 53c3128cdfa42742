//! Reconciliation engine for Folder Mirror
//!
//! This crate implements the one-way directory synchronization core:
//!
//! - **Journal**: append-only change log, one line per mutation, echoed to
//!   the console
//! - **Settings**: validated runtime configuration (roots, log file, interval)
//! - **SyncEngine**: one full reconciliation pass — directories first, then
//!   files — rebuilding all listings from scratch every cycle
//!
//! # Architecture
//!
//! `mirror-core` sits between the filesystem layer and the CLI:
//!
//! ```text
//!     CLI
//!      |
//! mirror-core
//!      |
//!  mirror-fs
//! ```
//!
//! Each cycle is self-contained: directory and file listings are built
//! fresh, reconciled, and discarded. Nothing carries over between cycles,
//! so staleness cannot accumulate and the next cycle always repairs a
//! partially-failed one.

pub mod error;
pub mod journal;
pub mod settings;
pub mod sync;

pub use error::{Error, Result};
pub use journal::{Action, FileJournal, Journal, MemoryJournal};
pub use settings::Settings;
pub use sync::{CycleReport, DirSyncer, FileSyncer, SyncEngine, SyncOptions};

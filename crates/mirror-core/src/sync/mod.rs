//! Reconciliation pass: directory syncing, file syncing, and the engine
//! that runs them in order.

pub mod dir_syncer;
pub mod engine;
pub mod file_syncer;

pub use dir_syncer::DirSyncer;
pub use engine::{CycleReport, SyncEngine, SyncOptions};
pub use file_syncer::FileSyncer;

//! SyncEngine implementation
//!
//! One engine invocation runs a complete reconciliation pass: directories
//! first, then files, each against listings rebuilt from scratch. The
//! directory phase runs first so every file copy lands under a materialized
//! parent and no file removal targets an orphan mid-tree-deletion.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mirror_fs::{NormalizedPath, walk};

use super::{DirSyncer, FileSyncer};
use crate::journal::Journal;
use crate::settings::Settings;
use crate::Result;

/// Report from one reconciliation cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleReport {
    /// Mutations performed (or, in dry-run, that would be performed)
    pub actions: Vec<String>,
    /// Per-entry failures that were skipped; retried next cycle
    pub errors: Vec<String>,
}

impl CycleReport {
    /// Whether the cycle changed nothing and hit no errors.
    pub fn is_clean(&self) -> bool {
        self.actions.is_empty() && self.errors.is_empty()
    }
}

/// Options for a reconciliation cycle
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, report what would change without touching the replica
    /// or the journal.
    pub dry_run: bool,
}

/// Engine for mirroring the source tree into the replica tree
///
/// Holds only the two roots and the options; all per-cycle state lives in
/// [`SyncEngine::run_cycle`] locals and is discarded when the pass ends.
pub struct SyncEngine {
    source: NormalizedPath,
    replica: NormalizedPath,
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(source: NormalizedPath, replica: NormalizedPath, options: SyncOptions) -> Self {
        Self {
            source,
            replica,
            options,
        }
    }

    pub fn from_settings(settings: &Settings, options: SyncOptions) -> Self {
        Self::new(settings.source.clone(), settings.replica.clone(), options)
    }

    /// Run one full reconciliation pass.
    ///
    /// Listings are taken fresh for each phase; the file listings therefore
    /// already reflect whatever the directory phase deleted, so files under
    /// a removed subtree are never journaled individually.
    ///
    /// # Errors
    ///
    /// Fails if a root vanished since startup ([`mirror_fs::Error::NotFound`])
    /// or if the journal cannot be written. Per-entry filesystem failures do
    /// not fail the cycle; they are collected in the report.
    pub fn run_cycle(&self, journal: &mut dyn Journal) -> Result<CycleReport> {
        let mut report = CycleReport::default();
        let dry_run = self.options.dry_run;

        let source_dirs = walk::list_dirs(&self.source)?;
        let replica_dirs = walk::list_dirs(&self.replica)?;
        debug!(
            source = source_dirs.len(),
            replica = replica_dirs.len(),
            "reconciling directories"
        );
        DirSyncer::new(&self.source, &self.replica, dry_run).reconcile(
            &source_dirs,
            &replica_dirs,
            journal,
            &mut report,
        )?;

        let source_files = walk::list_files(&self.source)?;
        let replica_files = walk::list_files(&self.replica)?;
        debug!(
            source = source_files.len(),
            replica = replica_files.len(),
            "reconciling files"
        );
        FileSyncer::new(&self.source, &self.replica, dry_run).reconcile(
            &source_files,
            &replica_files,
            journal,
            &mut report,
        )?;

        debug!(
            actions = report.actions.len(),
            errors = report.errors.len(),
            "cycle complete"
        );
        Ok(report)
    }
}

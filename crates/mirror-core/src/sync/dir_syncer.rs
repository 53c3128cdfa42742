//! Directory reconciliation
//!
//! Brings the replica's directory tree in line with the source's: missing
//! directories are created, replica-only directories are removed with all
//! their contents. Runs before file reconciliation so file copies always
//! have a materialized parent.

use mirror_fs::{NormalizedPath, io};
use tracing::warn;

use super::engine::CycleReport;
use crate::journal::{Action, Journal};
use crate::Result;

/// Reconciles the replica directory set against the source directory set.
pub struct DirSyncer<'a> {
    source_root: &'a NormalizedPath,
    replica_root: &'a NormalizedPath,
    dry_run: bool,
}

impl<'a> DirSyncer<'a> {
    pub fn new(
        source_root: &'a NormalizedPath,
        replica_root: &'a NormalizedPath,
        dry_run: bool,
    ) -> Self {
        Self {
            source_root,
            replica_root,
            dry_run,
        }
    }

    /// Create missing directories, then remove replica-only ones.
    ///
    /// `source_dirs` must list a directory before its children (the listing
    /// in `mirror_fs::walk` guarantees this), so each creation is a plain
    /// single-level mkdir under an already-existing parent. Every existence
    /// check reads the live filesystem rather than trusting the listings,
    /// tolerating concurrent external changes.
    ///
    /// A failed mutation on one directory is recorded in the report and does
    /// not stop the pass; the next cycle retries it.
    pub fn reconcile(
        &self,
        source_dirs: &[NormalizedPath],
        replica_dirs: &[NormalizedPath],
        journal: &mut dyn Journal,
        report: &mut CycleReport,
    ) -> Result<()> {
        for rel in source_dirs {
            let in_replica = self.replica_root.join(rel.as_str());
            let in_source = self.source_root.join(rel.as_str());

            // in_source re-check guards against the source dir having been
            // deleted after it was listed.
            if !in_replica.exists() && in_source.is_dir() {
                if self.dry_run {
                    report
                        .actions
                        .push(format!("[dry-run] Would create directory {}", in_replica));
                    continue;
                }
                match io::create_dir(&in_replica) {
                    Ok(()) => {
                        journal.emit(Action::Created, in_replica.as_ref())?;
                        report.actions.push(format!("Created directory {}", in_replica));
                    }
                    Err(e) => {
                        warn!(dir = %in_replica, error = %e, "failed to create directory");
                        report.errors.push(format!("create {}: {}", in_replica, e));
                    }
                }
            }
        }

        for rel in replica_dirs {
            let in_replica = self.replica_root.join(rel.as_str());
            let in_source = self.source_root.join(rel.as_str());

            // Descendants of an already-removed directory fail the exists
            // re-check, so a removed subtree journals exactly one entry.
            if in_replica.exists() && !in_source.exists() {
                if self.dry_run {
                    report
                        .actions
                        .push(format!("[dry-run] Would remove directory {}", in_replica));
                    continue;
                }
                match io::remove_dir_all(&in_replica) {
                    Ok(()) => {
                        journal.emit(Action::Removed, in_replica.as_ref())?;
                        report.actions.push(format!("Removed directory {}", in_replica));
                    }
                    Err(e) => {
                        warn!(dir = %in_replica, error = %e, "failed to remove directory");
                        report.errors.push(format!("remove {}: {}", in_replica, e));
                    }
                }
            }
        }

        Ok(())
    }
}

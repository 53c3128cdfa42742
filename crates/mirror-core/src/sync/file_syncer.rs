//! File reconciliation
//!
//! Brings replica files in line with source files: missing files are
//! copied in, files present on both sides are digest-compared and replaced
//! on mismatch, replica-only files are deleted. Digest equality is the sole
//! modification criterion; timestamps and permissions never trigger a copy.
//!
//! Per-file read or write failures are skip-and-continue: the failure is
//! logged, recorded in the cycle report, and the file is retried on the
//! next cycle. A source file vanishing between listing and use is a benign
//! race and is skipped silently.

use mirror_fs::{NormalizedPath, checksum, io};
use tracing::{debug, warn};

use super::engine::CycleReport;
use crate::journal::{Action, Journal};
use crate::Result;

/// Reconciles the replica file set against the source file set.
pub struct FileSyncer<'a> {
    source_root: &'a NormalizedPath,
    replica_root: &'a NormalizedPath,
    dry_run: bool,
}

impl<'a> FileSyncer<'a> {
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

    /// Copy new and changed files, then delete replica-only files.
    ///
    /// Existence is re-verified against the live filesystem immediately
    /// before each mutating action; the listings only drive iteration.
    pub fn reconcile(
        &self,
        source_files: &[NormalizedPath],
        replica_files: &[NormalizedPath],
        journal: &mut dyn Journal,
        report: &mut CycleReport,
    ) -> Result<()> {
        for rel in source_files {
            let in_source = self.source_root.join(rel.as_str());
            let in_replica = self.replica_root.join(rel.as_str());

            if !in_replica.exists() && in_source.exists() {
                self.copy_new(&in_source, &in_replica, journal, report)?;
            } else if in_replica.exists() && in_source.exists() {
                self.replace_if_changed(&in_source, &in_replica, journal, report)?;
            }
        }

        for rel in replica_files {
            let in_source = self.source_root.join(rel.as_str());
            let in_replica = self.replica_root.join(rel.as_str());

            if in_replica.exists() && !in_source.exists() {
                if self.dry_run {
                    report
                        .actions
                        .push(format!("[dry-run] Would remove {}", in_replica));
                    continue;
                }
                match io::remove_file(&in_replica) {
                    Ok(()) => {
                        journal.emit(Action::Removed, in_replica.as_ref())?;
                        report.actions.push(format!("Removed {}", in_replica));
                    }
                    Err(e) => {
                        warn!(file = %in_replica, error = %e, "failed to remove file");
                        report.errors.push(format!("remove {}: {}", in_replica, e));
                    }
                }
            }
        }

        Ok(())
    }

    fn copy_new(
        &self,
        in_source: &NormalizedPath,
        in_replica: &NormalizedPath,
        journal: &mut dyn Journal,
        report: &mut CycleReport,
    ) -> Result<()> {
        if self.dry_run {
            report
                .actions
                .push(format!("[dry-run] Would copy {}", in_replica));
            return Ok(());
        }
        match io::copy_file(in_source, in_replica) {
            Ok(_) => {
                journal.emit(Action::Created, in_replica.as_ref())?;
                report.actions.push(format!("Copied {}", in_replica));
            }
            Err(e) if e.is_not_found() => {
                // Source deleted mid-cycle: nothing to mirror anymore.
                debug!(file = %in_source, "source vanished during copy, skipping");
            }
            Err(e) => {
                warn!(file = %in_source, error = %e, "failed to copy file");
                report.errors.push(format!("copy {}: {}", in_source, e));
            }
        }
        Ok(())
    }

    fn replace_if_changed(
        &self,
        in_source: &NormalizedPath,
        in_replica: &NormalizedPath,
        journal: &mut dyn Journal,
        report: &mut CycleReport,
    ) -> Result<()> {
        let source_digest = match checksum::digest_file(in_source.as_ref()) {
            Ok(digest) => digest,
            Err(e) if e.is_not_found() => {
                debug!(file = %in_source, "source vanished during hashing, skipping");
                return Ok(());
            }
            Err(e) => {
                warn!(file = %in_source, error = %e, "failed to hash source file");
                report.errors.push(format!("hash {}: {}", in_source, e));
                return Ok(());
            }
        };
        let replica_digest = match checksum::digest_file(in_replica.as_ref()) {
            Ok(digest) => digest,
            Err(e) => {
                warn!(file = %in_replica, error = %e, "failed to hash replica file");
                report.errors.push(format!("hash {}: {}", in_replica, e));
                return Ok(());
            }
        };

        if source_digest == replica_digest {
            return Ok(());
        }

        if self.dry_run {
            report
                .actions
                .push(format!("[dry-run] Would replace {}", in_replica));
            return Ok(());
        }

        // Drop the stale copy first so a failed copy cannot leave a file
        // that looks current but has old content under a fresh mtime.
        let replaced = io::remove_file(in_replica).and_then(|()| io::copy_file(in_source, in_replica));
        match replaced {
            Ok(_) => {
                journal.emit(Action::Modified, in_replica.as_ref())?;
                report.actions.push(format!("Replaced {}", in_replica));
            }
            Err(e) if e.is_not_found() => {
                debug!(file = %in_source, "source vanished during replace, skipping");
            }
            Err(e) => {
                warn!(file = %in_replica, error = %e, "failed to replace file");
                report.errors.push(format!("replace {}: {}", in_replica, e));
            }
        }
        Ok(())
    }
}

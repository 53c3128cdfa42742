//! Append-only change journal
//!
//! Every mutation the reconciler performs is recorded exactly once: a
//! timestamped line appended to the log file and echoed to stdout. No-op
//! comparisons are never journaled. The file is never rewritten or
//! truncated by this system.
//!
//! Line format: `<DD/Mon/YYYY HH:MM:SS> [ <ACTION> ] <absolute-path>`

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::{Error, Result};

/// What happened to a replica entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Modified,
    Removed,
}

impl Action {
    /// The journal tag for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Created => "CREATED",
            Action::Modified => "MODIFIED",
            Action::Removed => "REMOVED",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for change records.
///
/// The reconcilers call [`Journal::emit`] exactly once per performed
/// mutation. Implementations decide where the record goes.
pub trait Journal {
    fn emit(&mut self, action: Action, path: &Path) -> Result<()>;
}

/// Journal backed by an append-only log file, echoing each line to stdout.
pub struct FileJournal {
    log_path: PathBuf,
}

impl FileJournal {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    fn format_line(action: Action, path: &Path) -> String {
        let timestamp = Local::now().format("%d/%b/%Y %H:%M:%S");
        format!("{} [ {} ] {}", timestamp, action, path.display())
    }
}

impl Journal for FileJournal {
    fn emit(&mut self, action: Action, path: &Path) -> Result<()> {
        let line = Self::format_line(action, path);
        println!("{}", line);

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.log_path)
            .map_err(|e| Error::Journal {
                path: self.log_path.clone(),
                source: e,
            })?;
        writeln!(file, "{}", line).map_err(|e| Error::Journal {
            path: self.log_path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

/// In-memory journal for tests.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    pub entries: Vec<(Action, PathBuf)>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count entries recorded for a given action.
    pub fn count(&self, action: Action) -> usize {
        self.entries.iter().filter(|(a, _)| *a == action).count()
    }
}

impl Journal for MemoryJournal {
    fn emit(&mut self, action: Action, path: &Path) -> Result<()> {
        self.entries.push((action, path.to_path_buf()));
        Ok(())
    }
}

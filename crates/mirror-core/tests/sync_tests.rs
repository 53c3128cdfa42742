//! End-to-end cycle tests against real directory trees.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use mirror_core::{Action, FileJournal, MemoryJournal, SyncEngine, SyncOptions};
use mirror_fs::{NormalizedPath, checksum};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;

struct Fixture {
    temp: TempDir,
    engine: SyncEngine,
}

impl Fixture {
    fn new() -> Self {
        Self::with_options(SyncOptions::default())
    }

    fn with_options(options: SyncOptions) -> Self {
        let temp = TempDir::new().unwrap();
        temp.child("source").create_dir_all().unwrap();
        temp.child("replica").create_dir_all().unwrap();
        let engine = SyncEngine::new(
            NormalizedPath::new(temp.child("source").path()),
            NormalizedPath::new(temp.child("replica").path()),
            options,
        );
        Self { temp, engine }
    }

    fn source(&self) -> assert_fs::fixture::ChildPath {
        self.temp.child("source")
    }

    fn replica(&self) -> assert_fs::fixture::ChildPath {
        self.temp.child("replica")
    }
}

#[test]
fn scenario_new_file_in_new_directory() {
    let fx = Fixture::new();
    fx.source().child("docs/readme.txt").write_str("v1").unwrap();

    let mut journal = MemoryJournal::new();
    fx.engine.run_cycle(&mut journal).unwrap();

    fx.replica().child("docs").assert(predicate::path::is_dir());
    fx.replica().child("docs/readme.txt").assert("v1");
    assert_eq!(journal.count(Action::Created), 2);
    assert_eq!(journal.entries.len(), 2);
}

#[test]
fn scenario_content_change_logs_one_modified() {
    let fx = Fixture::new();
    fx.source().child("readme.txt").write_str("v1").unwrap();

    let mut journal = MemoryJournal::new();
    fx.engine.run_cycle(&mut journal).unwrap();

    fx.source().child("readme.txt").write_str("v2").unwrap();
    let mut journal = MemoryJournal::new();
    fx.engine.run_cycle(&mut journal).unwrap();

    fx.replica().child("readme.txt").assert("v2");
    assert_eq!(journal.count(Action::Modified), 1);
    assert_eq!(journal.entries.len(), 1);
}

#[test]
fn scenario_replica_only_file_removed_once() {
    let fx = Fixture::new();
    fx.replica().child("stale.txt").write_str("x").unwrap();

    let mut journal = MemoryJournal::new();
    fx.engine.run_cycle(&mut journal).unwrap();

    fx.replica()
        .child("stale.txt")
        .assert(predicate::path::missing());
    assert_eq!(journal.count(Action::Removed), 1);
    assert_eq!(journal.entries.len(), 1);
}

#[test]
fn convergence_of_arbitrary_trees() {
    let fx = Fixture::new();
    fx.source().child("a/b/c/deep.txt").write_str("deep").unwrap();
    fx.source().child("a/top.txt").write_str("top").unwrap();
    fx.source().child("root.txt").write_str("root").unwrap();
    fx.replica().child("gone/inner/old.txt").write_str("old").unwrap();
    fx.replica().child("root.txt").write_str("different").unwrap();

    let mut journal = MemoryJournal::new();
    fx.engine.run_cycle(&mut journal).unwrap();

    // Replica matches source by relative path and content digest.
    for rel in ["a/b/c/deep.txt", "a/top.txt", "root.txt"] {
        let source_digest = checksum::digest_file(fx.source().child(rel).path()).unwrap();
        let replica_digest = checksum::digest_file(fx.replica().child(rel).path()).unwrap();
        assert_eq!(source_digest, replica_digest, "digest mismatch for {}", rel);
    }
    fx.replica().child("gone").assert(predicate::path::missing());
}

#[test]
fn second_cycle_is_idempotent() {
    let fx = Fixture::new();
    fx.source().child("a/b/file.txt").write_str("content").unwrap();
    fx.replica().child("junk.txt").write_str("junk").unwrap();

    let mut journal = MemoryJournal::new();
    fx.engine.run_cycle(&mut journal).unwrap();
    assert!(!journal.entries.is_empty());

    let mut journal = MemoryJournal::new();
    let report = fx.engine.run_cycle(&mut journal).unwrap();

    assert!(journal.entries.is_empty());
    assert!(report.is_clean());
}

#[test]
fn deep_creation_succeeds_in_one_cycle() {
    let fx = Fixture::new();
    fx.source().child("a/b/c/file.txt").write_str("x").unwrap();

    let mut journal = MemoryJournal::new();
    let report = fx.engine.run_cycle(&mut journal).unwrap();

    fx.replica().child("a/b/c/file.txt").assert("x");
    assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
}

#[test]
fn removed_subtree_files_are_not_journaled_individually() {
    let fx = Fixture::new();
    fx.replica().child("old/one.txt").write_str("1").unwrap();
    fx.replica().child("old/two.txt").write_str("2").unwrap();
    fx.replica().child("old/nested/three.txt").write_str("3").unwrap();

    let mut journal = MemoryJournal::new();
    fx.engine.run_cycle(&mut journal).unwrap();

    // One entry for old/; its files vanished before the file phase listed.
    assert_eq!(journal.entries.len(), 1);
    assert_eq!(journal.count(Action::Removed), 1);
}

#[test]
fn vanished_source_root_aborts_cycle_cleanly() {
    let fx = Fixture::new();
    fs::remove_dir_all(fx.source().path()).unwrap();

    let mut journal = MemoryJournal::new();
    let result = fx.engine.run_cycle(&mut journal);

    assert!(result.is_err());
    assert!(journal.entries.is_empty());
}

#[cfg(unix)]
#[test]
fn symlinks_are_never_materialized() {
    let fx = Fixture::new();
    fx.source().child("real.txt").write_str("real").unwrap();
    std::os::unix::fs::symlink(
        fx.source().child("real.txt").path(),
        fx.source().path().join("link.txt"),
    )
    .unwrap();

    let mut journal = MemoryJournal::new();
    fx.engine.run_cycle(&mut journal).unwrap();

    fx.replica().child("real.txt").assert("real");
    fx.replica()
        .child("link.txt")
        .assert(predicate::path::missing());
}

#[test]
fn dry_run_cycle_mutates_nothing() {
    let fx = Fixture::with_options(SyncOptions { dry_run: true });
    fx.source().child("docs/readme.txt").write_str("v1").unwrap();
    fx.replica().child("stale.txt").write_str("s").unwrap();

    let mut journal = MemoryJournal::new();
    let report = fx.engine.run_cycle(&mut journal).unwrap();

    fx.replica().child("docs").assert(predicate::path::missing());
    fx.replica().child("stale.txt").assert("s");
    assert!(journal.entries.is_empty());
    assert!(report.actions.iter().all(|a| a.starts_with("[dry-run]")));
    assert!(!report.actions.is_empty());
}

#[test]
fn file_journal_records_absolute_paths() {
    let fx = Fixture::new();
    fx.source().child("docs/readme.txt").write_str("v1").unwrap();
    let log_path = fx.temp.child("sync.log");
    log_path.touch().unwrap();

    let mut journal = FileJournal::new(log_path.path());
    fx.engine.run_cycle(&mut journal).unwrap();

    let content = fs::read_to_string(log_path.path()).unwrap();
    assert_eq!(content.lines().count(), 2);
    let expected = fx.replica().child("docs/readme.txt").path().display().to_string();
    assert!(
        predicate::str::contains(&expected).eval(&content),
        "log should name the absolute replica path, got:\n{}",
        content
    );
    assert!(predicate::str::contains("[ CREATED ]").eval(&content));
}

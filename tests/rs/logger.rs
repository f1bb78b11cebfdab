//! Integration tests for logger behavior.

use grade_tracker::logger::{init_file_logging, set_level, set_level_from_str, Level};
use grade_tracker::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn file_logging_creates_parent_dirs() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("logs").join("gradetracker.log");
    assert!(init_file_logging(&path), "file sink should open");
    error!("file sink integration");
    let content = std::fs::read_to_string(&path).expect("log file should exist");
    assert!(content.contains("[ERROR] file sink integration"));
}

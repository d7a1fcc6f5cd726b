//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get an inspectflow command
pub fn inspectflow() -> Command {
    Command::new(cargo::cargo_bin!("inspectflow"))
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    inspectflow()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Helper to create a test order with a known id (inspector role)
pub fn create_test_order(tmp: &TempDir, id: &str, part_number: &str, thread: &str) {
    inspectflow()
        .current_dir(tmp.path())
        .args([
            "order",
            "new",
            "--role",
            "inspector",
            "--id",
            id,
            "--part-number",
            part_number,
            "--thread",
            thread,
        ])
        .assert()
        .success();
}

/// Helper to add a test gauge with a known id, expiring in `expires_in_days`
pub fn create_test_gauge(tmp: &TempDir, id: &str, name: &str, expires_in_days: i64) {
    let expires = format!("--expires-in-days={}", expires_in_days);
    inspectflow()
        .current_dir(tmp.path())
        .args([
            "gauge",
            "add",
            "--id",
            id,
            "--name",
            name,
            "--type",
            "plug",
            expires.as_str(),
        ])
        .assert()
        .success();
}

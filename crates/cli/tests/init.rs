// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[test]
fn creates_work_dir() {
    let temp = TempDir::new().unwrap();

    costq()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized cost database"))
        .stdout(predicate::str::contains("User: anonymous"));

    assert!(temp.path().join(".costq").exists());
    assert!(temp.path().join(".costq/config.toml").exists());
    assert!(temp.path().join(".costq/costs.db").exists());
}

#[test]
fn fails_if_already_initialized() {
    let temp = init_temp();

    costq()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: already initialized"));
}

#[test]
fn custom_database_path() {
    let temp = TempDir::new().unwrap();

    costq()
        .args(["init", "--database", "data/costs.db"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("data/costs.db").exists());
    let config = std::fs::read_to_string(temp.path().join(".costq/config.toml")).unwrap();
    assert!(config.contains("data/costs.db"));
}

#[test]
fn commands_need_initialization() {
    let temp = TempDir::new().unwrap();

    costq()
        .arg("report")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized: run 'costq init' first"));
}

#[test]
fn work_dir_is_found_from_subdirectories() {
    let temp = init_temp();
    let nested = temp.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();

    costq()
        .arg("report")
        .current_dir(&nested)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 entries, total costs 0.00"));
}

#[test]
fn directory_flag_changes_working_directory() {
    let temp = init_temp();
    let elsewhere = TempDir::new().unwrap();

    costq()
        .args(["-C", temp.path().to_str().unwrap(), "report"])
        .current_dir(elsewhere.path())
        .assert()
        .success();

    costq()
        .args(["-C", "/definitely/not/here", "report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot change to directory"));
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::output;
use crate::config::{CONFIG_FILE_NAME, DB_FILE_NAME, WORK_DIR_NAME};
use crate::error::Error;
use tempfile::TempDir;

#[test]
fn creates_config_and_database() {
    let temp = TempDir::new().unwrap();
    let mut buf = Vec::new();
    run_impl(temp.path(), None, Some("alice".into()), &mut buf).unwrap();

    let work_dir = temp.path().join(WORK_DIR_NAME);
    assert!(work_dir.join(CONFIG_FILE_NAME).exists());
    assert!(work_dir.join(DB_FILE_NAME).exists());
    let config = Config::load(&work_dir).unwrap();
    assert_eq!(config.user.as_deref(), Some("alice"));

    let text = output(buf);
    assert!(text.starts_with("Initialized cost database at"));
    assert!(text.contains("User: alice"));
}

#[test]
fn custom_database_location() {
    let temp = TempDir::new().unwrap();
    let mut buf = Vec::new();
    run_impl(temp.path(), Some("data/costs.db".into()), None, &mut buf).unwrap();

    assert!(temp.path().join("data/costs.db").exists());
    assert!(!temp.path().join(WORK_DIR_NAME).join(DB_FILE_NAME).exists());
    assert!(output(buf).contains("User: anonymous"));
}

#[test]
fn refuses_to_reinitialize() {
    let temp = TempDir::new().unwrap();
    run_impl(temp.path(), None, None, &mut Vec::new()).unwrap();
    let err = run_impl(temp.path(), None, None, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::AlreadyInitialized(_)));
}

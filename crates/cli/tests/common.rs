// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn costq() -> Command {
    let mut cmd = cargo_bin_cmd!("costq");
    cmd.env_remove("COSTQ_USER").env("NO_COLOR", "1");
    cmd
}

/// Two projects, two issues (one closed), two custom fields and four
/// entries spread over January 2013 and December 2012.
///
/// | kind | project | user | issue | spent_on   | real costs |
/// |------|---------|------|-------|------------|------------|
/// | time | 1       | 1    | 1     | 2013-01-14 | 100        |
/// | time | 2       | 2    | 2     | 2013-01-15 | 80 (over.) |
/// | cost | 1       | 1    | -     | 2013-01-16 | 30         |
/// | cost | 2       | 2    | 2     | 2012-12-01 | -          |
pub const FIXTURE: &str = r#"{
  "projects": [{ "id": 1, "name": "Apollo" }, { "id": 2, "name": "Gemini" }],
  "users": [
    { "id": 1, "login": "alice", "name": "Alice" },
    { "id": 2, "login": "bob", "name": "Bob" },
    { "id": 3, "login": "", "name": "Anonymous", "anonymous": true }
  ],
  "statuses": [{ "id": 1, "name": "New" }, { "id": 2, "name": "Closed", "is_closed": true }],
  "trackers": [{ "id": 1, "name": "Bug" }],
  "priorities": [{ "id": 1, "name": "Normal" }],
  "activities": [{ "id": 1, "name": "Design" }],
  "cost_types": [{ "id": 1, "name": "Hardware" }],
  "issues": [
    { "id": 1, "project_id": 1, "tracker_id": 1, "status_id": 1, "priority_id": 1,
      "author_id": 1, "subject": "Fix widget" },
    { "id": 2, "project_id": 2, "tracker_id": 1, "status_id": 2, "priority_id": 1,
      "author_id": 2, "subject": "Ship gadget" }
  ],
  "custom_fields": [
    { "id": 1, "name": "Size", "format": "int" },
    { "id": 2, "name": "Phase", "format": "list", "possible_values": ["alpha", "beta"] }
  ],
  "custom_values": [
    { "custom_field_id": 1, "issue_id": 1, "value": "3" },
    { "custom_field_id": 1, "issue_id": 2, "value": "8" },
    { "custom_field_id": 2, "issue_id": 1, "value": "alpha" }
  ],
  "time_entries": [
    { "project_id": 1, "user_id": 1, "activity_id": 1, "hours": 2.0,
      "spent_on": "2013-01-14", "issue_id": 1, "costs": 100.0 },
    { "project_id": 2, "user_id": 2, "activity_id": 1, "hours": 1.0,
      "spent_on": "2013-01-15", "issue_id": 2, "costs": 50.0, "overridden_costs": 80.0 }
  ],
  "cost_entries": [
    { "project_id": 1, "user_id": 1, "cost_type_id": 1, "units": 3.0,
      "spent_on": "2013-01-16", "costs": 30.0 },
    { "project_id": 2, "user_id": 2, "cost_type_id": 1, "units": 1.0,
      "spent_on": "2012-12-01", "issue_id": 2 }
  ]
}"#;

/// Helper to create an initialized temp directory acting as `alice`.
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    costq()
        .args(["init", "--user", "alice"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

pub fn write_file(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Initialized directory with [`FIXTURE`] imported.
pub fn init_with_data() -> TempDir {
    let temp = init_temp();
    write_file(&temp, "data.json", FIXTURE);
    costq()
        .args(["import", "data.json"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Runs `costq report -o json` with the given filter expressions.
pub fn report_json(temp: &TempDir, filters: &[&str]) -> serde_json::Value {
    let mut cmd = costq();
    cmd.arg("report").args(["-o", "json"]).current_dir(temp.path());
    for filter in filters {
        cmd.args(["-f", filter]);
    }
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "report failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

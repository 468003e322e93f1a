// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Records referenced by entries, and the fixture format used to load them.
//!
//! Every record carries an `id`; `0` means "let the database assign one".

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::custom_field::CustomField;
use crate::entry::{CostEntry, TimeEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            id: 0,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub login: String,
    pub name: String,
    /// The built-in anonymous user.
    #[serde(default)]
    pub anonymous: bool,
}

impl User {
    pub fn new(login: impl Into<String>, name: impl Into<String>) -> Self {
        User {
            id: 0,
            login: login.into(),
            name: name.into(),
            anonymous: false,
        }
    }

    pub fn anonymous() -> Self {
        User {
            anonymous: true,
            ..User::new("", "Anonymous")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStatus {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_closed: bool,
}

impl IssueStatus {
    pub fn new(name: impl Into<String>, is_closed: bool) -> Self {
        IssueStatus {
            id: 0,
            name: name.into(),
            is_closed,
        }
    }
}

/// A plain named record: tracker, priority, activity or cost type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl Named {
    pub fn new(name: impl Into<String>) -> Self {
        Named {
            id: 0,
            name: name.into(),
        }
    }
}

/// A named record scoped to a project: issue category or version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectScoped {
    #[serde(default)]
    pub id: i64,
    pub project_id: i64,
    pub name: String,
}

impl ProjectScoped {
    pub fn new(project_id: i64, name: impl Into<String>) -> Self {
        ProjectScoped {
            id: 0,
            project_id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub id: i64,
    pub project_id: i64,
    pub tracker_id: i64,
    pub status_id: i64,
    pub priority_id: i64,
    pub author_id: i64,
    #[serde(default)]
    pub assigned_to_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub fixed_version_id: Option<i64>,
    pub subject: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "Utc::now")]
    pub created_on: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_on: DateTime<Utc>,
}

impl Issue {
    /// Creates an unsaved, unassigned issue.
    pub fn new(
        project_id: i64,
        tracker_id: i64,
        status_id: i64,
        priority_id: i64,
        author_id: i64,
        subject: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Issue {
            id: 0,
            project_id,
            tracker_id,
            status_id,
            priority_id,
            author_id,
            assigned_to_id: None,
            category_id: None,
            fixed_version_id: None,
            subject: subject.into(),
            start_date: None,
            due_date: None,
            created_on: now,
            updated_on: now,
        }
    }
}

/// A custom value of one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomValue {
    pub custom_field_id: i64,
    pub issue_id: i64,
    pub value: String,
}

/// A complete dataset, loaded in dependency order by
/// [`crate::Database::import`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
    pub statuses: Vec<IssueStatus>,
    pub trackers: Vec<Named>,
    pub priorities: Vec<Named>,
    pub activities: Vec<Named>,
    pub cost_types: Vec<Named>,
    pub categories: Vec<ProjectScoped>,
    pub versions: Vec<ProjectScoped>,
    pub issues: Vec<Issue>,
    pub custom_fields: Vec<CustomField>,
    pub custom_values: Vec<CustomValue>,
    pub time_entries: Vec<TimeEntry>,
    pub cost_entries: Vec<CostEntry>,
}

/// Number of records loaded per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub records: usize,
    pub custom_fields: usize,
    pub time_entries: usize,
    pub cost_entries: usize,
}

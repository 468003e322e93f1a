// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time entries, cost entries and the merged entry row.
//!
//! The store yields [`RawEntry`] values, a tagged union over the two record
//! kinds joined with their issue. [`RawEntry::normalize`] projects either
//! kind onto the common [`Entry`] shape:
//!
//! - time entries get `cost_type_id = -1` and the "Labor" cost type;
//! - cost entries get `activity_id = -1` and the name of their cost type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::Value;

/// Placeholder id for fields an entry kind does not have.
pub const NONE_ID: i64 = -1;

/// Cost type name given to time entries.
pub const LABOR_COST_TYPE: &str = "Labor";

/// The record kind an entry was merged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    TimeEntry,
    CostEntry,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::TimeEntry => "TimeEntry",
            EntryKind::CostEntry => "CostEntry",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hours logged by a user, optionally against an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Database-assigned identifier (0 until stored).
    #[serde(default)]
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub issue_id: Option<i64>,
    pub activity_id: i64,
    pub hours: f64,
    pub spent_on: NaiveDate,
    /// Manually set costs replacing the computed ones.
    #[serde(default)]
    pub overridden_costs: Option<f64>,
    #[serde(default)]
    pub costs: Option<f64>,
    #[serde(default = "Utc::now")]
    pub created_on: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_on: DateTime<Utc>,
}

impl TimeEntry {
    /// Creates an unsaved time entry stamped with the current time.
    pub fn new(
        project_id: i64,
        user_id: i64,
        activity_id: i64,
        hours: f64,
        spent_on: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        TimeEntry {
            id: 0,
            project_id,
            user_id,
            issue_id: None,
            activity_id,
            hours,
            spent_on,
            overridden_costs: None,
            costs: None,
            created_on: now,
            updated_on: now,
        }
    }

    /// Books this entry against an issue (builder pattern).
    pub fn with_issue(mut self, issue_id: i64) -> Self {
        self.issue_id = Some(issue_id);
        self
    }

    /// Sets computed and overridden costs (builder pattern).
    pub fn with_costs(mut self, costs: Option<f64>, overridden: Option<f64>) -> Self {
        self.costs = costs;
        self.overridden_costs = overridden;
        self
    }

    /// Sets specific creation and update timestamps.
    pub fn with_timestamps(mut self, created_on: DateTime<Utc>, updated_on: DateTime<Utc>) -> Self {
        self.created_on = created_on;
        self.updated_on = updated_on;
        self
    }
}

/// Units of a cost type consumed by a user, optionally against an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    /// Database-assigned identifier (0 until stored).
    #[serde(default)]
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub issue_id: Option<i64>,
    pub cost_type_id: i64,
    pub units: f64,
    pub spent_on: NaiveDate,
    #[serde(default)]
    pub overridden_costs: Option<f64>,
    #[serde(default)]
    pub costs: Option<f64>,
    #[serde(default = "Utc::now")]
    pub created_on: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_on: DateTime<Utc>,
}

impl CostEntry {
    /// Creates an unsaved cost entry stamped with the current time.
    pub fn new(
        project_id: i64,
        user_id: i64,
        cost_type_id: i64,
        units: f64,
        spent_on: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        CostEntry {
            id: 0,
            project_id,
            user_id,
            issue_id: None,
            cost_type_id,
            units,
            spent_on,
            overridden_costs: None,
            costs: None,
            created_on: now,
            updated_on: now,
        }
    }

    /// Books this entry against an issue (builder pattern).
    pub fn with_issue(mut self, issue_id: i64) -> Self {
        self.issue_id = Some(issue_id);
        self
    }

    /// Sets computed and overridden costs (builder pattern).
    pub fn with_costs(mut self, costs: Option<f64>, overridden: Option<f64>) -> Self {
        self.costs = costs;
        self.overridden_costs = overridden;
        self
    }

    /// Sets specific creation and update timestamps.
    pub fn with_timestamps(mut self, created_on: DateTime<Utc>, updated_on: DateTime<Utc>) -> Self {
        self.created_on = created_on;
        self.updated_on = updated_on;
        self
    }
}

/// Issue attributes joined onto an entry booked against an issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueFields {
    pub id: i64,
    pub author_id: i64,
    pub status_id: i64,
    /// Whether the issue's status counts as closed.
    pub status_closed: bool,
    pub tracker_id: i64,
    pub priority_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_version_id: Option<i64>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Raw custom values keyed by custom field id.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_values: BTreeMap<i64, String>,
}

/// A stored record before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEntry {
    Time {
        entry: TimeEntry,
        issue: Option<IssueFields>,
    },
    Cost {
        entry: CostEntry,
        /// Name of the joined cost type, `None` if it does not resolve.
        cost_type: Option<String>,
        issue: Option<IssueFields>,
    },
}

impl RawEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            RawEntry::Time { .. } => EntryKind::TimeEntry,
            RawEntry::Cost { .. } => EntryKind::CostEntry,
        }
    }

    /// Project onto the common entry shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptedData`] for a cost entry whose cost type does
    /// not resolve, since every entry must carry a cost type.
    pub fn normalize(self) -> Result<Entry> {
        match self {
            RawEntry::Time { entry, issue } => Ok(Entry {
                kind: EntryKind::TimeEntry,
                id: entry.id,
                project_id: entry.project_id,
                user_id: entry.user_id,
                issue_id: entry.issue_id,
                cost_type_id: NONE_ID,
                cost_type: LABOR_COST_TYPE.to_string(),
                activity_id: entry.activity_id,
                units: entry.hours,
                spent_on: entry.spent_on,
                created_on: entry.created_on,
                updated_on: entry.updated_on,
                overridden_costs: entry.overridden_costs,
                costs: entry.costs,
                issue,
            }),
            RawEntry::Cost {
                entry,
                cost_type,
                issue,
            } => {
                let cost_type = cost_type.ok_or_else(|| {
                    Error::CorruptedData(format!(
                        "cost entry {} references missing cost type {}",
                        entry.id, entry.cost_type_id
                    ))
                })?;
                Ok(Entry {
                    kind: EntryKind::CostEntry,
                    id: entry.id,
                    project_id: entry.project_id,
                    user_id: entry.user_id,
                    issue_id: entry.issue_id,
                    cost_type_id: entry.cost_type_id,
                    cost_type,
                    activity_id: NONE_ID,
                    units: entry.units,
                    spent_on: entry.spent_on,
                    created_on: entry.created_on,
                    updated_on: entry.updated_on,
                    overridden_costs: entry.overridden_costs,
                    costs: entry.costs,
                    issue,
                })
            }
        }
    }
}

/// A normalized row of the merged entries dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub issue_id: Option<i64>,
    pub cost_type_id: i64,
    pub cost_type: String,
    /// `-1` unless this is a time entry.
    pub activity_id: i64,
    /// Hours for time entries, cost type units for cost entries.
    pub units: f64,
    pub spent_on: NaiveDate,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub overridden_costs: Option<f64>,
    pub costs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueFields>,
}

impl Entry {
    /// Author of the issue this entry is booked against.
    pub fn author_id(&self) -> Option<i64> {
        self.issue.as_ref().map(|i| i.author_id)
    }

    /// Overridden costs if set, else computed costs.
    pub fn real_costs(&self) -> Option<f64> {
        self.overridden_costs.or(self.costs)
    }

    /// Raw custom value of the entry's issue.
    pub fn custom_value(&self, custom_field_id: i64) -> Option<&str> {
        self.issue
            .as_ref()
            .and_then(|i| i.custom_values.get(&custom_field_id))
            .map(String::as_str)
    }

    /// Project a fixed column.
    pub fn field(&self, field: EntryField) -> Value {
        let issue = self.issue.as_ref();
        match field {
            EntryField::ProjectId => Value::Id(self.project_id),
            EntryField::UserId => Value::Id(self.user_id),
            EntryField::AuthorId => Value::id(self.author_id()),
            EntryField::CostTypeId => Value::Id(self.cost_type_id),
            EntryField::IssueId => Value::id(self.issue_id),
            EntryField::ActivityId => Value::Id(self.activity_id),
            EntryField::SpentOn => Value::Date(self.spent_on),
            EntryField::CreatedOn => Value::Timestamp(self.created_on),
            EntryField::UpdatedOn => Value::Timestamp(self.updated_on),
            EntryField::OverriddenCosts => self.overridden_costs.map_or(Value::Null, Value::Decimal),
            EntryField::StatusId => issue.map_or(Value::Null, |i| Value::Status {
                id: i.status_id,
                closed: i.status_closed,
            }),
            EntryField::TrackerId => Value::id(issue.map(|i| i.tracker_id)),
            EntryField::PriorityId => Value::id(issue.map(|i| i.priority_id)),
            EntryField::AssignedToId => Value::id(issue.and_then(|i| i.assigned_to_id)),
            EntryField::CategoryId => Value::id(issue.and_then(|i| i.category_id)),
            EntryField::FixedVersionId => Value::id(issue.and_then(|i| i.fixed_version_id)),
            EntryField::Subject => issue.map_or(Value::Null, |i| Value::Text(i.subject.clone())),
            EntryField::StartDate => Value::date(issue.and_then(|i| i.start_date)),
            EntryField::DueDate => Value::date(issue.and_then(|i| i.due_date)),
        }
    }
}

/// Fixed columns of the merged entries dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    ProjectId,
    UserId,
    AuthorId,
    CostTypeId,
    IssueId,
    ActivityId,
    SpentOn,
    CreatedOn,
    UpdatedOn,
    OverriddenCosts,
    StatusId,
    TrackerId,
    PriorityId,
    AssignedToId,
    CategoryId,
    FixedVersionId,
    Subject,
    StartDate,
    DueDate,
}

impl EntryField {
    /// Every column, in display order.
    pub const ALL: [EntryField; 19] = [
        EntryField::ProjectId,
        EntryField::UserId,
        EntryField::AuthorId,
        EntryField::CostTypeId,
        EntryField::IssueId,
        EntryField::ActivityId,
        EntryField::SpentOn,
        EntryField::CreatedOn,
        EntryField::UpdatedOn,
        EntryField::OverriddenCosts,
        EntryField::StatusId,
        EntryField::TrackerId,
        EntryField::PriorityId,
        EntryField::AssignedToId,
        EntryField::CategoryId,
        EntryField::FixedVersionId,
        EntryField::Subject,
        EntryField::StartDate,
        EntryField::DueDate,
    ];

    /// Column name, which is also the filter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::ProjectId => "project_id",
            EntryField::UserId => "user_id",
            EntryField::AuthorId => "author_id",
            EntryField::CostTypeId => "cost_type_id",
            EntryField::IssueId => "issue_id",
            EntryField::ActivityId => "activity_id",
            EntryField::SpentOn => "spent_on",
            EntryField::CreatedOn => "created_on",
            EntryField::UpdatedOn => "updated_on",
            EntryField::OverriddenCosts => "overridden_costs",
            EntryField::StatusId => "status_id",
            EntryField::TrackerId => "tracker_id",
            EntryField::PriorityId => "priority_id",
            EntryField::AssignedToId => "assigned_to_id",
            EntryField::CategoryId => "category_id",
            EntryField::FixedVersionId => "fixed_version_id",
            EntryField::Subject => "subject",
            EntryField::StartDate => "start_date",
            EntryField::DueDate => "due_date",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EntryField::ALL
            .iter()
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;

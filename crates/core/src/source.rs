// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interfaces the engine consumes from its host.
//!
//! - [`EntrySource`] yields the raw time and cost entries to merge.
//! - [`CustomFieldSource`] yields custom field metadata and its change stamp.
//! - [`ReferenceCatalog`] lists referenced records for `available_values`.
//!
//! [`crate::Database`] implements all three over SQLite.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::custom_field::{CacheStamp, CustomField};
use crate::entry::RawEntry;
use crate::error::Result;

/// Source of the records merged into the entries dataset.
pub trait EntrySource {
    /// Scan every time entry and cost entry, joined with its issue.
    fn scan(&self) -> Result<Vec<RawEntry>>;
}

/// Source of custom field definitions.
pub trait CustomFieldSource {
    /// Identifies the metadata store. Sources with the same id must list
    /// the same definitions; the registry caches one snapshot per id.
    fn source_id(&self) -> &str;

    /// All custom field definitions, of every kind.
    fn custom_fields(&self) -> Result<Vec<CustomField>>;

    /// A stamp that changes whenever any definition is created, updated or
    /// deleted.
    fn custom_field_stamp(&self) -> Result<CacheStamp> {
        Ok(CacheStamp::of(&self.custom_fields()?))
    }
}

/// Kinds of records a reference filter can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Project,
    User,
    Issue,
    CostType,
    Activity,
    Status,
    Tracker,
    Priority,
    Category,
    Version,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Project => "project",
            ReferenceKind::User => "user",
            ReferenceKind::Issue => "issue",
            ReferenceKind::CostType => "cost_type",
            ReferenceKind::Activity => "activity",
            ReferenceKind::Status => "status",
            ReferenceKind::Tracker => "tracker",
            ReferenceKind::Priority => "priority",
            ReferenceKind::Category => "category",
            ReferenceKind::Version => "version",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A referenced record as listed by a [`ReferenceCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub id: i64,
    pub label: String,
    /// Set for the anonymous user; never offered as a filter value.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub anonymous: bool,
}

impl Reference {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Reference {
            id,
            label: label.into(),
            anonymous: false,
        }
    }
}

/// Lists the records a reference filter can point at.
pub trait ReferenceCatalog {
    fn references(&self, kind: ReferenceKind) -> Result<Vec<Reference>>;
}

/// Who is asking for available values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Actor {
    /// Not logged in; no referenced record is accessible.
    #[default]
    Anonymous,
    /// A known user.
    User(i64),
}

impl Actor {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Actor::Anonymous)
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! cq-core: query filtering engine for cost reports
//!
//! This crate merges time entries and cost entries into one entries dataset
//! and filters it through typed, named filters. Static filter types cover the
//! fixed columns; custom field filter types are generated from custom field
//! metadata and rebuilt whenever it changes.
//!
//! ```no_run
//! use cq_core::{Database, Query};
//!
//! # fn main() -> cq_core::Result<()> {
//! let db = Database::open_in_memory()?;
//! let mut query = Query::new(&db);
//! query.filter("project_id", "=", &["1"])?.filter("spent_on", "w", &[] as &[&str])?;
//! println!("{} entries", query.result()?.count());
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod custom_field;
pub mod db;
pub mod entry;
pub mod error;
pub mod filter;
pub mod operator;
pub mod query;
pub mod record;
pub mod registry;
pub mod source;
pub mod value;

pub use clock::{Clock, FixedClock, SystemClock};
pub use custom_field::{CacheStamp, CustomField, CustomFieldKind, FieldFormat};
pub use db::Database;
pub use entry::{
    CostEntry, Entry, EntryField, EntryKind, IssueFields, RawEntry, TimeEntry, LABOR_COST_TYPE, NONE_ID,
};
pub use error::{Error, Result};
pub use filter::{ActiveFilter, AvailableValue, FilterType};
pub use operator::{Operator, OperatorGroup, OperatorSet};
pub use query::{Query, QueryResult};
pub use record::{Fixture, ImportSummary, Issue, IssueStatus, Named, Project, ProjectScoped, User};
pub use registry::FilterRegistry;
pub use source::{Actor, CustomFieldSource, EntrySource, Reference, ReferenceCatalog, ReferenceKind};
pub use value::{Operand, Value, ValueDomain};

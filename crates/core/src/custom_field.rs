// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User-defined custom fields.
//!
//! Issue custom fields become filter types named `custom_field_<name>`. The
//! field's [`FieldFormat`] decides the value domain and operator set; values
//! are stored per issue as text and projected into that domain on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::operator::OperatorSet;
use crate::value::{parse_date, Value, ValueDomain};

/// Prefix of every custom field filter name.
pub const FILTER_PREFIX: &str = "custom_field_";

/// Storage format of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormat {
    String,
    Text,
    List,
    Bool,
    Int,
    Float,
    Date,
}

impl FieldFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldFormat::String => "string",
            FieldFormat::Text => "text",
            FieldFormat::List => "list",
            FieldFormat::Bool => "bool",
            FieldFormat::Int => "int",
            FieldFormat::Float => "float",
            FieldFormat::Date => "date",
        }
    }

    /// Domain the stored text is projected into.
    pub fn domain(&self) -> ValueDomain {
        match self {
            FieldFormat::String | FieldFormat::Text | FieldFormat::List | FieldFormat::Bool => {
                ValueDomain::Text
            }
            FieldFormat::Int => ValueDomain::Integer,
            FieldFormat::Float => ValueDomain::Decimal,
            FieldFormat::Date => ValueDomain::Date,
        }
    }

    /// Operators a filter over this format accepts.
    pub fn operators(&self) -> OperatorSet {
        match self {
            FieldFormat::String | FieldFormat::Text | FieldFormat::List | FieldFormat::Bool => {
                OperatorSet::default_operators()
                    .union(OperatorSet::string_operators())
                    .union(OperatorSet::null_operators())
            }
            FieldFormat::Int | FieldFormat::Float => OperatorSet::default_operators()
                .union(OperatorSet::integer_operators())
                .union(OperatorSet::null_operators()),
            FieldFormat::Date => OperatorSet::time_operators(),
        }
    }

    /// Project a stored value. Empty or unparseable text is absent.
    pub fn project(&self, raw: Option<&str>) -> Value {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Value::Null;
        };
        match self {
            FieldFormat::Int => raw.parse().map_or(Value::Null, Value::Int),
            FieldFormat::Float => match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => Value::Decimal(n),
                _ => Value::Null,
            },
            FieldFormat::Date => parse_date(raw).map_or(Value::Null, Value::Date),
            _ => Value::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "string" => Ok(FieldFormat::String),
            "text" => Ok(FieldFormat::Text),
            "list" => Ok(FieldFormat::List),
            "bool" => Ok(FieldFormat::Bool),
            "int" => Ok(FieldFormat::Int),
            "float" => Ok(FieldFormat::Float),
            "date" => Ok(FieldFormat::Date),
            _ => Err(Error::InvalidFieldFormat(s.to_string())),
        }
    }
}

/// The kind of record a custom field is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldKind {
    #[default]
    Issue,
    Project,
    User,
}

impl CustomFieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomFieldKind::Issue => "issue",
            CustomFieldKind::Project => "project",
            CustomFieldKind::User => "user",
        }
    }
}

impl fmt::Display for CustomFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CustomFieldKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "issue" => Ok(CustomFieldKind::Issue),
            "project" => Ok(CustomFieldKind::Project),
            "user" => Ok(CustomFieldKind::User),
            _ => Err(Error::InvalidFieldKind(s.to_string())),
        }
    }
}

/// A custom field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    /// Database-assigned identifier (0 until stored).
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub kind: CustomFieldKind,
    pub format: FieldFormat,
    #[serde(default)]
    pub searchable: bool,
    /// Allowed values of a `list` field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_values: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_on: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_on: DateTime<Utc>,
}

impl CustomField {
    /// Creates an unsaved issue custom field.
    pub fn new(name: impl Into<String>, format: FieldFormat) -> Self {
        let now = Utc::now();
        CustomField {
            id: 0,
            name: name.into(),
            kind: CustomFieldKind::Issue,
            format,
            searchable: false,
            possible_values: Vec::new(),
            created_on: now,
            updated_on: now,
        }
    }

    pub fn with_kind(mut self, kind: CustomFieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn with_possible_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.possible_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if this field produces a filter type.
    pub fn is_filterable(&self) -> bool {
        self.kind == CustomFieldKind::Issue
    }
}

/// Lowercase `name`, collapsing runs of non-alphanumerics to `_`.
///
/// "Searchable Field" becomes `searchable_field`; the result may be empty.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Assign filter names to `fields`, in order.
///
/// A field whose normalized name is empty or already taken (by `reserved` or
/// an earlier field) gets its id appended.
pub fn filter_names<'a>(
    fields: impl IntoIterator<Item = &'a CustomField>,
    reserved: &HashSet<String>,
) -> Vec<String> {
    let mut taken = reserved.clone();
    fields
        .into_iter()
        .map(|field| {
            let base = normalize_name(&field.name);
            let candidate = format!("{FILTER_PREFIX}{base}");
            let name = if base.is_empty() {
                format!("{FILTER_PREFIX}{}", field.id)
            } else if taken.contains(&candidate) {
                format!("{candidate}_{}", field.id)
            } else {
                candidate
            };
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Change stamp of the custom field metadata.
///
/// Counting definitions makes deletions visible even when the latest
/// modification time does not move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStamp {
    pub count: usize,
    pub latest: Option<DateTime<Utc>>,
}

impl CacheStamp {
    pub fn new(count: usize, latest: Option<DateTime<Utc>>) -> Self {
        CacheStamp { count, latest }
    }

    pub fn of(fields: &[CustomField]) -> Self {
        CacheStamp {
            count: fields.len(),
            latest: fields.iter().map(|f| f.updated_on).max(),
        }
    }
}

impl fmt::Display for CacheStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latest {
            Some(t) => write!(f, "{}@{}", self.count, t.to_rfc3339()),
            None => write!(f, "{}@never", self.count),
        }
    }
}

#[cfg(test)]
#[path = "custom_field_tests.rs"]
mod tests;

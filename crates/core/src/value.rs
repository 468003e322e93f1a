// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Field values, operands and value domains.
//!
//! A [`Value`] is what an entry holds for a filterable field; an [`Operand`]
//! is a caller-supplied value already coerced to the filter's
//! [`ValueDomain`]. Coercion happens once, when a filter is applied, so
//! evaluation never has to parse strings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::operator::OperandKind;
use crate::source::ReferenceKind;

/// A field value projected from a normalized entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Field is absent for this entry.
    Null,
    /// Reference to another record by id.
    Id(i64),
    /// Issue status reference, carrying the status's closed flag.
    Status { id: i64, closed: bool },
    /// Whole number.
    Int(i64),
    /// Decimal number (costs, float custom fields).
    Decimal(f64),
    /// Free text.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Point in time.
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Wraps an optional id, mapping `None` to [`Value::Null`].
    pub fn id(id: Option<i64>) -> Self {
        id.map_or(Value::Null, Value::Id)
    }

    /// Wraps an optional date, mapping `None` to [`Value::Null`].
    pub fn date(date: Option<NaiveDate>) -> Self {
        date.map_or(Value::Null, Value::Date)
    }

    /// Returns true if the field is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Calendar date of a date or timestamp value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Timestamp(t) => Some(t.date_naive()),
            _ => None,
        }
    }

    /// Numeric view of an integer or decimal value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            // CORRECTNESS: integer pairs never reach this cast in cmp_number
            #[allow(clippy::cast_precision_loss)]
            Value::Int(n) => Some(*n as f64),
            Value::Decimal(n) => Some(*n),
            _ => None,
        }
    }

    /// Text view of a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Exact match against a single operand.
    pub fn equals(&self, operand: &Operand) -> bool {
        match (self, operand) {
            (Value::Id(a), Operand::Id(b)) => a == b,
            (Value::Status { id, .. }, Operand::Id(b)) => id == b,
            (Value::Text(a), Operand::Text(b)) => a == b,
            (Value::Date(_) | Value::Timestamp(_), Operand::Date(b)) => {
                self.as_date() == Some(*b)
            }
            (Value::Int(_) | Value::Decimal(_), Operand::Int(_) | Operand::Decimal(_)) => {
                self.cmp_number(operand) == Some(Ordering::Equal)
            }
            _ => false,
        }
    }

    /// Numeric ordering against an operand. Two integers compare exactly;
    /// a decimal on either side compares as `f64` within `f64::EPSILON`.
    pub fn cmp_number(&self, operand: &Operand) -> Option<Ordering> {
        if let (Value::Int(a), Operand::Int(b)) = (self, operand) {
            return Some(a.cmp(b));
        }
        let (a, b) = (self.as_number()?, operand.number()?);
        if (a - b).abs() < f64::EPSILON {
            Some(Ordering::Equal)
        } else {
            a.partial_cmp(&b)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "-"),
            Value::Id(id) | Value::Status { id, .. } => write!(f, "{id}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Decimal(n) => write!(f, "{n:.2}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

/// A filter value coerced to the filter's domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    Id(i64),
    Int(i64),
    Decimal(f64),
    Text(String),
    Date(NaiveDate),
    /// Day count for date-relative operators (`>t-`, `t+`, ...).
    Days(u64),
}

impl Operand {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Operand::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn days(&self) -> Option<u64> {
        match self {
            Operand::Days(n) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Operand::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            // CORRECTNESS: integer pairs never reach this cast in cmp_number
            #[allow(clippy::cast_precision_loss)]
            Operand::Int(n) => Some(*n as f64),
            Operand::Decimal(n) => Some(*n),
            _ => None,
        }
    }
}

/// The kind of data a filter type ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "domain", content = "references", rename_all = "snake_case")]
pub enum ValueDomain {
    /// Mandatory reference to another record.
    Reference(ReferenceKind),
    /// Reference that may be absent.
    NullableReference(ReferenceKind),
    /// Issue status reference (carries the closed flag).
    Status,
    Text,
    Integer,
    Decimal,
    Date,
    Timestamp,
}

impl ValueDomain {
    /// The referenced record kind, if this is a reference domain.
    pub fn reference_kind(&self) -> Option<ReferenceKind> {
        match self {
            ValueDomain::Reference(kind) | ValueDomain::NullableReference(kind) => Some(*kind),
            ValueDomain::Status => Some(ReferenceKind::Status),
            _ => None,
        }
    }

    /// Coerce a raw operand for an operator expecting `kind`.
    ///
    /// Returns a human-readable reason on failure; callers wrap it into
    /// [`crate::Error::InvalidOperand`] with the field and operator.
    pub fn coerce(&self, kind: OperandKind, raw: &str) -> std::result::Result<Operand, String> {
        let raw = raw.trim();
        match kind {
            OperandKind::Date => parse_date(raw).map(Operand::Date),
            OperandKind::Days => raw
                .parse::<u64>()
                .map(Operand::Days)
                .map_err(|_| format!("'{raw}' is not a day count")),
            OperandKind::Text => Ok(Operand::Text(raw.to_string())),
            OperandKind::Number => match self {
                ValueDomain::Integer => parse_int(raw).map(Operand::Int),
                _ => parse_decimal(raw).map(Operand::Decimal),
            },
            OperandKind::Domain => match self {
                ValueDomain::Reference(_) | ValueDomain::NullableReference(_) | ValueDomain::Status => {
                    raw.parse::<i64>()
                        .map(Operand::Id)
                        .map_err(|_| format!("'{raw}' is not an id"))
                }
                ValueDomain::Text => Ok(Operand::Text(raw.to_string())),
                ValueDomain::Integer => parse_int(raw).map(Operand::Int),
                ValueDomain::Decimal => parse_decimal(raw).map(Operand::Decimal),
                ValueDomain::Date | ValueDomain::Timestamp => parse_date(raw).map(Operand::Date),
            },
        }
    }
}

/// Parse a date in YYYY-MM-DD format.
pub fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("'{raw}' is not a date (expected YYYY-MM-DD)"))
}

fn parse_int(raw: &str) -> std::result::Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("'{raw}' is not an integer"))
}

fn parse_decimal(raw: &str) -> std::result::Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(format!("'{raw}' is not a number")),
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;

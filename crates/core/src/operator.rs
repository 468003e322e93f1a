// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter operators and their capability groups.
//!
//! Every operator is a variant of the closed [`Operator`] enum, identified by
//! its short symbol (`=`, `!*`, `>d`, ...). Filter types expose an
//! [`OperatorSet`] built from the named groups below:
//!
//! ```text
//! default          =  !
//! null             !*  *
//! date-relative    t  w  >t-  <t-  t-  >t+  <t+  t+
//! date-comparison  >d  <d  =d  <>d
//! time             default + null + date-relative + date-comparison
//! string           ~  !~  ^  $
//! integer          =n  <  >  <=  >=
//! status           o  c
//! presence         y  n
//! ```

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::{Operand, Value};

/// A symbolic filter operator.
///
/// Declaration order is the display order used by [`OperatorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    /// `=` matches any of the given values.
    Is,
    /// `!` matches none of the given values.
    IsNot,
    /// `!*` field is absent.
    Blank,
    /// `*` field is present.
    Present,
    /// `t` date is today.
    Today,
    /// `w` date is in the current ISO week.
    ThisWeek,
    /// `>t-` date is at least N days in the past.
    MoreThanDaysAgo,
    /// `<t-` date is within the last N days.
    LessThanDaysAgo,
    /// `t-` date is exactly N days ago.
    DaysAgo,
    /// `>t+` date is at least N days ahead.
    InMoreThanDays,
    /// `<t+` date is within the next N days.
    InLessThanDays,
    /// `t+` date is exactly N days ahead.
    InDays,
    /// `>d` date is after the given date.
    After,
    /// `<d` date is before the given date.
    Before,
    /// `=d` date is the given date.
    On,
    /// `<>d` date is between two dates (inclusive).
    Between,
    /// `~` text contains the value (case-insensitive).
    Contains,
    /// `!~` text does not contain the value (case-insensitive).
    NotContains,
    /// `^` text starts with the value (case-insensitive).
    StartsWith,
    /// `$` text ends with the value (case-insensitive).
    EndsWith,
    /// `=n` number equals.
    NumEquals,
    /// `<` number is less than.
    Less,
    /// `>` number is greater than.
    Greater,
    /// `<=` number is at most.
    LessOrEqual,
    /// `>=` number is at least.
    GreaterOrEqual,
    /// `o` issue status is open.
    Open,
    /// `c` issue status is closed.
    Closed,
    /// `y` value is set.
    Yes,
    /// `n` value is not set.
    No,
}

/// How many values an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// No values (`!*`, `t`, `c`, ...).
    Nullary,
    /// Exactly one value.
    Unary,
    /// Exactly two values.
    Binary,
    /// One or more values.
    Variadic,
}

impl Arity {
    /// Returns true if `count` values are acceptable.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Nullary => count == 0,
            Arity::Unary => count == 1,
            Arity::Binary => count == 2,
            Arity::Variadic => count >= 1,
        }
    }

    /// Describes the expected value count for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Arity::Nullary => "takes no values",
            Arity::Unary => "takes exactly one value",
            Arity::Binary => "takes exactly two values",
            Arity::Variadic => "takes at least one value",
        }
    }
}

/// What an operator's values are coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// The filter's own value domain (ids, text, dates, numbers).
    Domain,
    /// A calendar date.
    Date,
    /// A non-negative day count.
    Days,
    /// Free text.
    Text,
    /// A number in the filter's numeric domain.
    Number,
}

/// Named capability groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorGroup {
    Default,
    Null,
    DateRelative,
    DateComparison,
    Time,
    String,
    Integer,
    Status,
    Presence,
}

impl OperatorGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorGroup::Default => "default",
            OperatorGroup::Null => "null",
            OperatorGroup::DateRelative => "date_relative",
            OperatorGroup::DateComparison => "date_comparison",
            OperatorGroup::Time => "time",
            OperatorGroup::String => "string",
            OperatorGroup::Integer => "integer",
            OperatorGroup::Status => "status",
            OperatorGroup::Presence => "presence",
        }
    }
}

impl fmt::Display for OperatorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Operator {
    /// Every operator, in display order.
    pub const ALL: [Operator; 29] = [
        Operator::Is,
        Operator::IsNot,
        Operator::Blank,
        Operator::Present,
        Operator::Today,
        Operator::ThisWeek,
        Operator::MoreThanDaysAgo,
        Operator::LessThanDaysAgo,
        Operator::DaysAgo,
        Operator::InMoreThanDays,
        Operator::InLessThanDays,
        Operator::InDays,
        Operator::After,
        Operator::Before,
        Operator::On,
        Operator::Between,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::NumEquals,
        Operator::Less,
        Operator::Greater,
        Operator::LessOrEqual,
        Operator::GreaterOrEqual,
        Operator::Open,
        Operator::Closed,
        Operator::Yes,
        Operator::No,
    ];

    /// The operator's symbol, its identity in filter requests.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Is => "=",
            Operator::IsNot => "!",
            Operator::Blank => "!*",
            Operator::Present => "*",
            Operator::Today => "t",
            Operator::ThisWeek => "w",
            Operator::MoreThanDaysAgo => ">t-",
            Operator::LessThanDaysAgo => "<t-",
            Operator::DaysAgo => "t-",
            Operator::InMoreThanDays => ">t+",
            Operator::InLessThanDays => "<t+",
            Operator::InDays => "t+",
            Operator::After => ">d",
            Operator::Before => "<d",
            Operator::On => "=d",
            Operator::Between => "<>d",
            Operator::Contains => "~",
            Operator::NotContains => "!~",
            Operator::StartsWith => "^",
            Operator::EndsWith => "$",
            Operator::NumEquals => "=n",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::Open => "o",
            Operator::Closed => "c",
            Operator::Yes => "y",
            Operator::No => "n",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Is => "is",
            Operator::IsNot => "is not",
            Operator::Blank => "none",
            Operator::Present => "any",
            Operator::Today => "today",
            Operator::ThisWeek => "this week",
            Operator::MoreThanDaysAgo => "more than days ago",
            Operator::LessThanDaysAgo => "less than days ago",
            Operator::DaysAgo => "days ago",
            Operator::InMoreThanDays => "in more than days",
            Operator::InLessThanDays => "in less than days",
            Operator::InDays => "in days",
            Operator::After => "after",
            Operator::Before => "before",
            Operator::On => "on",
            Operator::Between => "between",
            Operator::Contains => "contains",
            Operator::NotContains => "doesn't contain",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
            Operator::NumEquals => "equals",
            Operator::Less => "less than",
            Operator::Greater => "greater than",
            Operator::LessOrEqual => "at most",
            Operator::GreaterOrEqual => "at least",
            Operator::Open => "open",
            Operator::Closed => "closed",
            Operator::Yes => "yes",
            Operator::No => "no",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::Is | Operator::IsNot => Arity::Variadic,
            Operator::Blank
            | Operator::Present
            | Operator::Today
            | Operator::ThisWeek
            | Operator::Open
            | Operator::Closed
            | Operator::Yes
            | Operator::No => Arity::Nullary,
            Operator::Between => Arity::Binary,
            _ => Arity::Unary,
        }
    }

    pub fn operand_kind(&self) -> OperandKind {
        match self {
            Operator::MoreThanDaysAgo
            | Operator::LessThanDaysAgo
            | Operator::DaysAgo
            | Operator::InMoreThanDays
            | Operator::InLessThanDays
            | Operator::InDays => OperandKind::Days,
            Operator::After | Operator::Before | Operator::On | Operator::Between => {
                OperandKind::Date
            }
            Operator::Contains
            | Operator::NotContains
            | Operator::StartsWith
            | Operator::EndsWith => OperandKind::Text,
            Operator::NumEquals
            | Operator::Less
            | Operator::Greater
            | Operator::LessOrEqual
            | Operator::GreaterOrEqual => OperandKind::Number,
            _ => OperandKind::Domain,
        }
    }

    /// The groups this operator belongs to.
    pub fn groups(&self) -> &'static [OperatorGroup] {
        use OperatorGroup as G;
        match self {
            Operator::Is | Operator::IsNot => &[G::Default, G::Time],
            Operator::Blank | Operator::Present => &[G::Null, G::Time],
            Operator::Today
            | Operator::ThisWeek
            | Operator::MoreThanDaysAgo
            | Operator::LessThanDaysAgo
            | Operator::DaysAgo
            | Operator::InMoreThanDays
            | Operator::InLessThanDays
            | Operator::InDays => &[G::DateRelative, G::Time],
            Operator::After | Operator::Before | Operator::On | Operator::Between => {
                &[G::DateComparison, G::Time]
            }
            Operator::Contains
            | Operator::NotContains
            | Operator::StartsWith
            | Operator::EndsWith => &[G::String],
            Operator::NumEquals
            | Operator::Less
            | Operator::Greater
            | Operator::LessOrEqual
            | Operator::GreaterOrEqual => &[G::Integer],
            Operator::Open | Operator::Closed => &[G::Status],
            Operator::Yes | Operator::No => &[G::Presence],
        }
    }

    pub fn in_group(&self, group: OperatorGroup) -> bool {
        self.groups().contains(&group)
    }

    /// Evaluate this operator for a field value.
    ///
    /// `operands` must already satisfy [`Operator::arity`] and be coerced for
    /// [`Operator::operand_kind`]; mismatched operands never match.
    /// Date-relative operators compare against `today`.
    pub fn evaluate(&self, value: &Value, operands: &[Operand], today: NaiveDate) -> bool {
        match self {
            Operator::Is => operands.iter().any(|o| value.equals(o)),
            Operator::IsNot => !operands.iter().any(|o| value.equals(o)),
            Operator::Blank | Operator::No => value.is_null(),
            Operator::Present | Operator::Yes => !value.is_null(),
            Operator::Today => value.as_date() == Some(today),
            Operator::ThisWeek => value
                .as_date()
                .is_some_and(|d| d.iso_week() == today.iso_week()),
            Operator::MoreThanDaysAgo => {
                relative(value, operands, |d, n| today.checked_sub_days(n).is_some_and(|b| d <= b))
            }
            Operator::LessThanDaysAgo => relative(value, operands, |d, n| {
                today.checked_sub_days(n).is_some_and(|b| d >= b) && d <= today
            }),
            Operator::DaysAgo => {
                relative(value, operands, |d, n| today.checked_sub_days(n) == Some(d))
            }
            Operator::InMoreThanDays => {
                relative(value, operands, |d, n| today.checked_add_days(n).is_some_and(|b| d >= b))
            }
            Operator::InLessThanDays => relative(value, operands, |d, n| {
                today.checked_add_days(n).is_some_and(|b| d <= b) && d >= today
            }),
            Operator::InDays => {
                relative(value, operands, |d, n| today.checked_add_days(n) == Some(d))
            }
            Operator::After => compare_date(value, operands, |d, o| d > o),
            Operator::Before => compare_date(value, operands, |d, o| d < o),
            Operator::On => compare_date(value, operands, |d, o| d == o),
            Operator::Between => {
                let bounds = (
                    operands.first().and_then(Operand::date),
                    operands.get(1).and_then(Operand::date),
                );
                match (value.as_date(), bounds) {
                    (Some(d), (Some(lo), Some(hi))) => lo <= d && d <= hi,
                    _ => false,
                }
            }
            Operator::Contains => compare_text(value, operands, |t, n| t.contains(n)),
            Operator::NotContains => compare_text(value, operands, |t, n| !t.contains(n)),
            Operator::StartsWith => compare_text(value, operands, |t, n| t.starts_with(n)),
            Operator::EndsWith => compare_text(value, operands, |t, n| t.ends_with(n)),
            Operator::NumEquals => compare_number(value, operands, Ordering::is_eq),
            Operator::Less => compare_number(value, operands, Ordering::is_lt),
            Operator::Greater => compare_number(value, operands, Ordering::is_gt),
            Operator::LessOrEqual => compare_number(value, operands, Ordering::is_le),
            Operator::GreaterOrEqual => compare_number(value, operands, Ordering::is_ge),
            Operator::Open => matches!(value, Value::Status { closed: false, .. }),
            Operator::Closed => matches!(value, Value::Status { closed: true, .. }),
        }
    }
}

fn relative(value: &Value, operands: &[Operand], f: impl Fn(NaiveDate, Days) -> bool) -> bool {
    match (value.as_date(), operands.first().and_then(Operand::days)) {
        (Some(d), Some(n)) => f(d, Days::new(n)),
        _ => false,
    }
}

fn compare_date(
    value: &Value,
    operands: &[Operand],
    f: impl Fn(NaiveDate, NaiveDate) -> bool,
) -> bool {
    match (value.as_date(), operands.first().and_then(Operand::date)) {
        (Some(d), Some(o)) => f(d, o),
        _ => false,
    }
}

fn compare_text(value: &Value, operands: &[Operand], f: impl Fn(&str, &str) -> bool) -> bool {
    match (value.as_text(), operands.first().and_then(Operand::text)) {
        (Some(t), Some(n)) => f(&t.to_lowercase(), &n.to_lowercase()),
        _ => false,
    }
}

fn compare_number(value: &Value, operands: &[Operand], f: impl Fn(Ordering) -> bool) -> bool {
    operands
        .first()
        .and_then(|o| value.cmp_number(o))
        .is_some_and(f)
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .iter()
            .find(|op| op.symbol() == s)
            .copied()
            .ok_or_else(|| Error::UnknownOperator(s.to_string()))
    }
}

impl Serialize for Operator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// An ordered, duplicate-free set of operators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperatorSet(BTreeSet<Operator>);

impl OperatorSet {
    /// Every operator belonging to `group`.
    pub fn group(group: OperatorGroup) -> Self {
        Operator::ALL
            .iter()
            .copied()
            .filter(|op| op.in_group(group))
            .collect()
    }

    /// `=`, `!`
    pub fn default_operators() -> Self {
        Self::group(OperatorGroup::Default)
    }

    /// `!*`, `*`
    pub fn null_operators() -> Self {
        Self::group(OperatorGroup::Null)
    }

    /// Default, null, date-relative and date-comparison operators.
    pub fn time_operators() -> Self {
        Self::group(OperatorGroup::Time)
    }

    pub fn string_operators() -> Self {
        Self::group(OperatorGroup::String)
    }

    pub fn integer_operators() -> Self {
        Self::group(OperatorGroup::Integer)
    }

    pub fn status_operators() -> Self {
        Self::group(OperatorGroup::Status)
    }

    pub fn presence_operators() -> Self {
        Self::group(OperatorGroup::Presence)
    }

    /// Set union (builder style).
    pub fn union(mut self, other: OperatorSet) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.0.contains(&op)
    }

    /// Returns true if every operator of `other` is in this set.
    pub fn is_superset(&self, other: &OperatorSet) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Operator> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Operator symbols in display order.
    pub fn symbols(&self) -> Vec<&'static str> {
        self.iter().map(|op| op.symbol()).collect()
    }
}

impl FromIterator<Operator> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
        OperatorSet(iter.into_iter().collect())
    }
}

impl fmt::Display for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols().join(", "))
    }
}

#[cfg(test)]
#[path = "operator_tests.rs"]
mod tests;

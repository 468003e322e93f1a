// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter types and active filter applications.
//!
//! A [`FilterType`] is a named, typed column descriptor. Static types are
//! built once per fixed column by [`static_filters`]; custom field types are
//! built by [`FilterType::custom`] whenever the registry rebuilds its
//! dynamic set. [`FilterType::apply`] validates an operator and its raw
//! values and produces an [`ActiveFilter`] ready to evaluate.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::custom_field::{CustomField, FieldFormat};
use crate::entry::{Entry, EntryField};
use crate::error::{Error, Result};
use crate::operator::{Operator, OperatorSet};
use crate::source::{Actor, ReferenceCatalog, ReferenceKind};
use crate::value::{Operand, Value, ValueDomain};

/// Where a filter type reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A fixed column of the merged entry.
    Column(EntryField),
    /// An issue custom field.
    Custom { id: i64, format: FieldFormat },
}

/// A named, typed column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterType {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub domain: ValueDomain,
    pub operators: OperatorSet,
    #[serde(skip)]
    pub source: FieldSource,
    /// Allowed values of a `list` custom field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_values: Vec<String>,
}

/// A `(label, value)` pair offered for a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableValue {
    pub label: String,
    pub value: String,
}

impl FilterType {
    /// Filter type over a fixed column.
    pub fn column(
        field: EntryField,
        label: &str,
        domain: ValueDomain,
        operators: OperatorSet,
    ) -> Self {
        FilterType {
            name: field.as_str().to_string(),
            label: label.to_string(),
            domain,
            operators,
            source: FieldSource::Column(field),
            possible_values: Vec::new(),
        }
    }

    /// Filter type over an issue custom field.
    pub fn custom(name: String, field: &CustomField) -> Self {
        FilterType {
            name,
            label: field.name.clone(),
            domain: field.format.domain(),
            operators: field.format.operators(),
            source: FieldSource::Custom {
                id: field.id,
                format: field.format,
            },
            possible_values: field.possible_values.clone(),
        }
    }

    pub fn available_operators(&self) -> &OperatorSet {
        &self.operators
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.source, FieldSource::Custom { .. })
    }

    /// This filter's value for an entry.
    pub fn value_of(&self, entry: &Entry) -> Value {
        match self.source {
            FieldSource::Column(field) => entry.field(field),
            FieldSource::Custom { id, format } => format.project(entry.custom_value(id)),
        }
    }

    /// Validate `operator` and coerce `values` into an active filter.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedOperator`] if `operator` is not available.
    /// - [`Error::InvalidOperand`] on a wrong value count or a value that
    ///   does not coerce to the filter's domain.
    pub fn apply<V: AsRef<str>>(
        self: &Arc<Self>,
        operator: Operator,
        values: &[V],
    ) -> Result<ActiveFilter> {
        if !self.operators.contains(operator) {
            return Err(Error::UnsupportedOperator {
                field: self.name.clone(),
                operator: operator.symbol().to_string(),
                available: self.operators.to_string(),
            });
        }
        let invalid = |reason: String| Error::InvalidOperand {
            field: self.name.clone(),
            operator: operator.symbol().to_string(),
            reason,
        };
        let arity = operator.arity();
        if !arity.accepts(values.len()) {
            return Err(invalid(format!(
                "'{}' {}, got {}",
                operator.symbol(),
                arity.describe(),
                values.len()
            )));
        }
        let operands = values
            .iter()
            .map(|v| self.domain.coerce(operator.operand_kind(), v.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(invalid)?;
        Ok(ActiveFilter {
            filter: Arc::clone(self),
            operator,
            operands,
        })
    }

    /// Values a caller may pick for this filter.
    ///
    /// Reference filters list the referenced records accessible to `actor`
    /// (nothing for an anonymous actor, and never the anonymous user).
    /// `list` custom fields list their possible values. Other filters take
    /// free input and list nothing.
    pub fn available_values<C: ReferenceCatalog + ?Sized>(
        &self,
        catalog: &C,
        actor: Actor,
    ) -> Result<Vec<AvailableValue>> {
        if !self.possible_values.is_empty() {
            return Ok(self
                .possible_values
                .iter()
                .map(|v| AvailableValue {
                    label: v.clone(),
                    value: v.clone(),
                })
                .collect());
        }
        let Some(kind) = self.domain.reference_kind() else {
            return Ok(Vec::new());
        };
        if actor.is_anonymous() {
            return Ok(Vec::new());
        }
        Ok(catalog
            .references(kind)?
            .into_iter()
            .filter(|r| !(kind == ReferenceKind::User && r.anonymous))
            .map(|r| AvailableValue {
                label: r.label,
                value: r.id.to_string(),
            })
            .collect())
    }
}

/// Every static filter type, in display order.
pub fn static_filters() -> Vec<FilterType> {
    use EntryField as F;
    use ReferenceKind as R;
    use ValueDomain as D;

    let default = OperatorSet::default_operators;
    let nullable = || OperatorSet::default_operators().union(OperatorSet::null_operators());
    let time = OperatorSet::time_operators;

    vec![
        FilterType::column(F::ProjectId, "Project", D::Reference(R::Project), default()),
        FilterType::column(F::UserId, "User", D::Reference(R::User), default()),
        FilterType::column(F::AuthorId, "Author", D::Reference(R::User), default()),
        FilterType::column(F::CostTypeId, "Cost type", D::Reference(R::CostType), default()),
        FilterType::column(F::IssueId, "Issue", D::Reference(R::Issue), default()),
        FilterType::column(F::ActivityId, "Activity", D::Reference(R::Activity), default()),
        FilterType::column(F::PriorityId, "Priority", D::Reference(R::Priority), default()),
        FilterType::column(F::TrackerId, "Tracker", D::Reference(R::Tracker), default()),
        FilterType::column(F::AssignedToId, "Assignee", D::NullableReference(R::User), nullable()),
        FilterType::column(F::CategoryId, "Category", D::NullableReference(R::Category), nullable()),
        FilterType::column(
            F::FixedVersionId,
            "Target version",
            D::NullableReference(R::Version),
            nullable(),
        ),
        FilterType::column(F::CreatedOn, "Created on", D::Timestamp, time()),
        FilterType::column(F::UpdatedOn, "Updated on", D::Timestamp, time()),
        FilterType::column(F::SpentOn, "Date", D::Date, time()),
        FilterType::column(F::StartDate, "Start date", D::Date, time()),
        FilterType::column(F::DueDate, "Due date", D::Date, time()),
        FilterType::column(
            F::StatusId,
            "Status",
            D::Status,
            default().union(OperatorSet::status_operators()),
        ),
        FilterType::column(
            F::Subject,
            "Subject",
            D::Text,
            default().union(OperatorSet::string_operators()),
        ),
        FilterType::column(
            F::OverriddenCosts,
            "Overridden costs",
            D::Decimal,
            OperatorSet::presence_operators(),
        ),
    ]
}

/// A validated `(filter type, operator, operands)` application.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveFilter {
    filter: Arc<FilterType>,
    operator: Operator,
    operands: Vec<Operand>,
}

impl ActiveFilter {
    pub fn filter(&self) -> &FilterType {
        &self.filter
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Returns true if `entry` passes this filter.
    pub fn matches(&self, entry: &Entry, today: NaiveDate) -> bool {
        let value = self.filter.value_of(entry);
        self.operator.evaluate(&value, &self.operands, today)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

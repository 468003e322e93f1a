// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering for command output. JSON output serializes the core types
//! directly and does not go through here.

use cq_core::{AvailableValue, CustomField, Entry, FilterType, Operator, ValueDomain};

/// Costs with two decimals, `-` when unknown.
pub fn format_costs(costs: Option<f64>) -> String {
    match costs {
        Some(c) => format!("{c:.2}"),
        None => "-".to_string(),
    }
}

/// One report row:
///
/// ```text
/// 2013-01-16  TimeEntry  #3     project 1  user 2  issue 7     Labor         2.50      40.00
/// ```
pub fn format_entry_line(entry: &Entry) -> String {
    let issue = match entry.issue_id {
        Some(id) => format!("issue {id}"),
        None => "-".to_string(),
    };
    format!(
        "{}  {:<9}  #{:<4}  project {}  user {}  {:<10}  {:<12}  {:>7.2}  {:>9}",
        entry.spent_on,
        entry.kind.as_str(),
        entry.id,
        entry.project_id,
        entry.user_id,
        issue,
        entry.cost_type,
        entry.units,
        format_costs(entry.real_costs()),
    )
}

/// Footer below a report: entry count and total real costs.
pub fn format_total(count: usize, total: f64) -> String {
    let noun = if count == 1 { "entry" } else { "entries" };
    format!("{count} {noun}, total costs {total:.2}")
}

pub fn domain_label(domain: &ValueDomain) -> String {
    match domain {
        ValueDomain::Reference(kind) => format!("{kind}"),
        ValueDomain::NullableReference(kind) => format!("{kind}?"),
        ValueDomain::Status => "status".to_string(),
        ValueDomain::Text => "text".to_string(),
        ValueDomain::Integer => "integer".to_string(),
        ValueDomain::Decimal => "decimal".to_string(),
        ValueDomain::Date => "date".to_string(),
        ValueDomain::Timestamp => "timestamp".to_string(),
    }
}

/// `name  domain  operators`, with list values appended for list fields.
pub fn format_filter_line(filter: &FilterType) -> String {
    let mut line = format!(
        "{:<24} {:<12} {}",
        filter.name,
        domain_label(&filter.domain),
        filter.available_operators()
    );
    if !filter.possible_values.is_empty() {
        line.push_str(&format!("  [{}]", filter.possible_values.join(", ")));
    }
    line
}

pub fn format_operator_line(op: Operator) -> String {
    let groups: Vec<&str> = op.groups().iter().map(|g| g.as_str()).collect();
    format!(
        "{:<4} {:<32} {:<24} {}",
        op.symbol(),
        op.label(),
        op.arity().describe(),
        groups.join(", ")
    )
}

pub fn format_value_line(value: &AvailableValue) -> String {
    if value.label == value.value {
        value.value.clone()
    } else {
        format!("{:>6}  {}", value.value, value.label)
    }
}

pub fn format_custom_field_line(field: &CustomField) -> String {
    let mut line = format!(
        "{:>4}  {:<20} {:<8} {:<7}",
        field.id,
        field.name,
        field.kind.as_str(),
        field.format.as_str()
    );
    if field.searchable {
        line.push_str(" searchable");
    }
    if !field.possible_values.is_empty() {
        line.push_str(&format!(" [{}]", field.possible_values.join(", ")));
    }
    line.trim_end().to_string()
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parser for `--filter` expressions.
//!
//! Parses expressions like `project_id = 3`, `spent_on w` or
//! `updated_on <>d 2024-01-01,2024-12-31` into a [`FilterExpr`]. Field and
//! operator are only checked for shape here; the filter registry decides
//! whether they exist.

use std::fmt;

use crate::error::{Error, Result};

/// Characters that may end a field name and start a compact operator.
const OPERATOR_CHARS: &[char] = &['=', '!', '<', '>', '~', '^', '$', '*'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpr {
    pub field: String,
    pub operator: String,
    pub values: Vec<String>,
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.operator)?;
        if !self.values.is_empty() {
            let values: Vec<String> = self.values.iter().map(|v| escape(v)).collect();
            write!(f, " {}", values.join(","))?;
        }
        Ok(())
    }
}

/// Parse a filter expression from a string.
///
/// The operator is the first whitespace-delimited token after the field.
/// When the field runs straight into operator characters (`project_id=3`),
/// the operator is that run of characters, so operators containing letters
/// (`<t-`, `=d`) need surrounding spaces.
///
/// Values are split on commas; a missing value list means no values.
/// `\,` is a literal comma and `\\` a literal backslash, so
/// `subject = Hello\, world` matches one subject.
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    let input = input.trim();
    let syntax = |reason: &str| Error::FilterSyntax {
        expr: input.to_string(),
        reason: reason.to_string(),
    };

    if input.is_empty() {
        return Err(syntax("empty expression"));
    }

    let (field, rest) = split_field(input);
    if field.is_empty() {
        return Err(syntax("missing field name"));
    }

    let (operator, rest) = split_operator(rest);
    if operator.is_empty() {
        return Err(syntax("missing operator"));
    }

    let values = parse_values(rest).ok_or_else(|| syntax("empty value in list"))?;

    Ok(FilterExpr {
        field: field.to_string(),
        operator: operator.to_string(),
        values,
    })
}

/// Split input into field name and rest, at whitespace or an operator character.
fn split_field(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| c.is_whitespace() || OPERATOR_CHARS.contains(&c))
        .unwrap_or(input.len());
    (&input[..end], &input[end..])
}

fn split_operator(rest: &str) -> (&str, &str) {
    if rest.starts_with(OPERATOR_CHARS) {
        let end = rest
            .find(|c: char| !OPERATOR_CHARS.contains(&c))
            .unwrap_or(rest.len());
        return (&rest[..end], &rest[end..]);
    }
    let rest = rest.trim_start();
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    (&rest[..end], &rest[end..])
}

/// `None` when the list contains an empty item, as in `1,,2`.
fn parse_values(rest: &str) -> Option<Vec<String>> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Some(Vec::new());
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ (',' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => current.push('\\'),
            },
            ',' => values.push(take_value(&mut current)?),
            _ => current.push(c),
        }
    }
    values.push(take_value(&mut current)?);
    Some(values)
}

fn take_value(current: &mut String) -> Option<String> {
    let value = std::mem::take(current);
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Inverse of the escapes `parse_values` understands.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace(',', "\\,")
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;

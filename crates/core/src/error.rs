// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for cq-core operations.

use thiserror::Error;

/// All possible errors that can occur in cq-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("operator '{operator}' is not supported by filter '{field}'\n  hint: '{field}' accepts: {available}")]
    UnsupportedOperator {
        field: String,
        operator: String,
        available: String,
    },

    #[error("unknown filter: '{0}'\n  hint: run 'costq filters' to list the available filters")]
    UnknownFilter(String),

    #[error("unknown operator: '{0}'\n  hint: run 'costq operators' to list the available operators")]
    UnknownOperator(String),

    #[error("invalid value for {field} {operator}: {reason}")]
    InvalidOperand {
        field: String,
        operator: String,
        reason: String,
    },

    #[error("filter already registered: '{0}'")]
    DuplicateFilter(String),

    #[error("custom field not found: {0}")]
    CustomFieldNotFound(String),

    #[error("invalid field format: '{0}'\n  hint: valid formats are: string, text, list, bool, int, float, date")]
    InvalidFieldFormat(String),

    #[error("invalid custom field kind: '{0}'\n  hint: valid kinds are: issue, project, user")]
    InvalidFieldKind(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for cq-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

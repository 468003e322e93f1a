// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the costq CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'costq init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid filter expression '{expr}': {reason}\n  hint: expected FIELD OPERATOR [VALUE[,VALUE...]], e.g. 'project_id = 3'")]
    FilterSyntax { expr: String, reason: String },

    #[error("unknown user: '{0}'\n  hint: import the user first or change 'user' in .costq/config.toml")]
    UnknownUser(String),

    #[error("import failed: {0}")]
    Import(String),

    #[error(transparent)]
    Core(#[from] cq_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

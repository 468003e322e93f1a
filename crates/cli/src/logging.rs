// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup: a fmt subscriber on stderr filtered by `COSTQ_LOG`.

use tracing_subscriber::EnvFilter;

use crate::env;

const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `COSTQ_LOG`, falling back to `warn` when the
/// variable is unset or unparseable.
pub fn filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init() {
    let filter = filter(env::log_filter().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

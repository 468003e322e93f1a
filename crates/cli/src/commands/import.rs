// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io::Write;
use std::path::Path;

use cq_core::{Database, FilterRegistry, Fixture};
use tracing::info;

use super::open_db;
use crate::error::{Error, Result};

pub fn run(file: &str) -> Result<()> {
    let (db, _, _) = open_db()?;
    run_impl(&db, FilterRegistry::global(), Path::new(file), &mut std::io::stdout())
}

pub(crate) fn run_impl(
    db: &Database,
    registry: &FilterRegistry,
    path: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Import(format!("cannot read {}: {}", path.display(), e)))?;
    let fixture: Fixture = serde_json::from_str(&content)
        .map_err(|e| Error::Import(format!("invalid fixture {}: {}", path.display(), e)))?;

    let summary = db.import(&fixture)?;
    if summary.custom_fields > 0 {
        registry.invalidate();
    }
    info!(?summary, "imported fixture");

    writeln!(
        out,
        "Imported {} records, {} custom fields, {} time entries, {} cost entries",
        summary.records, summary.custom_fields, summary.time_entries, summary.cost_entries
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;

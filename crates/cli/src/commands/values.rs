// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use cq_core::{Actor, Database, FilterRegistry};

use super::{open_db, resolve_actor};
use crate::cli::OutputFormat;
use crate::display::format_value_line;
use crate::error::Result;

pub fn run(field: &str, format: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let actor = resolve_actor(&db, &config)?;
    run_impl(&db, FilterRegistry::global(), actor, field, format, &mut std::io::stdout())
}

pub(crate) fn run_impl(
    db: &Database,
    registry: &FilterRegistry,
    actor: Actor,
    field: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let filter = registry.resolve(field, db)?;
    let values = filter.available_values(db, actor)?;

    match format {
        OutputFormat::Text => {
            for value in &values {
                writeln!(out, "{}", format_value_line(value))?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&values)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "values_tests.rs"]
mod tests;

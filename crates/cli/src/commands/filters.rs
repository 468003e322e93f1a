// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use cq_core::{Database, FilterRegistry, FilterType};

use super::open_db;
use crate::cli::OutputFormat;
use crate::display::format_filter_line;
use crate::error::Result;

pub fn run(custom: bool, format: OutputFormat) -> Result<()> {
    let (db, _, _) = open_db()?;
    run_impl(&db, FilterRegistry::global(), custom, format, &mut std::io::stdout())
}

pub(crate) fn run_impl(
    db: &Database,
    registry: &FilterRegistry,
    custom: bool,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let filters = if custom {
        registry.custom_field_filters(db)?
    } else {
        registry.all(db)?
    };

    match format {
        OutputFormat::Text => {
            if filters.is_empty() {
                writeln!(out, "No custom field filters.")?;
            }
            for filter in &filters {
                writeln!(out, "{}", format_filter_line(filter))?;
            }
        }
        OutputFormat::Json => {
            let filters: Vec<&FilterType> = filters.iter().map(|f| f.as_ref()).collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&filters)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "filters_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use cq_core::{Clock, Database, Entry, FilterRegistry, Query, SystemClock};
use serde::Serialize;
use tracing::debug;

use super::open_db;
use crate::cli::OutputFormat;
use crate::colors;
use crate::display::{format_entry_line, format_total};
use crate::error::Result;
use crate::expr::parse_filter;

/// JSON output structure for the report command.
#[derive(Serialize)]
struct ReportJson<'a> {
    filters: Vec<String>,
    count: usize,
    total_costs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    entries: &'a [Entry],
}

pub fn run(filters: &[String], limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let (db, _, _) = open_db()?;
    let colorize = colors::should_colorize();
    run_impl(
        &db,
        FilterRegistry::global(),
        SystemClock,
        filters,
        limit,
        format,
        colorize,
        &mut std::io::stdout(),
    )
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_impl<C: Clock>(
    db: &Database,
    registry: &FilterRegistry,
    clock: C,
    filters: &[String],
    limit: Option<usize>,
    format: OutputFormat,
    colorize: bool,
    out: &mut impl Write,
) -> Result<()> {
    // Parse every expression before touching the database
    let exprs = filters
        .iter()
        .map(|f| parse_filter(f))
        .collect::<Result<Vec<_>>>()?;

    let mut query = Query::new(db).with_registry(registry).with_clock(clock);
    for expr in &exprs {
        query.filter(&expr.field, &expr.operator, &expr.values)?;
    }
    let result = query.result()?;
    debug!(filters = exprs.len(), count = result.count(), "report");

    let shown = match limit {
        Some(n) => &result.entries()[..n.min(result.count())],
        None => result.entries(),
    };

    match format {
        OutputFormat::Text => {
            for entry in shown {
                writeln!(out, "{}", format_entry_line(entry))?;
            }
            let total = format_total(result.count(), result.total_costs());
            if colorize {
                writeln!(out, "{}", colors::context(&total))?;
            } else {
                writeln!(out, "{}", total)?;
            }
        }
        OutputFormat::Json => {
            let output = ReportJson {
                filters: exprs.iter().map(|e| e.to_string()).collect(),
                count: result.count(),
                total_costs: result.total_costs(),
                limit,
                entries: shown,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

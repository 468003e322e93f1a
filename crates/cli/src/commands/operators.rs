// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use cq_core::operator::Arity;
use cq_core::Operator;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::display::format_operator_line;
use crate::error::Result;

#[derive(Serialize)]
struct OperatorJson {
    symbol: &'static str,
    label: &'static str,
    arity: Arity,
    groups: Vec<&'static str>,
}

pub fn run(format: OutputFormat) -> Result<()> {
    run_impl(format, &mut std::io::stdout())
}

pub(crate) fn run_impl(format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for op in Operator::ALL {
                writeln!(out, "{}", format_operator_line(op))?;
            }
        }
        OutputFormat::Json => {
            let operators: Vec<OperatorJson> = Operator::ALL
                .iter()
                .map(|op| OperatorJson {
                    symbol: op.symbol(),
                    label: op.label(),
                    arity: op.arity(),
                    groups: op.groups().iter().map(|g| g.as_str()).collect(),
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&operators)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "operators_tests.rs"]
mod tests;

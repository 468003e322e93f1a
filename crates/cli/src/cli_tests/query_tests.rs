// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing tests for `operators`, `filters`, `values` and `report`.

#![allow(clippy::unwrap_used)]

use super::*;
use clap::Parser;
use yare::parameterized;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[parameterized(
    default_text = { &["costq", "operators"], OutputFormat::Text },
    json = { &["costq", "operators", "-o", "json"], OutputFormat::Json },
    long_flag = { &["costq", "operators", "--output", "json"], OutputFormat::Json },
)]
fn operators_output(args: &[&str], expected: OutputFormat) {
    let cli = parse(args).unwrap();
    assert!(matches!(cli.command, Command::Operators { output } if output == expected));
}

#[test]
fn filters_custom_flag() {
    let cli = parse(&["costq", "filters", "--custom", "-o", "json"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Filters {
            custom: true,
            output: OutputFormat::Json
        }
    ));
}

#[test]
fn values_requires_field() {
    assert!(parse(&["costq", "values"]).is_err());
    let cli = parse(&["costq", "values", "project_id"]).unwrap();
    assert!(matches!(cli.command, Command::Values { field, .. } if field == "project_id"));
}

#[test]
fn report_collects_repeated_filters() {
    let cli = parse(&[
        "costq",
        "report",
        "-f",
        "project_id = 1",
        "--filter",
        "spent_on w",
        "-n",
        "5",
    ])
    .unwrap();
    let Command::Report {
        filters,
        limit,
        output,
    } = cli.command
    else {
        unreachable!("expected report");
    };
    assert_eq!(filters, vec!["project_id = 1", "spent_on w"]);
    assert_eq!(limit.limit, Some(5));
    assert_eq!(output, OutputFormat::Text);
}

#[test]
fn report_without_filters() {
    let cli = parse(&["costq", "report"]).unwrap();
    assert!(matches!(cli.command, Command::Report { filters, .. } if filters.is_empty()));
}

#[test]
fn unknown_output_format_is_rejected() {
    assert!(parse(&["costq", "report", "-o", "yaml"]).is_err());
}

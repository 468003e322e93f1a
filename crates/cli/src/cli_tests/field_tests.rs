// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing tests for `field` subcommands.

#![allow(clippy::unwrap_used)]

use super::*;
use clap::Parser;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

fn field(args: &[&str]) -> FieldCommand {
    let mut full = vec!["costq", "field"];
    full.extend_from_slice(args);
    match parse(&full).unwrap().command {
        Command::Field(cmd) => cmd,
        _ => unreachable!("expected field"),
    }
}

#[test]
fn add_defaults() {
    let FieldCommand::Add {
        name,
        kind,
        definition,
    } = field(&["add", "Size"])
    else {
        unreachable!("expected add");
    };
    assert_eq!(name, "Size");
    assert_eq!(kind, "issue");
    assert_eq!(definition.format, None);
    assert!(definition.values.is_empty());
    assert_eq!(definition.searchable, None);
}

#[test]
fn add_list_with_values() {
    let FieldCommand::Add { definition, .. } = field(&[
        "add", "Phase", "-F", "list", "--value", "a,b", "--value", "c",
        "--searchable", "true",
    ]) else {
        unreachable!("expected add");
    };
    assert_eq!(definition.format.as_deref(), Some("list"));
    assert_eq!(definition.values, vec!["a", "b", "c"]);
    assert_eq!(definition.searchable, Some(true));
}

#[test]
fn update_takes_id_and_name() {
    let FieldCommand::Update { id, name, .. } = field(&["update", "4", "--name", "Phase"]) else {
        unreachable!("expected update");
    };
    assert_eq!(id, 4);
    assert_eq!(name.as_deref(), Some("Phase"));
}

#[test]
fn remove_requires_numeric_id() {
    assert!(matches!(field(&["remove", "3"]), FieldCommand::Remove { id: 3 }));
    assert!(parse(&["costq", "field", "remove", "three"]).is_err());
}

#[test]
fn set_takes_field_issue_and_value() {
    let FieldCommand::Set { id, issue, value } = field(&["set", "3", "7", "five"]) else {
        unreachable!("expected set");
    };
    assert_eq!((id, issue, value.as_str()), (3, 7, "five"));
}

#[test]
fn add_rejects_blank_name() {
    assert!(parse(&["costq", "field", "add", " "]).is_err());
}

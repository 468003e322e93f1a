// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{output, TestContext};
use crate::error::Error;

fn run(ctx: &TestContext, cmd: FieldCommand) -> Result<String> {
    let mut buf = Vec::new();
    run_impl(&ctx.db, &ctx.registry, cmd, &mut buf)?;
    Ok(output(buf))
}

fn add(name: &str, kind: &str, format: Option<&str>, values: &[&str]) -> FieldCommand {
    FieldCommand::Add {
        name: name.to_string(),
        kind: kind.to_string(),
        definition: FieldDefinitionArgs {
            format: format.map(String::from),
            values: values.iter().map(|v| v.to_string()).collect(),
            searchable: None,
        },
    }
}

#[test]
fn add_reports_generated_filter() {
    let ctx = TestContext::new();
    let text = run(&ctx, add("Size", "issue", Some("int"), &[])).unwrap();
    assert_eq!(text, "Created custom field 1: Size\nFilter: custom_field_size\n");
    assert!(ctx.registry.resolve("custom_field_size", &ctx.db).is_ok());
}

#[test]
fn add_defaults_to_string_format() {
    let ctx = TestContext::new();
    run(&ctx, add("Note", "issue", None, &[])).unwrap();
    assert_eq!(ctx.db.custom_field(1).unwrap().format, FieldFormat::String);
}

#[test]
fn non_issue_fields_have_no_filter() {
    let ctx = TestContext::new();
    let text = run(&ctx, add("Region", "project", None, &[])).unwrap();
    assert_eq!(text, "Created custom field 1: Region\n");
}

#[test]
fn add_rejects_unknown_format_and_kind() {
    let ctx = TestContext::new();
    let err = run(&ctx, add("Size", "issue", Some("money"), &[])).unwrap_err();
    assert!(matches!(err, Error::Core(cq_core::Error::InvalidFieldFormat(_))));
    let err = run(&ctx, add("Size", "ticket", None, &[])).unwrap_err();
    assert!(matches!(err, Error::Core(cq_core::Error::InvalidFieldKind(_))));
}

#[test]
fn update_renames_filter() {
    let ctx = TestContext::new();
    run(&ctx, add("Size", "issue", Some("int"), &[])).unwrap();
    assert!(ctx.registry.resolve("custom_field_size", &ctx.db).is_ok());

    let text = run(
        &ctx,
        FieldCommand::Update {
            id: 1,
            name: Some("Weight".into()),
            definition: FieldDefinitionArgs::default(),
        },
    )
    .unwrap();
    assert!(text.ends_with("Filter: custom_field_weight\n"));
    assert!(ctx.registry.resolve("custom_field_size", &ctx.db).is_err());
}

#[test]
fn update_replaces_values_and_flags() {
    let ctx = TestContext::new();
    run(&ctx, add("Phase", "issue", Some("list"), &["a"])).unwrap();
    run(
        &ctx,
        FieldCommand::Update {
            id: 1,
            name: None,
            definition: FieldDefinitionArgs {
                format: None,
                values: vec!["b".into(), "c".into()],
                searchable: Some(true),
            },
        },
    )
    .unwrap();
    let field = ctx.db.custom_field(1).unwrap();
    assert_eq!(field.possible_values, vec!["b", "c"]);
    assert!(field.searchable);
    assert_eq!(field.format, FieldFormat::List);
}

#[test]
fn remove_drops_filter() {
    let ctx = TestContext::new();
    run(&ctx, add("Size", "issue", Some("int"), &[])).unwrap();
    assert_eq!(
        run(&ctx, FieldCommand::Remove { id: 1 }).unwrap(),
        "Removed custom field 1\n"
    );
    assert!(ctx.registry.custom_field_filters(&ctx.db).unwrap().is_empty());
    let err = run(&ctx, FieldCommand::Remove { id: 1 }).unwrap_err();
    assert!(matches!(err, Error::Core(cq_core::Error::NotFound { .. })));
}

#[test]
fn set_value_is_visible_to_queries() {
    let ctx = TestContext::new();
    run(&ctx, add("Size", "issue", Some("int"), &[])).unwrap();
    run(
        &ctx,
        FieldCommand::Set {
            id: 1,
            issue: ctx.issue,
            value: "8".into(),
        },
    )
    .unwrap();

    let mut query = cq_core::Query::new(&ctx.db)
        .with_registry(&ctx.registry)
        .with_clock(ctx.clock());
    query.filter("custom_field_size", ">", &["5"]).unwrap();
    assert_eq!(query.result().unwrap().count(), 1);
}

#[test]
fn list_shows_every_kind() {
    let ctx = TestContext::new();
    run(&ctx, add("Size", "issue", Some("int"), &[])).unwrap();
    run(&ctx, add("Region", "project", None, &[])).unwrap();

    let text = run(&ctx, FieldCommand::List { output: OutputFormat::Text }).unwrap();
    assert_eq!(text.lines().count(), 2);

    let json = run(&ctx, FieldCommand::List { output: OutputFormat::Json }).unwrap();
    let fields: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(fields[1]["kind"], "project");
}

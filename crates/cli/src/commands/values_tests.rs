// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::resolve_actor;
use crate::commands::testing::{output, TestContext};
use crate::config::Config;
use crate::error::Error;
use cq_core::{CustomField, FieldFormat};

fn run(ctx: &TestContext, actor: Actor, field: &str, format: OutputFormat) -> Result<String> {
    let mut buf = Vec::new();
    run_impl(&ctx.db, &ctx.registry, actor, field, format, &mut buf)?;
    Ok(output(buf))
}

#[test]
fn logged_in_actor_sees_projects() {
    let ctx = TestContext::new();
    let text = run(&ctx, Actor::User(1), "project_id", OutputFormat::Text).unwrap();
    assert_eq!(text, "     1  Apollo\n");
}

#[test]
fn anonymous_user_is_never_listed() {
    let ctx = TestContext::new();
    let text = run(&ctx, Actor::User(1), "user_id", OutputFormat::Text).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("Alice"));
}

#[test]
fn anonymous_actor_sees_nothing() {
    let ctx = TestContext::new();
    let text = run(&ctx, Actor::Anonymous, "project_id", OutputFormat::Text).unwrap();
    assert!(text.is_empty());
}

#[test]
fn list_fields_offer_possible_values() {
    let ctx = TestContext::new();
    ctx.db
        .create_custom_field(
            &CustomField::new("Phase", FieldFormat::List).with_possible_values(["alpha", "beta"]),
        )
        .unwrap();
    let json = run(&ctx, Actor::Anonymous, "custom_field_phase", OutputFormat::Json).unwrap();
    let values: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        values,
        serde_json::json!([
            { "label": "alpha", "value": "alpha" },
            { "label": "beta", "value": "beta" }
        ])
    );
}

#[test]
fn unknown_field_fails() {
    let ctx = TestContext::new();
    let err = run(&ctx, Actor::User(1), "nope", OutputFormat::Text).unwrap_err();
    assert!(matches!(err, Error::Core(cq_core::Error::UnknownFilter(_))));
}

#[test]
fn actor_resolution() {
    let ctx = TestContext::new();
    assert_eq!(resolve_actor(&ctx.db, &Config::default()).unwrap(), Actor::Anonymous);

    let alice = Config {
        user: Some("alice".into()),
        ..Config::default()
    };
    assert_eq!(resolve_actor(&ctx.db, &alice).unwrap(), Actor::User(1));

    let bob = Config {
        user: Some("bob".into()),
        ..Config::default()
    };
    assert!(matches!(
        resolve_actor(&ctx.db, &bob),
        Err(Error::UnknownUser(login)) if login == "bob"
    ));
}

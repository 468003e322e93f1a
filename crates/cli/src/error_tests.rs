// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    not_initialized = { Error::NotInitialized, "not initialized: run 'costq init' first" },
    already = { Error::AlreadyInitialized("/tmp/x/.costq".into()), "already initialized at /tmp/x/.costq" },
    config = { Error::Config("bad".into()), "config error: bad" },
    import = { Error::Import("no file".into()), "import failed: no file" },
)]
fn display(err: Error, expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn filter_syntax_carries_hint() {
    let err = Error::FilterSyntax {
        expr: "project_id".into(),
        reason: "missing operator".into(),
    };
    let msg = err.to_string();
    assert!(msg.starts_with("invalid filter expression 'project_id': missing operator"));
    assert!(msg.contains("hint:"));
}

#[test]
fn unknown_user_carries_hint() {
    let msg = Error::UnknownUser("bob".into()).to_string();
    assert!(msg.contains("'bob'"));
    assert!(msg.contains("hint:"));
}

#[test]
fn core_errors_are_transparent() {
    let core = cq_core::Error::UnknownFilter("nope".into());
    let expected = core.to_string();
    let err: Error = core.into();
    assert!(matches!(err, Error::Core(cq_core::Error::UnknownFilter(_))));
    assert_eq!(err.to_string(), expected);
}

#[test]
fn io_errors_convert() {
    let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert_eq!(err.to_string(), "io error: gone");
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn vars_constants() {
    assert_eq!(vars::COSTQ_LOG, "COSTQ_LOG");
    assert_eq!(vars::COSTQ_USER, "COSTQ_USER");
    assert_eq!(vars::NO_COLOR, "NO_COLOR");
    assert_eq!(vars::COLOR, "COLOR");
}

#[parameterized(
    unset = { None, None },
    blank = { Some("  "), None },
    login = { Some("alice"), Some("alice") },
)]
fn non_blank_values(value: Option<&str>, expected: Option<&str>) {
    assert_eq!(non_blank(value.map(String::from)).as_deref(), expected);
}

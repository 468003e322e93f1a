// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    unset = { None, "warn" },
    level = { Some("debug"), "debug" },
    target = { Some("cq_core=trace"), "cq_core=trace" },
)]
fn filter_directive(directive: Option<&str>, expected: &str) {
    assert_eq!(filter(directive).to_string(), expected);
}

#[test]
fn init_twice_is_harmless() {
    init();
    init();
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing tests for `init`, `import` and `completion`.

#![allow(clippy::unwrap_used)]

use super::*;
use clap::Parser;
use yare::parameterized;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[parameterized(
    bare = { &["costq", "init"], None, None },
    user = { &["costq", "init", "--user", "alice"], None, Some("alice") },
    user_short = { &["costq", "init", "-u", "alice"], None, Some("alice") },
    database = { &["costq", "init", "--database", "data/costs.db"], Some("data/costs.db"), None },
)]
fn init(args: &[&str], database: Option<&str>, user: Option<&str>) {
    let cli = parse(args).unwrap();
    let Command::Init {
        database: got_database,
        user: got_user,
    } = cli.command
    else {
        unreachable!("expected init");
    };
    assert_eq!(got_database.as_deref(), database);
    assert_eq!(got_user.as_deref(), user);
}

#[test]
fn init_rejects_blank_user() {
    assert!(parse(&["costq", "init", "--user", "  "]).is_err());
}

#[test]
fn import_requires_file() {
    assert!(parse(&["costq", "import"]).is_err());
    let cli = parse(&["costq", "import", "data.json"]).unwrap();
    assert!(matches!(cli.command, Command::Import { file } if file == "data.json"));
}

#[parameterized(
    bash = { "bash", Shell::Bash },
    zsh = { "zsh", Shell::Zsh },
    fish = { "fish", Shell::Fish },
)]
fn completion(name: &str, expected: Shell) {
    let cli = parse(&["costq", "completion", name]).unwrap();
    assert!(matches!(cli.command, Command::Completion { shell } if shell == expected));
}

#[test]
fn completion_rejects_unknown_shell() {
    assert!(parse(&["costq", "completion", "tcsh"]).is_err());
}

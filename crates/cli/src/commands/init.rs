// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::path::Path;

use cq_core::Database;

use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn run(database: Option<String>, user: Option<String>) -> Result<()> {
    let target_path = std::env::current_dir()?;
    run_impl(&target_path, database, user, &mut std::io::stdout())
}

pub(crate) fn run_impl(
    target_path: &Path,
    database: Option<String>,
    user: Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    let config = Config { database, user };
    let work_dir = init_work_dir(target_path, &config)?;

    // Creates the file and runs migrations
    let db_path = get_db_path(&work_dir, &config);
    Database::open(&db_path)?;

    writeln!(out, "Initialized cost database at {}", work_dir.display())?;
    writeln!(out, "Database: {}", db_path.display())?;
    match &config.user {
        Some(login) => writeln!(out, "User: {}", login)?,
        None => writeln!(out, "User: anonymous")?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;

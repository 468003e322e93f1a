// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod field;
pub mod filters;
pub mod import;
pub mod init;
pub mod operators;
pub mod report;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod values;

use std::path::PathBuf;

use cq_core::{Actor, Database};
use tracing::debug;

use crate::config::{find_work_dir, get_db_path, Config};
use crate::env;
use crate::error::{Error, Result};

/// Helper to open the database from the current context.
pub fn open_db() -> Result<(Database, Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    debug!(path = %db_path.display(), "opening database");
    let db = Database::open(&db_path)?;
    Ok((db, config, work_dir))
}

/// The actor asking for available values.
///
/// `COSTQ_USER` overrides the configured login. No login means anonymous;
/// an unknown login or the anonymous user's own record is an error.
pub fn resolve_actor(db: &Database, config: &Config) -> Result<Actor> {
    let Some(login) = env::user().or_else(|| config.user.clone()) else {
        return Ok(Actor::Anonymous);
    };
    match db.find_user(&login)? {
        Some(user) if !user.anonymous => Ok(Actor::User(user.id)),
        _ => Err(Error::UnknownUser(login)),
    }
}

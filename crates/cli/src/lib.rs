// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! costq - query time and cost entries from the command line.
//!
//! This crate is the host for [`cq_core`]: it finds the project's `.costq/`
//! directory, opens the SQLite store, parses `--filter` expressions and
//! renders query results as text or JSON.
//!
//! ```rust,ignore
//! use costq::{find_work_dir, get_db_path, Config};
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let db = cq_core::Database::open(&get_db_path(&work_dir, &config))?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod env;
pub mod expr;
pub mod help;
pub mod logging;

pub mod config;
pub mod error;

pub use cli::{Cli, Command, FieldCommand, FieldDefinitionArgs, LimitArgs, OutputFormat};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config};
pub use error::{Error, Result};
pub use expr::{parse_filter, FilterExpr};

use clap::CommandFactory;
use clap_complete::generate;

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { database, user } => commands::init::run(database, user),
        Command::Import { file } => commands::import::run(&file),
        Command::Operators { output } => commands::operators::run(output),
        Command::Filters { custom, output } => commands::filters::run(custom, output),
        Command::Values { field, output } => commands::values::run(&field, output),
        Command::Report {
            filters,
            limit,
            output,
        } => commands::report::run(&filters, limit.limit, output),
        Command::Field(cmd) => commands::field::run(cmd),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "costq", &mut std::io::stdout());
            Ok(())
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

pub use args::{FieldDefinitionArgs, LimitArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "costq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Filter time and cost entries with typed, named filters")]
#[command(
    long_about = "Filter time and cost entries with typed, named filters.\n\n\
    Time entries and cost entries are merged into one dataset. Static filters cover the \
    fixed columns; custom fields of issues add their own filters."
)]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    /// Run as if costq was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a cost database in the current directory
    #[command(after_help = colors::examples("\
Examples:
  costq init                            Use .costq/costs.db, anonymous actor
  costq init --user alice               Act as user 'alice'
  costq init --database data/costs.db   Store the database elsewhere"))]
    Init {
        /// Database path, absolute or relative to the project root
        #[arg(long, value_parser = non_empty_string)]
        database: Option<String>,

        /// Login of the user acting as the current actor
        #[arg(long, short, value_parser = non_empty_string)]
        user: Option<String>,
    },

    /// Import records and entries from a JSON file
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  costq import data.json    Load every record in data.json")
    )]
    Import {
        /// JSON file with projects, users, issues, custom fields and entries
        file: String,
    },

    /// List filter operators
    Operators {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List available filter types and their operators
    #[command(after_help = colors::examples("\
Examples:
  costq filters              Static and custom field filters
  costq filters --custom     Custom field filters only
  costq filters -o json      Machine-readable listing"))]
    Filters {
        /// Only list filters generated from custom fields
        #[arg(long)]
        custom: bool,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List the values a filter offers to the current actor
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  costq values project_id            Projects visible to the actor
  costq values custom_field_phase    Possible values of a list field")
    )]
    Values {
        /// Filter name
        field: String,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Run a query over time and cost entries
    #[command(after_help = colors::examples("\
Examples:
  costq report                                     Every entry
  costq report -f 'project_id = 3'                 Entries of project 3
  costq report -f 'spent_on w' -f 'user_id = 2'    This week, user 2
  costq report -f 'updated_on <>d 2024-01-01,2024-12-31'
  costq report -f 'status_id c' -o json            Entries on closed issues

Filter Expressions (-f/--filter):
  Syntax: FIELD OPERATOR [VALUE[,VALUE...]]
  Compact: project_id=3, hours>=2 (symbol-only operators)
  Escapes: subject = Hello\\, world (one value with a comma)"))]
    Report {
        /// Filter expression (repeat to combine with AND)
        #[arg(long = "filter", short = 'f')]
        filters: Vec<String>,

        #[command(flatten)]
        limit: LimitArgs,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Manage custom field definitions
    #[command(subcommand)]
    Field(FieldCommand),

    /// Generate shell completions
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  costq completion bash > ~/.local/share/bash-completion/completions/costq
  costq completion zsh > ~/.zfunc/_costq
  costq completion fish > ~/.config/fish/completions/costq.fish")
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Custom field metadata commands. Every write refreshes the custom field
/// filters on the next query.
#[derive(Subcommand)]
pub enum FieldCommand {
    /// Define a new custom field
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  costq field add Size -F int                      Integer issue field
  costq field add Phase -F list --value a,b,c      List field with values
  costq field add Region --kind project            Project field (no filter)")
    )]
    Add {
        /// Field name
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Customized record: issue, project, user
        #[arg(long, default_value = "issue")]
        kind: String,

        #[command(flatten)]
        definition: FieldDefinitionArgs,
    },

    /// Change a custom field definition
    #[command(arg_required_else_help = true)]
    Update {
        /// Field id
        id: i64,

        /// New field name
        #[arg(long, value_parser = non_empty_string)]
        name: Option<String>,

        #[command(flatten)]
        definition: FieldDefinitionArgs,
    },

    /// Delete a custom field and its values
    #[command(arg_required_else_help = true)]
    Remove {
        /// Field id
        id: i64,
    },

    /// List custom field definitions
    List {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Set a custom value on an issue
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  costq field set 3 7 5     Set field 3 of issue 7 to '5'")
    )]
    Set {
        /// Field id
        id: i64,

        /// Issue id
        issue: i64,

        /// Raw value
        value: String,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use clap::Args;

/// Limit arguments for report rows.
#[derive(Args, Clone, Debug, Default)]
pub struct LimitArgs {
    /// Maximum number of rows to print (totals still cover every match)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Custom field definition options shared by `field add` and `field update`.
#[derive(Args, Clone, Debug, Default)]
pub struct FieldDefinitionArgs {
    /// Value format: string, text, list, bool, int, float, date
    #[arg(long, short = 'F')]
    pub format: Option<String>,

    /// Possible value of a list field (repeat or comma-separate)
    #[arg(long = "value", value_delimiter = ',')]
    pub values: Vec<String>,

    /// Mark the field as searchable
    #[arg(long)]
    pub searchable: Option<bool>,
}

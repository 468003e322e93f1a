// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// clap styles matching the palette in [`colors`].
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    Styles::styled()
        .header(colors::HEADER)
        .usage(colors::HEADER)
        .literal(colors::LITERAL)
        .placeholder(colors::CONTEXT)
        .valid(colors::CONTEXT)
}

/// Filter expression syntax, shown after the main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  costq init --user alice                 Create .costq/ in this directory
  costq import data.json                  Load projects, issues and entries
  costq filters                           List filter types and operators
  costq report -f 'spent_on w'            Entries spent this week

Filter Expressions:
  Syntax: FIELD OPERATOR [VALUE[,VALUE...]]
  Escapes: '\\,' for a comma inside a value, '\\\\' for a backslash
  Operators: run 'costq operators' for the full catalogue",
    )
}

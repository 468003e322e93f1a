// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for help and report output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use anstyle::{Ansi256Color, Color, Style};

use crate::env;

/// Section headers: steel blue.
pub const HEADER: Style = fg(74);
/// Commands and literals: light grey.
pub const LITERAL: Style = fg(250);
/// Placeholders, defaults and totals: medium grey.
pub const CONTEXT: Style = fg(245);

const fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Wraps `text` in the escape sequences of `style`.
pub fn paint(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

pub fn header(text: &str) -> String {
    paint(HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(LITERAL, text)
}

pub fn context(text: &str) -> String {
    paint(CONTEXT, text)
}

/// Colorize an examples help block.
///
/// Lines ending with `:` are headers. Other lines are split at the first run
/// of two or more spaces into a command (literal) and a description (plain).
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{indent}{}", header(trimmed));
            }
            match find_description_start(trimmed) {
                Some(end) => format!(
                    "{indent}{}{}",
                    literal(&trimmed[..end]),
                    &trimmed[end..]
                ),
                None => line.to_string(),
            }
        })
        .collect();
    lines.join("\n")
}

/// Byte offset where the description starts: the first run of 2+ spaces.
pub fn find_description_start(line: &str) -> Option<usize> {
    let start = line.find("  ")?;
    line[start..].find(|c: char| c != ' ').map(|_| start)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;

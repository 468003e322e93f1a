// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Custom field metadata maintenance. Writes invalidate the registry's
//! custom field filters; other processes pick the change up through the
//! metadata stamp on their next read.

use std::io::Write;

use cq_core::filter::FieldSource;
use cq_core::{
    CustomField, CustomFieldKind, CustomFieldSource, Database, FieldFormat, FilterRegistry,
};

use super::open_db;
use crate::cli::{FieldCommand, FieldDefinitionArgs, OutputFormat};
use crate::display::format_custom_field_line;
use crate::error::Result;

pub fn run(cmd: FieldCommand) -> Result<()> {
    let (db, _, _) = open_db()?;
    run_impl(&db, FilterRegistry::global(), cmd, &mut std::io::stdout())
}

pub(crate) fn run_impl(
    db: &Database,
    registry: &FilterRegistry,
    cmd: FieldCommand,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        FieldCommand::Add {
            name,
            kind,
            definition,
        } => add(db, registry, name, &kind, definition, out),
        FieldCommand::Update {
            id,
            name,
            definition,
        } => update(db, registry, id, name, definition, out),
        FieldCommand::Remove { id } => {
            db.delete_custom_field(id)?;
            registry.invalidate();
            writeln!(out, "Removed custom field {}", id)?;
            Ok(())
        }
        FieldCommand::List { output } => list(db, output, out),
        FieldCommand::Set { id, issue, value } => {
            db.set_custom_value(id, issue, &value)?;
            writeln!(out, "Set custom field {} of issue {} to '{}'", id, issue, value)?;
            Ok(())
        }
    }
}

fn add(
    db: &Database,
    registry: &FilterRegistry,
    name: String,
    kind: &str,
    definition: FieldDefinitionArgs,
    out: &mut impl Write,
) -> Result<()> {
    let format: FieldFormat = definition.format.as_deref().unwrap_or("string").parse()?;
    let kind: CustomFieldKind = kind.parse()?;
    let mut field = CustomField::new(name, format)
        .with_kind(kind)
        .with_possible_values(definition.values);
    field.searchable = definition.searchable.unwrap_or(false);

    let id = db.create_custom_field(&field)?;
    registry.invalidate();
    writeln!(out, "Created custom field {}: {}", id, field.name)?;
    if let Some(filter) = filter_name(db, registry, id)? {
        writeln!(out, "Filter: {}", filter)?;
    }
    Ok(())
}

fn update(
    db: &Database,
    registry: &FilterRegistry,
    id: i64,
    name: Option<String>,
    definition: FieldDefinitionArgs,
    out: &mut impl Write,
) -> Result<()> {
    let mut field = db.custom_field(id)?;
    if let Some(name) = name {
        field.name = name;
    }
    if let Some(format) = definition.format {
        field.format = format.parse()?;
    }
    if !definition.values.is_empty() {
        field.possible_values = definition.values;
    }
    if let Some(searchable) = definition.searchable {
        field.searchable = searchable;
    }

    db.update_custom_field(&field)?;
    registry.invalidate();
    writeln!(out, "Updated custom field {}: {}", id, field.name)?;
    if let Some(filter) = filter_name(db, registry, id)? {
        writeln!(out, "Filter: {}", filter)?;
    }
    Ok(())
}

fn list(db: &Database, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let fields = db.custom_fields()?;
    match format {
        OutputFormat::Text => {
            for field in &fields {
                writeln!(out, "{}", format_custom_field_line(field))?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&fields)?)?;
        }
    }
    Ok(())
}

/// Name of the filter generated for custom field `id`, if it produces one.
fn filter_name(db: &Database, registry: &FilterRegistry, id: i64) -> Result<Option<String>> {
    Ok(registry
        .custom_field_filters(db)?
        .iter()
        .find(|f| matches!(f.source, FieldSource::Custom { id: field_id, .. } if field_id == id))
        .map(|f| f.name.clone()))
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;

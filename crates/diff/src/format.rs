// crates/diff/src/format.rs
use serde_json::Value;
use std::io::{self, Write};

use crate::diff::{ChangeKind, EntityChange, PropertyChange, ResourceChange, TemplateDiff};
use crate::template::{ScalarField, Section};

/// Render a [`TemplateDiff`] as human readable text.
///
/// Sections are written in template order, each followed by a blank line.
/// An empty diff writes nothing.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn format_differences<W: Write + ?Sized>(
    out: &mut W,
    diff: &TemplateDiff,
) -> io::Result<()> {
    let mut any_scalar = false;
    for field in ScalarField::ALL {
        if let Some(change) = diff.scalar(field) {
            let key = field.key();
            match change.kind() {
                ChangeKind::Added => writeln!(out, "[+] {key}: {}", render(change.new.as_ref()))?,
                ChangeKind::Removed => writeln!(out, "[-] {key}: {}", render(change.old.as_ref()))?,
                ChangeKind::Updated => writeln!(
                    out,
                    "[~] {key}: {} to {}",
                    render(change.old.as_ref()),
                    render(change.new.as_ref())
                )?,
            }
            any_scalar = true;
        }
    }
    if any_scalar {
        writeln!(out)?;
    }

    for section in Section::ALL {
        if section == Section::Resources {
            write_resources(out, &diff.resources)?;
        } else {
            write_entities(out, section.key(), section.entity_label(), diff.entities(section))?;
        }
    }
    write_entities(out, "Other Changes", "Unknown", &diff.unknown)
}

/// Convenience wrapper returning the rendering as a `String`.
#[must_use]
pub fn format_to_string(diff: &TemplateDiff) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = format_differences(&mut buf, diff);
    String::from_utf8_lossy(&buf).into_owned()
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "<none>".to_string(), Value::to_string)
}

fn write_entities<W: Write + ?Sized>(
    out: &mut W,
    title: &str,
    label: &str,
    entities: &[EntityChange],
) -> io::Result<()> {
    if entities.is_empty() {
        return Ok(());
    }
    writeln!(out, "{title}")?;
    for entity in entities {
        let id = &entity.logical_id;
        match entity.kind {
            ChangeKind::Added => {
                writeln!(out, "[+] {label} {id}: {}", render(entity.new.as_ref()))?;
            }
            ChangeKind::Removed => {
                writeln!(out, "[-] {label} {id}: {}", render(entity.old.as_ref()))?;
            }
            ChangeKind::Updated => {
                writeln!(out, "[~] {label} {id}")?;
                let changes: Vec<&PropertyChange> = entity.changes.iter().collect();
                write_tree(out, &changes)?;
            }
        }
    }
    writeln!(out)
}

fn write_resources<W: Write + ?Sized>(
    out: &mut W,
    resources: &[ResourceChange],
) -> io::Result<()> {
    if resources.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", Section::Resources.key())?;
    for resource in resources {
        let marker = resource.kind.marker();
        writeln!(
            out,
            "{marker} {} {}",
            resource.resource_type(),
            resource.logical_id
        )?;
        if resource.kind != ChangeKind::Updated {
            continue;
        }

        let type_change = resource.type_changed().then(|| PropertyChange {
            path: vec!["Type".to_string()],
            old: resource.old_type.clone().map(Value::String),
            new: resource.new_type.clone().map(Value::String),
        });
        let changes: Vec<&PropertyChange> = type_change
            .iter()
            .chain(&resource.property_changes)
            .chain(&resource.other_changes)
            .collect();
        write_tree(out, &changes)?;
    }
    writeln!(out)
}

fn write_tree<W: Write + ?Sized>(out: &mut W, changes: &[&PropertyChange]) -> io::Result<()> {
    for (i, change) in changes.iter().enumerate() {
        let last = i + 1 == changes.len();
        let (branch, indent) = if last { (" └─", "    ") } else { (" ├─", " │  ") };
        let path = change.path_string();
        let label = if path.is_empty() { "(value)" } else { path.as_str() };

        match change.kind() {
            ChangeKind::Added => {
                writeln!(out, "{branch} [+] {label}: {}", render(change.new.as_ref()))?;
            }
            ChangeKind::Removed => {
                writeln!(out, "{branch} [-] {label}: {}", render(change.old.as_ref()))?;
            }
            ChangeKind::Updated => {
                writeln!(out, "{branch} [~] {label}")?;
                writeln!(out, "{indent} ├─ [-] {}", render(change.old.as_ref()))?;
                writeln!(out, "{indent} └─ [+] {}", render(change.new.as_ref()))?;
            }
        }
    }
    Ok(())
}

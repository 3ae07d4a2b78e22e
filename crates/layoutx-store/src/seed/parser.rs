//! Seed parser with validation
//!
//! Checks schema version, id/handle uniqueness, element types, attribute
//! names, widths, and that every field placement names a known field.

use crate::errors::{seed_validation, Result};
use crate::repo::SqliteRepo;
use crate::seed::format_v0::{SeedElement, SeedLayout, SeedV0};
use layoutx_core::model::{AttributeCatalog, ElementType, FieldId, Width};
use rusqlite::Connection;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    parse_seed_file_with_db(path, None)
}

/// Parse a seed file, resolving field references against `conn` as well
pub fn parse_seed_file_with_db(path: &Path, conn: Option<&Connection>) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| seed_validation(&format!("Failed to read seed file: {}", e)))?;

    parse_seed_str_with_db(&content, conn)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    parse_seed_str_with_db(content, None)
}

/// Parse a seed from a string, resolving field references against `conn` as well
pub fn parse_seed_str_with_db(content: &str, conn: Option<&Connection>) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed, conn)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0, conn: Option<&Connection>) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut field_ids = HashSet::new();
    let mut handles = HashSet::new();
    for field in &seed.fields {
        if !field_ids.insert(field.id) {
            return Err(seed_validation(&format!("Duplicate field id {}", field.id)));
        }
        if !handles.insert(field.handle.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate field handle '{}'",
                field.handle
            )));
        }
    }

    let mut layout_ids = HashSet::new();
    for layout in &seed.layouts {
        if !layout_ids.insert(layout.id.as_str()) {
            return Err(seed_validation(&format!("Duplicate layout id '{}'", layout.id)));
        }
        validate_layout(layout, &field_ids, conn)?;
    }

    Ok(())
}

fn validate_layout(
    layout: &SeedLayout,
    seed_fields: &HashSet<FieldId>,
    conn: Option<&Connection>,
) -> Result<()> {
    let mut uids = HashSet::new();

    for group in &layout.groups {
        if group.name.trim().is_empty() {
            return Err(seed_validation(&format!(
                "Layout '{}' has a group with a blank name",
                layout.id
            )));
        }

        for element in &group.elements {
            if let Some(uid) = &element.uid {
                if !uids.insert(uid.as_str()) {
                    return Err(seed_validation(&format!(
                        "Duplicate uid '{}' in layout '{}'",
                        uid, layout.id
                    )));
                }
            }
            validate_element(layout, element, seed_fields, conn)?;
        }
    }

    Ok(())
}

fn validate_element(
    layout: &SeedLayout,
    element: &SeedElement,
    seed_fields: &HashSet<FieldId>,
    conn: Option<&Connection>,
) -> Result<()> {
    if let Some(width) = element.width {
        Width::new(width).map_err(|_| {
            seed_validation(&format!(
                "Width {} in layout '{}' is outside 1..=100",
                width, layout.id
            ))
        })?;
    }

    match ElementType::parse(&element.element_type) {
        Some(ElementType::Field) => {
            let Some(field_id) = element.field_id else {
                return Err(seed_validation(&format!(
                    "FieldPlacement in layout '{}' has no field_id",
                    layout.id
                )));
            };
            if !seed_fields.contains(&field_id) && !field_in_db(conn, field_id)? {
                return Err(seed_validation(&format!(
                    "Layout '{}' references unknown field {}",
                    layout.id, field_id
                )));
            }
        }
        Some(ElementType::Attribute) => {
            let Some(attribute) = element.attribute.as_deref() else {
                return Err(seed_validation(&format!(
                    "AttributePlacement in layout '{}' has no attribute",
                    layout.id
                )));
            };
            AttributeCatalog::resolve(layout.owner_kind, attribute).map_err(|e| {
                seed_validation(&format!("Layout '{}': {}", layout.id, e))
            })?;
        }
        Some(ElementType::Ui(_)) => {}
        None => {
            return Err(seed_validation(&format!(
                "Unknown element type '{}' in layout '{}'",
                element.element_type, layout.id
            )));
        }
    }

    Ok(())
}

fn field_in_db(conn: Option<&Connection>, field_id: FieldId) -> Result<bool> {
    match conn {
        Some(conn) => Ok(SqliteRepo::get_field(conn, field_id)?.is_some()),
        None => Ok(false),
    }
}

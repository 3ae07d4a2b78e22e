//! Seed importer orchestration

use crate::errors::{from_rusqlite, Result};
use crate::repo::SqliteRepo;
use crate::seed::format_v0::{SeedElement, SeedLayout, SeedV0};
use crate::seed::{compute_seed_digest, parse_seed_file_with_db, parse_seed_str_with_db};
use layoutx_core::errors::{ExError, ExErrorKind};
use layoutx_core::model::{
    new_uid, Element, ElementType, FieldDescriptor, FieldId, Group, Layout, PlacementPatch, Width,
};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;

/// What an import wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// SHA-256 of the canonical seed
    pub digest: String,
    pub fields: usize,
    pub layouts: usize,
}

/// Import a seed file into the database
///
/// Parses and validates the seed (field references may point at fields
/// already in the database), then writes all fields and layouts in one
/// transaction. Layouts already present are overwritten.
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<ImportSummary> {
    let seed = parse_seed_file_with_db(path, Some(&*conn))?;
    write_seed(&seed, conn)
}

/// Import a seed held in memory
pub fn import_seed_str(content: &str, conn: &mut Connection) -> Result<ImportSummary> {
    let seed = parse_seed_str_with_db(content, Some(&*conn))?;
    write_seed(&seed, conn)
}

fn write_seed(seed: &SeedV0, conn: &mut Connection) -> Result<ImportSummary> {
    let digest = compute_seed_digest(seed)?;

    let tx = conn.transaction().map_err(from_rusqlite)?;

    let mut fields: HashMap<FieldId, FieldDescriptor> = HashMap::new();
    for seed_field in &seed.fields {
        let field = FieldDescriptor::new(
            seed_field.id,
            &seed_field.name,
            &seed_field.handle,
            &seed_field.kind,
        );
        SqliteRepo::persist_field(&tx, &field)?;
        fields.insert(field.id, field);
    }

    for seed_layout in &seed.layouts {
        let layout = build_layout(&tx, seed_layout, &fields)?;
        SqliteRepo::upsert_layout(&tx, &layout)?;
    }

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        digest = %digest,
        fields = seed.fields.len(),
        layouts = seed.layouts.len(),
        "seed imported"
    );

    Ok(ImportSummary {
        digest,
        fields: seed.fields.len(),
        layouts: seed.layouts.len(),
    })
}

fn build_layout(
    conn: &Connection,
    seed_layout: &SeedLayout,
    fields: &HashMap<FieldId, FieldDescriptor>,
) -> Result<Layout> {
    let mut layout = Layout::new(seed_layout.id.clone(), seed_layout.owner_kind);

    for seed_group in &seed_layout.groups {
        let mut group = Group::new(seed_group.name.clone());
        for seed_element in &seed_group.elements {
            let element = build_element(conn, seed_layout, seed_element, fields)?;
            group.elements.push(element);
        }
        layout.groups.push(group);
    }

    Ok(layout)
}

fn build_element(
    conn: &Connection,
    seed_layout: &SeedLayout,
    seed: &SeedElement,
    fields: &HashMap<FieldId, FieldDescriptor>,
) -> Result<Element> {
    let uid = seed.uid.clone().unwrap_or_else(new_uid);

    let mut element = match ElementType::parse(&seed.element_type) {
        Some(ElementType::Field) => {
            let field_id = seed
                .field_id
                .ok_or_else(|| internal("field placement without field_id"))?;
            let field = match fields.get(&field_id) {
                Some(field) => field.clone(),
                None => SqliteRepo::get_field(conn, field_id)?
                    .ok_or_else(|| internal("field vanished during import"))?,
            };
            Element::field(uid, field)
        }
        Some(ElementType::Attribute) => {
            let attribute = seed
                .attribute
                .as_deref()
                .ok_or_else(|| internal("attribute placement without attribute"))?;
            Element::attribute(uid, seed_layout.owner_kind, attribute).map_err(ExError::from)?
        }
        Some(ElementType::Ui(kind)) => Element::ui_of(uid, kind),
        None => return Err(internal("unknown element type passed validation")),
    };

    let width = seed
        .width
        .map(Width::new)
        .transpose()
        .map_err(ExError::from)?;
    element.apply_patch(&PlacementPatch {
        required: Some(seed.required),
        label: Some(seed.label.clone()),
        instructions: Some(seed.instructions.clone()),
        tip: Some(seed.tip.clone()),
        warning: Some(seed.warning.clone()),
        width,
    });

    Ok(element)
}

fn internal(message: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("seed_import")
        .with_message(message)
}

//! SQLite repository for fields and layouts
//!
//! Every function takes a `&Connection`; pass a `&Transaction` (it derefs to
//! a connection) to group writes atomically.

use crate::errors::{corrupt_row, from_rusqlite, Result};
use layoutx_core::model::{
    AttributeDescriptors, AttributePlacement, Element, ElementKind, ElementType, FieldDescriptor,
    FieldId, FieldPlacement, Group, Layout, OwnerKind, PlacementProps, UiElement, Width,
};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;

/// Element row joined with its field, if any
struct ElementRow {
    group_position: i64,
    uid: String,
    element_type: String,
    field_id: Option<FieldId>,
    field_name: Option<String>,
    field_handle: Option<String>,
    field_kind: Option<String>,
    attribute: Option<String>,
    mandatory: Option<bool>,
    requirable: Option<bool>,
    translatable: Option<bool>,
    required: bool,
    label: Option<String>,
    instructions: Option<String>,
    tip: Option<String>,
    warning: Option<String>,
    width: i64,
}

/// SQLite repository for fields and layouts
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert or update a reusable field
    pub fn persist_field(conn: &Connection, field: &FieldDescriptor) -> Result<()> {
        conn.execute(
            "INSERT INTO fields (id, name, handle, kind)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                handle = excluded.handle,
                kind = excluded.kind",
            rusqlite::params![field.id, field.name, field.handle, field.kind],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    pub fn get_field(conn: &Connection, field_id: FieldId) -> Result<Option<FieldDescriptor>> {
        conn.query_row(
            "SELECT id, name, handle, kind FROM fields WHERE id = ?1",
            [field_id],
            |row| {
                Ok(FieldDescriptor {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    handle: row.get(2)?,
                    kind: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// All fields ordered by id
    pub fn list_fields(conn: &Connection) -> Result<Vec<FieldDescriptor>> {
        let mut stmt = conn
            .prepare("SELECT id, name, handle, kind FROM fields ORDER BY id")
            .map_err(from_rusqlite)?;

        let fields = stmt
            .query_map([], |row| {
                Ok(FieldDescriptor {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    handle: row.get(2)?,
                    kind: row.get(3)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(fields)
    }

    /// Delete a field; its placements go with it
    ///
    /// Returns false if the field did not exist.
    pub fn delete_field(conn: &Connection, field_id: FieldId) -> Result<bool> {
        let deleted = conn
            .execute("DELETE FROM fields WHERE id = ?1", [field_id])
            .map_err(from_rusqlite)?;
        Ok(deleted > 0)
    }

    /// Create or overwrite a layout, groups and elements included
    pub fn upsert_layout(conn: &Connection, layout: &Layout) -> Result<()> {
        conn.execute(
            "INSERT INTO layouts (id, owner_kind, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                owner_kind = excluded.owner_kind,
                updated_at = excluded.updated_at",
            rusqlite::params![
                layout.id,
                layout.owner_kind.as_str(),
                chrono::Utc::now().timestamp()
            ],
        )
        .map_err(from_rusqlite)?;

        Self::write_contents(conn, layout)
    }

    /// Replace the groups and elements of an existing layout
    ///
    /// Returns false, writing nothing, if the layout does not exist.
    pub fn replace_layout(conn: &Connection, layout: &Layout) -> Result<bool> {
        let updated = conn
            .execute(
                "UPDATE layouts SET updated_at = ?2 WHERE id = ?1",
                rusqlite::params![layout.id, chrono::Utc::now().timestamp()],
            )
            .map_err(from_rusqlite)?;

        if updated == 0 {
            return Ok(false);
        }

        Self::write_contents(conn, layout)?;
        Ok(true)
    }

    fn write_contents(conn: &Connection, layout: &Layout) -> Result<()> {
        conn.execute(
            "DELETE FROM layout_elements WHERE layout_id = ?1",
            [&layout.id],
        )
        .map_err(from_rusqlite)?;
        conn.execute("DELETE FROM layout_groups WHERE layout_id = ?1", [&layout.id])
            .map_err(from_rusqlite)?;

        let mut group_stmt = conn
            .prepare("INSERT INTO layout_groups (layout_id, position, name) VALUES (?1, ?2, ?3)")
            .map_err(from_rusqlite)?;
        let mut element_stmt = conn
            .prepare(
                "INSERT INTO layout_elements (
                    layout_id, group_position, position, uid, element_type,
                    field_id, attribute, mandatory, requirable, translatable,
                    required, label, instructions, tip, warning, width
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            )
            .map_err(from_rusqlite)?;

        for (group_position, group) in layout.groups.iter().enumerate() {
            group_stmt
                .execute(rusqlite::params![layout.id, group_position as i64, group.name])
                .map_err(from_rusqlite)?;

            for (position, element) in group.elements.iter().enumerate() {
                let (field_id, attribute, descriptors) = match &element.kind {
                    ElementKind::Field(f) => (Some(f.field.id), None, None),
                    ElementKind::Attribute(a) => {
                        (None, Some(a.attribute.as_str()), Some(a.descriptors))
                    }
                    ElementKind::Ui(_) => (None, None, None),
                };
                let props = element.props();

                element_stmt
                    .execute(rusqlite::params![
                        layout.id,
                        group_position as i64,
                        position as i64,
                        element.uid,
                        element.type_tag(),
                        field_id,
                        attribute,
                        descriptors.map(|d| d.mandatory),
                        descriptors.map(|d| d.requirable),
                        descriptors.map(|d| d.translatable),
                        props.map(|p| p.required).unwrap_or(false),
                        props.and_then(|p| p.label.as_deref()),
                        props.and_then(|p| p.instructions.as_deref()),
                        props.and_then(|p| p.tip.as_deref()),
                        props.and_then(|p| p.warning.as_deref()),
                        i64::from(element.width().get()),
                    ])
                    .map_err(from_rusqlite)?;
            }
        }

        tracing::debug!(
            layout_id = %layout.id,
            groups = layout.groups.len(),
            elements = layout.element_count(),
            "layout rows written"
        );
        Ok(())
    }

    /// Load a layout with every field placement's descriptor joined in
    pub fn load_layout(conn: &Connection, layout_id: &str) -> Result<Option<Layout>> {
        let owner_kind: Option<String> = conn
            .query_row(
                "SELECT owner_kind FROM layouts WHERE id = ?1",
                [layout_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        let Some(owner_kind) = owner_kind else {
            return Ok(None);
        };
        let owner_kind: OwnerKind = owner_kind
            .parse()
            .map_err(|_| corrupt_row(layout_id, format!("unknown owner kind '{}'", owner_kind)))?;

        let mut layout = Layout::new(layout_id, owner_kind);
        let mut group_index = HashMap::new();

        let mut stmt = conn
            .prepare("SELECT position, name FROM layout_groups WHERE layout_id = ?1 ORDER BY position")
            .map_err(from_rusqlite)?;
        let groups = stmt
            .query_map([layout_id], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        for (position, name) in groups {
            group_index.insert(position, layout.groups.len());
            layout.groups.push(Group::new(name));
        }

        let mut stmt = conn
            .prepare(
                "SELECT e.group_position, e.uid, e.element_type,
                        e.field_id, f.name, f.handle, f.kind,
                        e.attribute, e.mandatory, e.requirable, e.translatable,
                        e.required, e.label, e.instructions, e.tip, e.warning, e.width
                 FROM layout_elements e
                 LEFT JOIN fields f ON f.id = e.field_id
                 WHERE e.layout_id = ?1
                 ORDER BY e.group_position, e.position",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([layout_id], |row| {
                Ok(ElementRow {
                    group_position: row.get(0)?,
                    uid: row.get(1)?,
                    element_type: row.get(2)?,
                    field_id: row.get(3)?,
                    field_name: row.get(4)?,
                    field_handle: row.get(5)?,
                    field_kind: row.get(6)?,
                    attribute: row.get(7)?,
                    mandatory: row.get(8)?,
                    requirable: row.get(9)?,
                    translatable: row.get(10)?,
                    required: row.get(11)?,
                    label: row.get(12)?,
                    instructions: row.get(13)?,
                    tip: row.get(14)?,
                    warning: row.get(15)?,
                    width: row.get(16)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        for row in rows {
            let Some(&index) = group_index.get(&row.group_position) else {
                return Err(corrupt_row(
                    layout_id,
                    format!("element {} has no group at {}", row.uid, row.group_position),
                ));
            };
            let element = element_from_row(layout_id, row)?;
            layout.groups[index].elements.push(element);
        }

        Ok(Some(layout))
    }
}

fn element_from_row(layout_id: &str, row: ElementRow) -> Result<Element> {
    let width = Width::new(row.width)
        .map_err(|_| corrupt_row(layout_id, format!("element {} has width {}", row.uid, row.width)))?;

    let props = PlacementProps {
        required: row.required,
        label: row.label,
        instructions: row.instructions,
        tip: row.tip,
        warning: row.warning,
        width,
    };

    let kind = match ElementType::parse(&row.element_type) {
        Some(ElementType::Field) => {
            let (Some(id), Some(name), Some(handle), Some(kind)) =
                (row.field_id, row.field_name, row.field_handle, row.field_kind)
            else {
                return Err(corrupt_row(
                    layout_id,
                    format!("field placement {} has no field", row.uid),
                ));
            };
            ElementKind::Field(FieldPlacement {
                field: FieldDescriptor {
                    id,
                    name,
                    handle,
                    kind,
                },
                props,
            })
        }
        Some(ElementType::Attribute) => {
            let Some(attribute) = row.attribute else {
                return Err(corrupt_row(
                    layout_id,
                    format!("attribute placement {} has no attribute", row.uid),
                ));
            };
            ElementKind::Attribute(AttributePlacement {
                attribute,
                descriptors: AttributeDescriptors {
                    mandatory: row.mandatory.unwrap_or(false),
                    requirable: row.requirable.unwrap_or(false),
                    translatable: row.translatable.unwrap_or(false),
                },
                props,
            })
        }
        Some(ElementType::Ui(kind)) => ElementKind::Ui(UiElement { kind, width }),
        None => {
            return Err(corrupt_row(
                layout_id,
                format!("element {} has unknown type '{}'", row.uid, row.element_type),
            ))
        }
    };

    Ok(Element { uid: row.uid, kind })
}

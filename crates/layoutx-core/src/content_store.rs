use std::collections::{BTreeMap, HashMap};

use crate::errors::{LayoutError, Result};
use crate::model::{FieldDescriptor, FieldId, Layout};

/// System of record for layouts and the reusable fields they reference
///
/// Injected into the `Reconciler` at construction. Implementations own the
/// durability and isolation boundary around a load-then-persist pair.
pub trait ContentStore {
    /// Load a layout with every field placement's descriptor resolved
    ///
    /// # Errors
    ///
    /// `LayoutNotFound` if no layout has this id.
    fn load_layout(&self, layout_id: &str) -> Result<Layout>;

    /// Resolve a reusable field by id
    ///
    /// # Errors
    ///
    /// `UnresolvedFieldReference` if the field does not exist.
    fn resolve_field(&self, field_id: FieldId) -> Result<FieldDescriptor>;

    /// Replace the stored layout with `layout` and return the stored form
    ///
    /// # Errors
    ///
    /// `LayoutNotFound` if the layout was never created, `Persistence` on
    /// storage failure.
    fn persist_layout(&mut self, layout: Layout) -> Result<Layout>;
}

impl<T: ContentStore + ?Sized> ContentStore for &mut T {
    fn load_layout(&self, layout_id: &str) -> Result<Layout> {
        (**self).load_layout(layout_id)
    }

    fn resolve_field(&self, field_id: FieldId) -> Result<FieldDescriptor> {
        (**self).resolve_field(field_id)
    }

    fn persist_layout(&mut self, layout: Layout) -> Result<Layout> {
        (**self).persist_layout(layout)
    }
}

/// In-memory content store
///
/// HashMap-backed, single-threaded. Used by tests and by embedders that keep
/// their catalog in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    layouts: HashMap<String, Layout>,
    fields: BTreeMap<FieldId, FieldDescriptor>,
    persist_count: usize,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a reusable field
    pub fn insert_field(&mut self, field: FieldDescriptor) {
        self.fields.insert(field.id, field);
    }

    /// Remove a field
    ///
    /// Layouts still placing it are left as they are; the next update that
    /// keeps such a placement fails with `UnresolvedFieldReference`.
    pub fn remove_field(&mut self, field_id: FieldId) -> Option<FieldDescriptor> {
        self.fields.remove(&field_id)
    }

    /// Register a layout as created by the surrounding content system
    pub fn insert_layout(&mut self, layout: Layout) {
        self.layouts.insert(layout.id.clone(), layout);
    }

    /// Stored layout, bypassing the `ContentStore` error mapping
    pub fn get_layout(&self, layout_id: &str) -> Option<&Layout> {
        self.layouts.get(layout_id)
    }

    /// Fields ordered by id
    pub fn list_fields(&self) -> Vec<&FieldDescriptor> {
        self.fields.values().collect()
    }

    /// Number of successful `persist_layout` calls
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

impl ContentStore for MemoryContentStore {
    fn load_layout(&self, layout_id: &str) -> Result<Layout> {
        self.layouts
            .get(layout_id)
            .cloned()
            .ok_or_else(|| LayoutError::LayoutNotFound {
                layout_id: layout_id.to_string(),
            })
    }

    fn resolve_field(&self, field_id: FieldId) -> Result<FieldDescriptor> {
        self.fields
            .get(&field_id)
            .cloned()
            .ok_or(LayoutError::UnresolvedFieldReference { field_id })
    }

    fn persist_layout(&mut self, layout: Layout) -> Result<Layout> {
        if !self.layouts.contains_key(&layout.id) {
            return Err(LayoutError::LayoutNotFound {
                layout_id: layout.id,
            });
        }

        self.layouts.insert(layout.id.clone(), layout.clone());
        self.persist_count += 1;
        Ok(layout)
    }
}

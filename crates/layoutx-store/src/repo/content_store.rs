use layoutx_core::errors::{LayoutError, Result};
use layoutx_core::model::{FieldDescriptor, FieldId, Layout};
use layoutx_core::ContentStore;
use rusqlite::Connection;

use crate::errors::to_persistence;
use crate::repo::SqliteRepo;

/// `ContentStore` over a SQLite connection
///
/// Borrow a `Transaction` here to make a load-then-persist pair atomic; the
/// caller decides whether to commit.
pub struct SqliteContentStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteContentStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl ContentStore for SqliteContentStore<'_> {
    fn load_layout(&self, layout_id: &str) -> Result<Layout> {
        SqliteRepo::load_layout(self.conn, layout_id)
            .map_err(to_persistence)?
            .ok_or_else(|| LayoutError::LayoutNotFound {
                layout_id: layout_id.to_string(),
            })
    }

    fn resolve_field(&self, field_id: FieldId) -> Result<FieldDescriptor> {
        SqliteRepo::get_field(self.conn, field_id)
            .map_err(to_persistence)?
            .ok_or(LayoutError::UnresolvedFieldReference { field_id })
    }

    /// Replaces the rows, then reloads so callers see the stored form
    fn persist_layout(&mut self, layout: Layout) -> Result<Layout> {
        if !SqliteRepo::replace_layout(self.conn, &layout).map_err(to_persistence)? {
            return Err(LayoutError::LayoutNotFound {
                layout_id: layout.id,
            });
        }
        self.load_layout(&layout.id)
    }
}

use serde::{Deserialize, Serialize};

/// Identifier of a reusable field definition in the content store
pub type FieldId = i64;

/// Descriptive metadata of a reusable field
///
/// Owned by the content store; a layout only references a field by `id`.
/// The descriptor is carried on each field placement so that projections of
/// a layout never need to go back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: FieldId,

    /// Human-readable name
    pub name: String,

    /// Machine handle, unique across the store
    pub handle: String,

    /// Field type (e.g. "PlainText", "Assets", "Matrix")
    pub kind: String,
}

impl FieldDescriptor {
    pub fn new(id: FieldId, name: &str, handle: &str, kind: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            handle: handle.to_string(),
            kind: kind.to_string(),
        }
    }
}

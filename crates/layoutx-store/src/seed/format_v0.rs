//! Seed Format v0 schema
//!
//! ```yaml
//! schema_version: 0
//! fields:
//!   - { id: 7, name: Body, handle: body, kind: Text }
//! layouts:
//!   - id: blog
//!     owner_kind: entryType
//!     groups:
//!       - name: Content
//!         elements:
//!           - { type: AttributePlacement, attribute: title }
//!           - { type: FieldPlacement, field_id: 7, required: true }
//! ```

use layoutx_core::model::{FieldId, OwnerKind};
use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub fields: Vec<SeedField>,

    #[serde(default)]
    pub layouts: Vec<SeedLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedField {
    pub id: FieldId,
    pub name: String,
    pub handle: String,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedLayout {
    /// Layout id (stable across imports)
    pub id: String,
    pub owner_kind: OwnerKind,
    #[serde(default)]
    pub groups: Vec<SeedGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedGroup {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<SeedElement>,
}

/// Element definition in seed
///
/// Unlike a tool-call submission, every element here is created, so `type`
/// is mandatory. A `uid` is minted when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(rename = "type")]
    pub element_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

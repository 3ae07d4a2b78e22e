//! Built-in attributes of the content types that own layouts
//!
//! Unlike reusable fields, built-in attributes are not stored anywhere: each
//! owner kind has a fixed set, and the read-only descriptors of each attribute
//! come from this catalog when an attribute placement is first created.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{LayoutError, Result};

/// Kind of content type that owns a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnerKind {
    EntryType,
    Volume,
    User,
}

impl OwnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::EntryType => "entryType",
            OwnerKind::Volume => "volume",
            OwnerKind::User => "user",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "entryType" => Ok(OwnerKind::EntryType),
            "volume" => Ok(OwnerKind::Volume),
            "user" => Ok(OwnerKind::User),
            other => Err(LayoutError::malformed(format!(
                "unknown owner kind '{}'",
                other
            ))),
        }
    }
}

/// Read-only descriptors of an attribute placement
///
/// Never accepted from a caller; set from the catalog at creation time and
/// carried unchanged afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeDescriptors {
    /// The attribute must always be present and filled in
    pub mandatory: bool,
    /// The placement may be marked required
    pub requirable: bool,
    /// The value can differ per site/locale
    pub translatable: bool,
}

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinAttribute {
    pub name: &'static str,
    pub descriptors: AttributeDescriptors,
}

const fn attr(
    name: &'static str,
    mandatory: bool,
    requirable: bool,
    translatable: bool,
) -> BuiltinAttribute {
    BuiltinAttribute {
        name,
        descriptors: AttributeDescriptors {
            mandatory,
            requirable,
            translatable,
        },
    }
}

const ENTRY_TYPE_ATTRIBUTES: &[BuiltinAttribute] = &[
    attr("title", true, false, true),
    attr("slug", false, true, true),
    attr("postDate", false, true, false),
    attr("expiryDate", false, true, false),
];

const VOLUME_ATTRIBUTES: &[BuiltinAttribute] = &[
    attr("title", true, false, true),
    attr("alt", false, true, true),
    attr("filename", true, false, false),
];

const USER_ATTRIBUTES: &[BuiltinAttribute] = &[
    attr("username", true, false, false),
    attr("fullName", false, true, false),
    attr("email", true, false, false),
    attr("photo", false, false, false),
];

/// Lookup of built-in attributes by owner kind
pub struct AttributeCatalog;

impl AttributeCatalog {
    /// All attributes available to `owner`, in display order
    pub fn attributes(owner: OwnerKind) -> &'static [BuiltinAttribute] {
        match owner {
            OwnerKind::EntryType => ENTRY_TYPE_ATTRIBUTES,
            OwnerKind::Volume => VOLUME_ATTRIBUTES,
            OwnerKind::User => USER_ATTRIBUTES,
        }
    }

    /// Resolve an attribute name for `owner`
    ///
    /// # Errors
    ///
    /// `UnknownAttribute` if the owner kind has no attribute called `name`.
    pub fn resolve(owner: OwnerKind, name: &str) -> Result<&'static BuiltinAttribute> {
        Self::attributes(owner)
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| LayoutError::UnknownAttribute {
                attribute: name.to_string(),
                owner_kind: owner.to_string(),
            })
    }
}

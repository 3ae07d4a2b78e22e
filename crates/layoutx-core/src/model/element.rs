//! Layout elements
//!
//! An element is one placeable unit inside a group. There are three kinds:
//! a placement of a reusable field, a placement of a built-in attribute of
//! the owning content type, and a non-field UI element. Every element carries
//! a `uid` assigned when it is created and never changed afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::attribute::{AttributeCatalog, AttributeDescriptors, OwnerKind};
use super::field::FieldDescriptor;
use crate::errors::{LayoutError, Result};

pub const FIELD_PLACEMENT_TAG: &str = "FieldPlacement";
pub const ATTRIBUTE_PLACEMENT_TAG: &str = "AttributePlacement";

/// Mint a fresh element uid
pub fn new_uid() -> String {
    Uuid::now_v7().to_string()
}

/// Display width of an element as a percentage of its row, in `1..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Width(u8);

impl Width {
    pub const FULL: Width = Width(100);

    /// # Errors
    ///
    /// `InvalidWidth` when `value` is outside `1..=100`. Values are never clamped.
    pub fn new(value: i64) -> Result<Self> {
        if (1..=100).contains(&value) {
            Ok(Width(value as u8))
        } else {
            Err(LayoutError::InvalidWidth {
                width: value,
                uid: None,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Width {
    fn default() -> Self {
        Width::FULL
    }
}

impl TryFrom<i64> for Width {
    type Error = LayoutError;

    fn try_from(value: i64) -> Result<Self> {
        Width::new(value)
    }
}

impl From<Width> for i64 {
    fn from(width: Width) -> i64 {
        i64::from(width.0)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Mutable per-placement properties shared by field and attribute placements
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementProps {
    pub required: bool,
    /// Overrides the field or attribute name when set
    pub label: Option<String>,
    pub instructions: Option<String>,
    pub tip: Option<String>,
    pub warning: Option<String>,
    pub width: Width,
}

/// A partial update of placement properties
///
/// `None` leaves a property untouched. For the optional text properties,
/// `Some(None)` clears the value and `Some(Some(s))` sets it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementPatch {
    pub required: Option<bool>,
    pub label: Option<Option<String>>,
    pub instructions: Option<Option<String>>,
    pub tip: Option<Option<String>>,
    pub warning: Option<Option<String>>,
    pub width: Option<Width>,
}

impl PlacementPatch {
    pub fn is_empty(&self) -> bool {
        *self == PlacementPatch::default()
    }
}

impl PlacementProps {
    fn apply(&mut self, patch: &PlacementPatch) {
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(instructions) = &patch.instructions {
            self.instructions = instructions.clone();
        }
        if let Some(tip) = &patch.tip {
            self.tip = tip.clone();
        }
        if let Some(warning) = &patch.warning {
            self.warning = warning.clone();
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
    }
}

/// Placement of a reusable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPlacement {
    pub field: FieldDescriptor,
    pub props: PlacementProps,
}

/// Placement of a built-in attribute of the owning content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePlacement {
    pub attribute: String,
    pub descriptors: AttributeDescriptors,
    pub props: PlacementProps,
}

/// Recognized UI element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiElementKind {
    Heading,
    Tip,
    Markdown,
    Template,
    HorizontalRule,
    LineBreak,
}

impl UiElementKind {
    pub const ALL: [UiElementKind; 6] = [
        UiElementKind::Heading,
        UiElementKind::Tip,
        UiElementKind::Markdown,
        UiElementKind::Template,
        UiElementKind::HorizontalRule,
        UiElementKind::LineBreak,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            UiElementKind::Heading => "Heading",
            UiElementKind::Tip => "Tip",
            UiElementKind::Markdown => "Markdown",
            UiElementKind::Template => "Template",
            UiElementKind::HorizontalRule => "HorizontalRule",
            UiElementKind::LineBreak => "LineBreak",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

/// A non-field element such as a heading or a divider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiElement {
    pub kind: UiElementKind,
    pub width: Width,
}

/// Closed set of element variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Field(FieldPlacement),
    Attribute(AttributePlacement),
    Ui(UiElement),
}

/// Parsed type discriminator of a submitted element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Field,
    Attribute,
    Ui(UiElementKind),
}

impl ElementType {
    /// Parse a type tag; unrecognized tags yield `None`
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            FIELD_PLACEMENT_TAG => Some(ElementType::Field),
            ATTRIBUTE_PLACEMENT_TAG => Some(ElementType::Attribute),
            other => UiElementKind::from_tag(other).map(ElementType::Ui),
        }
    }
}

/// One placeable unit in a layout group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub uid: String,
    pub kind: ElementKind,
}

impl Element {
    /// Place a resolved field
    pub fn field(uid: String, field: FieldDescriptor) -> Self {
        Self {
            uid,
            kind: ElementKind::Field(FieldPlacement {
                field,
                props: PlacementProps::default(),
            }),
        }
    }

    /// Place a built-in attribute of `owner`, taking descriptors from the catalog
    ///
    /// # Errors
    ///
    /// `UnknownAttribute` if `owner` has no attribute called `attribute`.
    pub fn attribute(uid: String, owner: OwnerKind, attribute: &str) -> Result<Self> {
        let builtin = AttributeCatalog::resolve(owner, attribute)?;
        Ok(Self {
            uid,
            kind: ElementKind::Attribute(AttributePlacement {
                attribute: builtin.name.to_string(),
                descriptors: builtin.descriptors,
                props: PlacementProps::default(),
            }),
        })
    }

    /// Create a UI element from its type tag
    ///
    /// Returns `None` for an unrecognized tag.
    pub fn ui(uid: String, tag: &str) -> Option<Self> {
        UiElementKind::from_tag(tag).map(|kind| Self::ui_of(uid, kind))
    }

    /// Create a UI element of a known kind
    pub fn ui_of(uid: String, kind: UiElementKind) -> Self {
        Self {
            uid,
            kind: ElementKind::Ui(UiElement {
                kind,
                width: Width::default(),
            }),
        }
    }

    /// Type tag as exposed to callers
    pub fn type_tag(&self) -> &'static str {
        match &self.kind {
            ElementKind::Field(_) => FIELD_PLACEMENT_TAG,
            ElementKind::Attribute(_) => ATTRIBUTE_PLACEMENT_TAG,
            ElementKind::Ui(ui) => ui.kind.tag(),
        }
    }

    /// Placement properties; `None` for UI elements
    pub fn props(&self) -> Option<&PlacementProps> {
        match &self.kind {
            ElementKind::Field(f) => Some(&f.props),
            ElementKind::Attribute(a) => Some(&a.props),
            ElementKind::Ui(_) => None,
        }
    }

    pub fn width(&self) -> Width {
        match &self.kind {
            ElementKind::Field(f) => f.props.width,
            ElementKind::Attribute(a) => a.props.width,
            ElementKind::Ui(ui) => ui.width,
        }
    }

    /// Apply a partial update of placement properties
    ///
    /// Never touches `uid`, the variant, or the field/attribute reference.
    /// UI elements only take `width`; other properties are ignored for them.
    pub fn apply_patch(&mut self, patch: &PlacementPatch) {
        match &mut self.kind {
            ElementKind::Field(f) => f.props.apply(patch),
            ElementKind::Attribute(a) => a.props.apply(patch),
            ElementKind::Ui(ui) => {
                if let Some(width) = patch.width {
                    ui.width = width;
                }
            }
        }
    }
}

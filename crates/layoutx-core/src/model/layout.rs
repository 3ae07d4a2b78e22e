use serde::{Deserialize, Serialize};

use super::attribute::OwnerKind;
use super::element::Element;

/// Layout - how a content type's fields and attributes are grouped for editing
///
/// Groups are positional containers with no identity of their own; elements
/// are identified by `uid`, which is unique within the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Opaque identifier, stable across updates
    pub id: String,

    /// Kind of content type owning this layout; decides which built-in
    /// attributes may be placed
    pub owner_kind: OwnerKind,

    /// Groups in caller-controlled order
    pub groups: Vec<Group>,
}

impl Layout {
    /// Create an empty layout
    pub fn new(id: impl Into<String>, owner_kind: OwnerKind) -> Self {
        Self {
            id: id.into(),
            owner_kind,
            groups: Vec::new(),
        }
    }

    /// Builder-style group append, mostly for tests and seeds
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// All elements in group order, then element order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.groups.iter().flat_map(|g| g.elements.iter())
    }

    pub fn element_count(&self) -> usize {
        self.groups.iter().map(|g| g.elements.len()).sum()
    }

    /// Find an element by uid with a linear scan
    pub fn find_element(&self, uid: &str) -> Option<&Element> {
        self.elements().find(|e| e.uid == uid)
    }
}

/// A named, ordered container of elements (often rendered as a tab)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Display label; not unique
    pub name: String,
    pub elements: Vec<Element>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }
}

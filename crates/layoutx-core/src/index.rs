//! Call-scoped lookup of existing elements by uid

use std::collections::HashMap;

use crate::errors::{LayoutError, Result};
use crate::model::{Element, Layout};

/// Map from uid to the live element of a persisted layout
///
/// Borrowed from the layout it indexes and dropped with the reconciliation
/// call that built it.
#[derive(Debug)]
pub struct LayoutIndex<'a> {
    by_uid: HashMap<&'a str, &'a Element>,
}

impl<'a> LayoutIndex<'a> {
    /// Index every element of `layout`
    ///
    /// # Errors
    ///
    /// `DuplicateUid` if two elements of the layout share a uid.
    pub fn build(layout: &'a Layout) -> Result<Self> {
        let mut by_uid = HashMap::with_capacity(layout.element_count());
        for element in layout.elements() {
            if by_uid.insert(element.uid.as_str(), element).is_some() {
                return Err(LayoutError::DuplicateUid {
                    layout_id: layout.id.clone(),
                    uid: element.uid.clone(),
                });
            }
        }
        Ok(Self { by_uid })
    }

    pub fn get(&self, uid: &str) -> Option<&'a Element> {
        self.by_uid.get(uid).copied()
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.by_uid.contains_key(uid)
    }

    pub fn len(&self) -> usize {
        self.by_uid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uid.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDescriptor, Group, OwnerKind};

    fn field(uid: &str) -> Element {
        Element::field(
            uid.to_string(),
            FieldDescriptor::new(1, "Body", "body", "Text"),
        )
    }

    #[test]
    fn test_index_spans_all_groups() {
        let layout = Layout::new("layout-1", OwnerKind::EntryType)
            .with_group(Group::new("Content").with_element(field("a")))
            .with_group(Group::new("Content").with_element(field("b")));

        let index = LayoutIndex::build(&layout).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("b").map(|e| e.uid.as_str()), Some("b"));
        assert!(!index.contains("c"));
    }

    #[test]
    fn test_duplicate_uid_is_rejected() {
        let layout = Layout::new("layout-1", OwnerKind::EntryType)
            .with_group(Group::new("One").with_element(field("a")))
            .with_group(Group::new("Two").with_element(field("a")));

        let err = LayoutIndex::build(&layout).unwrap_err();
        assert_eq!(
            err,
            LayoutError::DuplicateUid {
                layout_id: "layout-1".to_string(),
                uid: "a".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_layout() {
        let layout = Layout::new("layout-1", OwnerKind::User);
        assert!(LayoutIndex::build(&layout).unwrap().is_empty());
    }
}

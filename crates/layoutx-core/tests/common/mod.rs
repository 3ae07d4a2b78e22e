use layoutx_core::model::{Element, FieldDescriptor, Group, Layout, OwnerKind};
use layoutx_core::MemoryContentStore;

pub const LAYOUT_ID: &str = "layout-1";

/// Store holding fields 7 (Body) and 9 (Image) and one entry-type layout:
///
/// - "Content": field placement `A` (field 7), attribute placement `T` (title)
/// - "Meta": heading `H`
#[allow(dead_code)]
pub fn seeded_store() -> MemoryContentStore {
    let mut store = MemoryContentStore::new();
    store.insert_field(body());
    store.insert_field(FieldDescriptor::new(9, "Image", "image", "Assets"));
    store.insert_layout(seeded_layout());
    store
}

#[allow(dead_code)]
pub fn body() -> FieldDescriptor {
    FieldDescriptor::new(7, "Body", "body", "Text")
}

#[allow(dead_code)]
pub fn seeded_layout() -> Layout {
    Layout::new(LAYOUT_ID, OwnerKind::EntryType)
        .with_group(
            Group::new("Content")
                .with_element(Element::field("A".to_string(), body()))
                .with_element(
                    Element::attribute("T".to_string(), OwnerKind::EntryType, "title").unwrap(),
                ),
        )
        .with_group(Group::new("Meta").with_element(Element::ui("H".to_string(), "Heading").unwrap()))
}

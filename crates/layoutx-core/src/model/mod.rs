pub mod attribute;
pub mod element;
pub mod field;
pub mod layout;

pub use attribute::{AttributeCatalog, AttributeDescriptors, BuiltinAttribute, OwnerKind};
pub use element::{
    new_uid, AttributePlacement, Element, ElementKind, ElementType, FieldPlacement,
    PlacementPatch, PlacementProps, UiElement, UiElementKind, Width,
};
pub use field::{FieldDescriptor, FieldId};
pub use layout::{Group, Layout};

//! Response projection of layouts
//!
//! Views are plain data in the shape returned to tool callers. Projection is
//! pure: it reads a `Layout` and never modifies it.

use serde::{Deserialize, Serialize};

use crate::model::{Element, ElementKind, FieldDescriptor, Group, Layout, OwnerKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutView {
    pub id: String,
    pub owner_kind: OwnerKind,
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub name: String,
    pub elements: Vec<ElementView>,
}

/// Resolved descriptive metadata of a placed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub name: String,
    pub handle: String,
    pub kind: String,
}

impl From<&FieldDescriptor> for FieldView {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            handle: field.handle.clone(),
            kind: field.kind.clone(),
        }
    }
}

/// One element as returned to callers
///
/// Keys that do not apply to the element's variant are omitted. Unset
/// optional text properties are omitted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementView {
    pub uid: String,

    #[serde(rename = "type")]
    pub element_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldView>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translatable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    pub width: u8,
}

/// Project a whole layout
pub fn serialize_layout(layout: &Layout) -> LayoutView {
    LayoutView {
        id: layout.id.clone(),
        owner_kind: layout.owner_kind,
        groups: layout.groups.iter().map(serialize_group).collect(),
    }
}

fn serialize_group(group: &Group) -> GroupView {
    GroupView {
        name: group.name.clone(),
        elements: group.elements.iter().map(serialize_element).collect(),
    }
}

/// Project a single element
pub fn serialize_element(element: &Element) -> ElementView {
    let mut view = ElementView {
        uid: element.uid.clone(),
        element_type: element.type_tag().to_string(),
        field_id: None,
        field: None,
        attribute: None,
        mandatory: None,
        requirable: None,
        translatable: None,
        required: None,
        label: None,
        instructions: None,
        tip: None,
        warning: None,
        width: element.width().get(),
    };

    match &element.kind {
        ElementKind::Field(placement) => {
            view.field_id = Some(placement.field.id);
            view.field = Some(FieldView::from(&placement.field));
        }
        ElementKind::Attribute(placement) => {
            view.attribute = Some(placement.attribute.clone());
            view.mandatory = Some(placement.descriptors.mandatory);
            view.requirable = Some(placement.descriptors.requirable);
            view.translatable = Some(placement.descriptors.translatable);
        }
        ElementKind::Ui(_) => {}
    }

    if let Some(props) = element.props() {
        view.required = Some(props.required);
        view.label = props.label.clone();
        view.instructions = props.instructions.clone();
        view.tip = props.tip.clone();
        view.warning = props.warning.clone();
    }

    view
}

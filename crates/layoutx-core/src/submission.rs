//! Client-submitted layout descriptions
//!
//! A submission is the full ordered list of groups, each listing its elements.
//! Elements name an existing element by `uid` (to keep and patch it) or carry
//! a `type` (to create one). Only properties present in the submission are
//! applied to a kept element.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::errors::{LayoutError, Result};
use crate::index::LayoutIndex;
use crate::model::{ElementKind, ElementType, FieldId, Group, PlacementPatch, Width};

/// Submitted group: replaces whatever group sat at this position before
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

/// Submitted element
///
/// Read-only descriptors (`mandatory`, `requirable`, `translatable`) are not
/// part of this type; if a client sends them they are dropped on parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub tip: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub warning: Option<Option<String>>,

    /// Kept signed so that out-of-range values surface as `InvalidWidth`
    /// rather than a parse failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

/// Distinguish an explicit `null` (clear) from an absent key (keep)
fn present_or_null<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ElementSpec {
    /// Reference an existing element without changing anything
    pub fn keep(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Default::default()
        }
    }

    /// New placement of field `field_id`
    pub fn new_field(field_id: FieldId) -> Self {
        Self {
            element_type: Some("FieldPlacement".to_string()),
            field_id: Some(field_id),
            ..Default::default()
        }
    }

    /// New placement of built-in attribute `attribute`
    pub fn new_attribute(attribute: impl Into<String>) -> Self {
        Self {
            element_type: Some("AttributePlacement".to_string()),
            attribute: Some(attribute.into()),
            ..Default::default()
        }
    }

    /// New element of any type tag, including UI tags
    pub fn new_typed(tag: impl Into<String>) -> Self {
        Self {
            element_type: Some(tag.into()),
            ..Default::default()
        }
    }

    /// Extract the placement-property patch
    ///
    /// # Errors
    ///
    /// `InvalidWidth` if `width` is present and outside `1..=100`.
    pub fn patch(&self) -> Result<PlacementPatch> {
        let width = self
            .width
            .map(|w| {
                Width::new(w).map_err(|_| LayoutError::InvalidWidth {
                    width: w,
                    uid: self.uid.clone(),
                })
            })
            .transpose()?;

        Ok(PlacementPatch {
            required: self.required,
            label: self.label.clone(),
            instructions: self.instructions.clone(),
            tip: self.tip.clone(),
            warning: self.warning.clone(),
            width,
        })
    }

    /// Parsed type tag, if one was sent and is recognized
    pub fn parsed_type(&self) -> Option<ElementType> {
        self.element_type.as_deref().and_then(ElementType::parse)
    }
}

impl GroupSpec {
    pub fn new(name: impl Into<String>, elements: Vec<ElementSpec>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// Spec that resubmits `group` unchanged: same name, every element by uid only
    pub fn keeping(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            elements: group
                .elements
                .iter()
                .map(|e| ElementSpec::keep(e.uid.clone()))
                .collect(),
        }
    }

    /// Spec that restates every property of `group` explicitly
    ///
    /// The result can be edited and submitted back as a full restatement.
    pub fn restating(group: &Group) -> Self {
        let elements = group
            .elements
            .iter()
            .map(|element| {
                let mut spec = ElementSpec::keep(element.uid.clone());
                spec.element_type = Some(element.type_tag().to_string());
                spec.width = Some(i64::from(element.width().get()));
                match &element.kind {
                    ElementKind::Field(f) => spec.field_id = Some(f.field.id),
                    ElementKind::Attribute(a) => spec.attribute = Some(a.attribute.clone()),
                    ElementKind::Ui(_) => {}
                }
                if let Some(props) = element.props() {
                    spec.required = Some(props.required);
                    spec.label = Some(props.label.clone());
                    spec.instructions = Some(props.instructions.clone());
                    spec.tip = Some(props.tip.clone());
                    spec.warning = Some(props.warning.clone());
                }
                spec
            })
            .collect();

        Self {
            name: group.name.clone(),
            elements,
        }
    }
}

/// Check the shape of a whole submission before any element is processed
///
/// # Errors
///
/// - `MalformedSpecification` for a blank group name, an empty or repeated
///   uid, an element with neither uid nor type, or a new field/attribute
///   placement missing its reference
/// - `InvalidWidth` for a width outside `1..=100`
pub fn validate_submission(groups: &[GroupSpec], index: &LayoutIndex<'_>) -> Result<()> {
    let mut seen_uids = HashSet::new();

    for (group_pos, group) in groups.iter().enumerate() {
        if group.name.trim().is_empty() {
            return Err(LayoutError::malformed(format!(
                "group {} has a blank name",
                group_pos
            )));
        }

        for (element_pos, spec) in group.elements.iter().enumerate() {
            let at = || format!("group {} element {}", group_pos, element_pos);

            spec.patch()?;

            if let Some(uid) = spec.uid.as_deref() {
                if uid.trim().is_empty() {
                    return Err(LayoutError::malformed(format!("{}: empty uid", at())));
                }
                if !seen_uids.insert(uid) {
                    return Err(LayoutError::malformed(format!(
                        "{}: uid {} submitted more than once",
                        at(),
                        uid
                    )));
                }
                if index.contains(uid) {
                    continue;
                }
            }

            // Creation path: uid absent or stale
            match (spec.uid.is_some(), spec.parsed_type()) {
                (false, None) if spec.element_type.is_none() => {
                    return Err(LayoutError::malformed(format!(
                        "{}: element without uid must carry a type",
                        at()
                    )));
                }
                (_, Some(ElementType::Field)) if spec.field_id.is_none() => {
                    return Err(LayoutError::malformed(format!(
                        "{}: new FieldPlacement requires fieldId",
                        at()
                    )));
                }
                (_, Some(ElementType::Attribute)) if spec.attribute.is_none() => {
                    return Err(LayoutError::malformed(format!(
                        "{}: new AttributePlacement requires attribute",
                        at()
                    )));
                }
                _ => {}
            }
        }
    }

    Ok(())
}

//! Layout reconciliation
//!
//! Merges a submitted list of groups against the stored layout:
//!
//! - the submitted groups replace the stored groups wholesale, in order
//! - an element naming a known `uid` is kept, and only the properties present
//!   in the submission are patched onto it
//! - an element without a known `uid` is created from its `type`
//! - a stored element whose `uid` is not submitted is dropped
//!
//! Unrecognized type tags and stale uids without a type are dropped from the
//! output. An unresolvable field reference fails the whole call.
//!
//! The new layout is built as a fresh value; the stored layout is never
//! mutated, so a failure at any point leaves it untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content_store::ContentStore;
use crate::errors::{LayoutError, Result};
use crate::index::LayoutIndex;
use crate::model::{new_uid, Element, ElementKind, ElementType, Group, Layout, OwnerKind};
use crate::submission::{validate_submission, ElementSpec, GroupSpec};

/// Counters describing what a reconciliation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Existing elements kept (and possibly patched)
    pub preserved: usize,
    /// New elements created
    pub created: usize,
    /// Submitted elements dropped because their type tag is not recognized
    pub skipped_unknown_type: usize,
    /// Submitted elements dropped because their uid no longer exists and
    /// they carried no type to recreate them from
    pub skipped_stale_uid: usize,
    /// Existing elements absent from the submission
    pub removed: usize,
}

/// Result of a reconciliation: the new layout plus what changed
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub layout: Layout,
    pub report: ReconcileReport,
}

/// Options for `Reconciler::update_layout`
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Compute the result but do not persist it
    pub dry_run: bool,
}

/// Reconciles submissions against layouts held by a `ContentStore`
pub struct Reconciler<S> {
    store: S,
}

impl<S: ContentStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load a layout as stored
    ///
    /// # Errors
    ///
    /// `LayoutNotFound` if no layout has this id.
    pub fn get_layout(&self, layout_id: &str) -> Result<Layout> {
        self.store.load_layout(layout_id)
    }

    /// Load, reconcile, and persist
    ///
    /// Returns the layout as stored after persistence (or the computed layout
    /// on a dry run).
    ///
    /// # Errors
    ///
    /// `LayoutNotFound` before anything else is attempted; any error of
    /// `reconcile`; any error of `persist_layout`. Nothing is persisted unless
    /// the whole reconciliation succeeded.
    pub fn update_layout(
        &mut self,
        layout_id: &str,
        groups: &[GroupSpec],
        options: UpdateOptions,
    ) -> Result<Reconciliation> {
        let current = self.store.load_layout(layout_id)?;
        let Reconciliation { layout, report } = self.reconcile(&current, groups)?;

        if options.dry_run {
            debug!(layout_id, "dry run, skipping persist");
            return Ok(Reconciliation { layout, report });
        }

        let persisted = self.store.persist_layout(layout)?;
        Ok(Reconciliation {
            layout: persisted,
            report,
        })
    }

    /// Compute the new layout for `groups` against `current`
    ///
    /// Consults the store only to resolve field references. Kept field
    /// placements pick up the field's current descriptor.
    ///
    /// # Errors
    ///
    /// - `DuplicateUid` if `current` is corrupt
    /// - `MalformedSpecification` / `InvalidWidth` from submission validation
    /// - `UnresolvedFieldReference` for any field placement, new or kept,
    ///   whose field no longer exists
    /// - `UnknownAttribute` for a new placement of an attribute the owner kind lacks
    pub fn reconcile(&self, current: &Layout, groups: &[GroupSpec]) -> Result<Reconciliation> {
        let index = LayoutIndex::build(current)?;
        validate_submission(groups, &index)?;

        let mut report = ReconcileReport::default();
        let mut out_groups = Vec::with_capacity(groups.len());

        for group_spec in groups {
            let mut group = Group::new(group_spec.name.clone());

            for spec in &group_spec.elements {
                let existing = spec.uid.as_deref().and_then(|uid| index.get(uid));

                let element = match existing {
                    Some(existing) => Some(self.preserve(existing, spec, &mut report)?),
                    None => self.create(current.owner_kind, spec, &mut report)?,
                };

                if let Some(element) = element {
                    group.elements.push(element);
                }
            }

            out_groups.push(group);
        }

        report.removed = index.len() - report.preserved;

        Ok(Reconciliation {
            layout: Layout {
                id: current.id.clone(),
                owner_kind: current.owner_kind,
                groups: out_groups,
            },
            report,
        })
    }

    fn preserve(
        &self,
        existing: &Element,
        spec: &ElementSpec,
        report: &mut ReconcileReport,
    ) -> Result<Element> {
        let mut kept = existing.clone();
        // A kept placement must still point at a live field
        if let ElementKind::Field(placement) = &mut kept.kind {
            placement.field = self.store.resolve_field(placement.field.id)?;
        }
        kept.apply_patch(&spec.patch()?);
        report.preserved += 1;
        debug!(uid = %kept.uid, "preserve");
        Ok(kept)
    }

    fn create(
        &self,
        owner: OwnerKind,
        spec: &ElementSpec,
        report: &mut ReconcileReport,
    ) -> Result<Option<Element>> {
        let Some(tag) = spec.element_type.as_deref() else {
            report.skipped_stale_uid += 1;
            debug!(uid = ?spec.uid, "skip: stale uid without type");
            return Ok(None);
        };

        let uid = new_uid();
        let mut element = match ElementType::parse(tag) {
            Some(ElementType::Field) => {
                let field_id = spec.field_id.ok_or_else(|| {
                    LayoutError::malformed("new FieldPlacement requires fieldId")
                })?;
                let field = self.store.resolve_field(field_id)?;
                Element::field(uid, field)
            }
            Some(ElementType::Attribute) => {
                let attribute = spec.attribute.as_deref().ok_or_else(|| {
                    LayoutError::malformed("new AttributePlacement requires attribute")
                })?;
                Element::attribute(uid, owner, attribute)?
            }
            Some(ElementType::Ui(kind)) => Element::ui_of(uid, kind),
            None => {
                report.skipped_unknown_type += 1;
                debug!(tag, "skip: unrecognized element type");
                return Ok(None);
            }
        };

        element.apply_patch(&spec.patch()?);
        report.created += 1;
        debug!(uid = %element.uid, tag, "create");
        Ok(Some(element))
    }
}

//! Property tests for the reconciliation laws: idempotence, drop-on-omission,
//! and partial patching
#![allow(clippy::unwrap_used, clippy::expect_used)]

use layoutx_core::model::{
    AttributeCatalog, Element, FieldDescriptor, Group, Layout, OwnerKind, PlacementPatch,
    UiElementKind, Width,
};
use layoutx_core::{ContentStore, ElementSpec, GroupSpec, MemoryContentStore, Reconciler};
use proptest::prelude::*;

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(7, "Body", "body", "Text"),
        FieldDescriptor::new(9, "Image", "image", "Assets"),
        FieldDescriptor::new(11, "Tags", "tags", "Categories"),
    ]
}

/// Element shape without a uid; uids are assigned once the layout is built
#[derive(Debug, Clone)]
enum Shape {
    Field(usize),
    Attribute(usize),
    Ui(usize),
}

fn arb_patch() -> impl Strategy<Value = PlacementPatch> {
    (
        any::<bool>(),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of("[a-z ]{1,16}"),
        1i64..=100,
    )
        .prop_map(|(required, label, tip, width)| PlacementPatch {
            required: Some(required),
            label: Some(label),
            tip: Some(tip),
            width: Some(Width::new(width).unwrap()),
            ..Default::default()
        })
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        (0usize..3).prop_map(Shape::Field),
        (0usize..4).prop_map(Shape::Attribute),
        (0usize..UiElementKind::ALL.len()).prop_map(Shape::Ui),
    ]
}

fn arb_layout() -> impl Strategy<Value = Layout> {
    proptest::collection::vec(
        (
            "[A-Z][a-z]{0,6}",
            proptest::collection::vec((arb_shape(), arb_patch()), 0..5),
        ),
        0..4,
    )
    .prop_map(|groups| {
        let catalog = AttributeCatalog::attributes(OwnerKind::EntryType);
        let mut next_uid = 0;
        let mut layout = Layout::new("layout-p", OwnerKind::EntryType);
        for (name, shapes) in groups {
            let mut group = Group::new(name);
            for (shape, patch) in shapes {
                next_uid += 1;
                let uid = format!("uid-{}", next_uid);
                let mut element = match shape {
                    Shape::Field(i) => Element::field(uid, fields()[i].clone()),
                    Shape::Attribute(i) => {
                        Element::attribute(uid, OwnerKind::EntryType, catalog[i].name).unwrap()
                    }
                    Shape::Ui(i) => Element::ui_of(uid, UiElementKind::ALL[i]),
                };
                element.apply_patch(&patch);
                group.elements.push(element);
            }
            layout.groups.push(group);
        }
        layout
    })
}

fn store_for(layout: &Layout) -> MemoryContentStore {
    let mut store = MemoryContentStore::new();
    for field in fields() {
        store.insert_field(field);
    }
    store.insert_layout(layout.clone());
    store
}

proptest! {
    #[test]
    fn reconcile_uid_only_resubmission_is_identity(layout in arb_layout()) {
        let reconciler = Reconciler::new(store_for(&layout));
        let groups: Vec<GroupSpec> = layout.groups.iter().map(GroupSpec::keeping).collect();

        let result = reconciler.reconcile(&layout, &groups).unwrap();

        prop_assert_eq!(result.layout, layout);
        prop_assert_eq!(result.report.created, 0);
        prop_assert_eq!(result.report.removed, 0);
    }

    #[test]
    fn reconcile_full_restatement_is_identity(layout in arb_layout()) {
        let reconciler = Reconciler::new(store_for(&layout));
        let groups: Vec<GroupSpec> = layout.groups.iter().map(GroupSpec::restating).collect();

        let result = reconciler.reconcile(&layout, &groups).unwrap();

        prop_assert_eq!(result.layout, layout);
    }

    #[test]
    fn reconcile_drops_omitted_uid(layout in arb_layout(), pick in any::<prop::sample::Index>()) {
        prop_assume!(layout.element_count() > 0);
        let uids: Vec<String> = layout.elements().map(|e| e.uid.clone()).collect();
        let omitted = &uids[pick.index(uids.len())];

        let groups: Vec<GroupSpec> = layout
            .groups
            .iter()
            .map(|g| {
                let mut spec = GroupSpec::keeping(g);
                spec.elements.retain(|e| e.uid.as_deref() != Some(omitted.as_str()));
                spec
            })
            .collect();

        let reconciler = Reconciler::new(store_for(&layout));
        let result = reconciler.reconcile(&layout, &groups).unwrap();

        prop_assert!(result.layout.find_element(omitted).is_none());
        prop_assert_eq!(result.layout.element_count(), layout.element_count() - 1);
        prop_assert_eq!(result.report.removed, 1);
    }

    #[test]
    fn reconcile_patch_touches_only_submitted_properties(
        layout in arb_layout(),
        pick in any::<prop::sample::Index>(),
        width in 1i64..=100,
    ) {
        prop_assume!(layout.element_count() > 0);
        let uids: Vec<String> = layout.elements().map(|e| e.uid.clone()).collect();
        let target = uids[pick.index(uids.len())].clone();

        let groups: Vec<GroupSpec> = layout
            .groups
            .iter()
            .map(|g| {
                let mut spec = GroupSpec::keeping(g);
                for e in &mut spec.elements {
                    if e.uid.as_deref() == Some(target.as_str()) {
                        e.width = Some(width);
                    }
                }
                spec
            })
            .collect();

        let reconciler = Reconciler::new(store_for(&layout));
        let result = reconciler.reconcile(&layout, &groups).unwrap();

        let before = layout.find_element(&target).unwrap();
        let after = result.layout.find_element(&target).unwrap();
        let expected_props = before.props().cloned().map(|mut p| {
            p.width = after.width();
            p
        });
        prop_assert_eq!(i64::from(after.width().get()), width);
        prop_assert_eq!(after.props().cloned(), expected_props);
        prop_assert_eq!(after.type_tag(), before.type_tag());
    }

    #[test]
    fn stored_layout_survives_failed_call(layout in arb_layout()) {
        let mut store = store_for(&layout);
        let mut reconciler = Reconciler::new(&mut store);
        let mut groups: Vec<GroupSpec> = layout.groups.iter().map(GroupSpec::keeping).collect();
        groups.push(GroupSpec::new("Broken", vec![ElementSpec::new_field(404)]));

        let result = reconciler.update_layout(&layout.id, &groups, Default::default());

        prop_assert!(result.is_err());
        prop_assert_eq!(store.load_layout(&layout.id).unwrap(), layout);
    }
}

//! Scenario 3: Failing calls leave the stored layout untouched
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{seeded_layout, seeded_store, LAYOUT_ID};
use layoutx_core::{
    ContentStore, ElementSpec, GroupSpec, LayoutError, Reconciler, UpdateOptions,
};

#[test]
fn test_scenario_03_unresolved_field_fails_whole_call() {
    // GIVEN a stored layout
    let mut store = seeded_store();
    let mut reconciler = Reconciler::new(&mut store);

    // WHEN a valid patch is followed by a placement of a missing field
    let result = reconciler.update_layout(
        LAYOUT_ID,
        &[GroupSpec::new(
            "Content",
            vec![
                ElementSpec {
                    required: Some(true),
                    ..ElementSpec::keep("A")
                },
                ElementSpec::new_field(999_999),
            ],
        )],
        UpdateOptions::default(),
    );

    // THEN the call fails and nothing was written
    assert_eq!(
        result.unwrap_err(),
        LayoutError::UnresolvedFieldReference { field_id: 999_999 }
    );
    assert_eq!(store.persist_count(), 0);
    assert_eq!(store.load_layout(LAYOUT_ID).unwrap(), seeded_layout());
}

#[test]
fn test_scenario_03_invalid_width_fails_whole_call() {
    let mut store = seeded_store();
    let mut reconciler = Reconciler::new(&mut store);

    let result = reconciler.update_layout(
        LAYOUT_ID,
        &[GroupSpec::new(
            "Content",
            vec![
                ElementSpec::new_field(9),
                ElementSpec {
                    width: Some(101),
                    ..ElementSpec::keep("A")
                },
            ],
        )],
        UpdateOptions::default(),
    );

    assert!(matches!(
        result,
        Err(LayoutError::InvalidWidth { width: 101, .. })
    ));
    assert_eq!(store.load_layout(LAYOUT_ID).unwrap(), seeded_layout());
}

#[test]
fn test_scenario_03_unknown_layout() {
    let mut store = seeded_store();
    let mut reconciler = Reconciler::new(&mut store);

    let result = reconciler.update_layout("nope", &[], UpdateOptions::default());

    assert!(matches!(result, Err(LayoutError::LayoutNotFound { .. })));
}

#[test]
fn test_scenario_03_corrupt_stored_layout_is_rejected() {
    let mut store = seeded_store();
    let mut corrupt = seeded_layout();
    let copy = corrupt.groups[0].elements[0].clone();
    corrupt.groups[1].elements.push(copy);
    store.insert_layout(corrupt);

    let mut reconciler = Reconciler::new(&mut store);
    let result = reconciler.update_layout(LAYOUT_ID, &[], UpdateOptions::default());

    assert!(matches!(result, Err(LayoutError::DuplicateUid { .. })));
}

#[test]
fn test_scenario_03_kept_placement_of_removed_field_fails_whole_call() {
    // GIVEN a stored layout placing field 7, which is then removed
    let mut store = seeded_store();
    store.remove_field(7);
    let mut reconciler = Reconciler::new(&mut store);

    // WHEN the placement is kept by uid
    let result = reconciler.update_layout(
        LAYOUT_ID,
        &[GroupSpec::new("Content", vec![ElementSpec::keep("A")])],
        UpdateOptions::default(),
    );

    // THEN the dangling reference fails the call and nothing was written
    assert_eq!(
        result.unwrap_err(),
        LayoutError::UnresolvedFieldReference { field_id: 7 }
    );
    assert_eq!(store.persist_count(), 0);
    assert_eq!(store.load_layout(LAYOUT_ID).unwrap(), seeded_layout());
}

#[test]
fn test_scenario_03_removed_field_can_be_dropped_by_omission() {
    let mut store = seeded_store();
    store.remove_field(7);
    let mut reconciler = Reconciler::new(&mut store);

    let result = reconciler
        .update_layout(
            LAYOUT_ID,
            &[GroupSpec::new("Content", vec![ElementSpec::keep("T")])],
            UpdateOptions::default(),
        )
        .unwrap();

    assert!(result.layout.find_element("A").is_none());
    assert_eq!(store.persist_count(), 1);
}

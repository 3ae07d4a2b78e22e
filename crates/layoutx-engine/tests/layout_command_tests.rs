//! Engine-level layout commands against an on-disk database
#![allow(clippy::unwrap_used, clippy::expect_used)]

use layoutx_core::errors::ExErrorKind;
use layoutx_core::{ElementSpec, GroupSpec, UpdateOptions};
use layoutx_engine::{field_list, layout_get, layout_update};
use layoutx_store::db;
use layoutx_store::seed::import_seed_str;
use rusqlite::Connection;
use tempfile::TempDir;

const SEED: &str = r#"
schema_version: 0
fields:
  - { id: 7, name: Body, handle: body, kind: Text }
  - { id: 9, name: Image, handle: image, kind: Assets }
layouts:
  - id: blog
    owner_kind: entryType
    groups:
      - name: Content
        elements:
          - { uid: A, type: FieldPlacement, field_id: 7 }
          - { uid: T, type: AttributePlacement, attribute: title }
"#;

fn setup() -> (TempDir, Connection) {
    let dir = TempDir::new().unwrap();
    let mut conn = db::open(dir.path().join("store.db")).unwrap();
    import_seed_str(SEED, &mut conn).unwrap();
    (dir, conn)
}

#[test]
fn test_layout_get_projects_descriptors() {
    let (_dir, conn) = setup();

    let view = layout_get("blog", &conn).unwrap();

    assert_eq!(view.id, "blog");
    let body = &view.groups[0].elements[0];
    assert_eq!(body.uid, "A");
    assert_eq!(body.field.as_ref().unwrap().handle, "body");
    let title = &view.groups[0].elements[1];
    assert_eq!(title.mandatory, Some(true));
}

#[test]
fn test_layout_get_unknown() {
    let (_dir, conn) = setup();

    let err = layout_get("nope", &conn).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::LayoutNotFound);
    assert_eq!(err.op(), Some("layout_get"));
}

#[test]
fn test_layout_update_persists_and_reports() {
    let (_dir, mut conn) = setup();

    let result = layout_update(
        "blog",
        &[GroupSpec::new(
            "Content",
            vec![
                ElementSpec {
                    required: Some(true),
                    ..ElementSpec::keep("A")
                },
                ElementSpec::new_field(9),
            ],
        )],
        UpdateOptions::default(),
        &mut conn,
    )
    .unwrap();

    assert_eq!(result.report.preserved, 1);
    assert_eq!(result.report.created, 1);
    assert_eq!(result.report.removed, 1);

    let reloaded = layout_get("blog", &conn).unwrap();
    assert_eq!(reloaded, result.layout);
    assert_eq!(reloaded.groups[0].elements[0].required, Some(true));
}

#[test]
fn test_layout_update_dry_run_leaves_store_alone() {
    let (_dir, mut conn) = setup();
    let before = layout_get("blog", &conn).unwrap();

    let result = layout_update(
        "blog",
        &[GroupSpec::new("Only", vec![ElementSpec::new_typed("Heading")])],
        UpdateOptions { dry_run: true },
        &mut conn,
    )
    .unwrap();

    assert!(result.dry_run);
    assert_eq!(result.layout.groups[0].name, "Only");
    assert_eq!(layout_get("blog", &conn).unwrap(), before);
}

#[test]
fn test_layout_update_unresolved_field_is_atomic() {
    let (_dir, mut conn) = setup();
    let before = layout_get("blog", &conn).unwrap();

    let err = layout_update(
        "blog",
        &[GroupSpec::new(
            "Content",
            vec![
                ElementSpec {
                    width: Some(50),
                    ..ElementSpec::keep("A")
                },
                ElementSpec::new_field(999_999),
            ],
        )],
        UpdateOptions::default(),
        &mut conn,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::UnresolvedFieldReference);
    assert_eq!(err.entity_id(), Some("999999"));
    assert_eq!(layout_get("blog", &conn).unwrap(), before);
}

#[test]
fn test_field_list_ordered_by_id() {
    let (_dir, conn) = setup();

    let fields = field_list(&conn).unwrap();

    let ids: Vec<i64> = fields.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![7, 9]);
}

#[test]
fn test_restated_layout_resubmits_unchanged() {
    let (_dir, mut conn) = setup();
    let before = layout_get("blog", &conn).unwrap();

    let groups = layoutx_engine::layout_restate("blog", &conn).unwrap();
    let result = layout_update("blog", &groups, UpdateOptions::default(), &mut conn).unwrap();

    assert_eq!(result.layout, before);
    assert_eq!(result.report.created, 0);
}

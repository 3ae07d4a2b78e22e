// Integration tests for seed parsing and import into an on-disk database
#![allow(clippy::unwrap_used, clippy::expect_used)]

use layoutx_core::errors::ExErrorKind;
use layoutx_core::model::ElementKind;
use layoutx_store::seed::{import_seed, import_seed_str, parse_seed_file};
use layoutx_store::{db, SqliteRepo};
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_parse_blog_seed() {
    let seed = parse_seed_file(&fixtures_dir().join("seed_blog.yaml")).unwrap();

    assert_eq!(seed.fields.len(), 2);
    assert_eq!(seed.layouts.len(), 2);
    assert_eq!(seed.layouts[0].groups[0].elements.len(), 3);
}

#[test]
fn test_reject_invalid_width() {
    let err = parse_seed_file(&fixtures_dir().join("seed_invalid_width.yaml")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.message().contains("Width 0"));
}

#[test]
fn test_import_writes_fields_and_layouts() {
    // Given: a fresh on-disk database
    let dir = TempDir::new().unwrap();
    let mut conn = db::open(dir.path().join("nested").join("store.db")).unwrap();

    // When: the blog seed is imported
    let summary = import_seed(&fixtures_dir().join("seed_blog.yaml"), &mut conn).unwrap();

    // Then: fields and layouts are stored
    assert_eq!(summary.fields, 2);
    assert_eq!(summary.layouts, 2);
    assert_eq!(summary.digest.len(), 64);
    assert_eq!(SqliteRepo::list_fields(&conn).unwrap().len(), 2);

    let blog = SqliteRepo::load_layout(&conn, "blog").unwrap().unwrap();
    assert_eq!(blog.groups.len(), 2);
    assert_eq!(blog.element_count(), 5);

    // And: explicit uids are kept, missing ones are minted
    let uids: Vec<&str> = blog.elements().map(|e| e.uid.as_str()).collect();
    assert_eq!(&uids[..2], &["title-slot", "body-slot"]);
    assert!(uids[2..].iter().all(|uid| !uid.is_empty()));

    // And: placement properties survive the round trip
    match &blog.find_element("body-slot").unwrap().kind {
        ElementKind::Field(f) => {
            assert_eq!(f.field.handle, "body");
            assert!(f.props.required);
            assert_eq!(f.props.instructions.as_deref(), Some("Write the story"));
        }
        other => panic!("expected field placement, got {:?}", other),
    }
}

#[test]
fn test_reimport_is_stable() {
    let dir = TempDir::new().unwrap();
    let mut conn = db::open(dir.path().join("store.db")).unwrap();
    let path = fixtures_dir().join("seed_blog.yaml");

    let first = import_seed(&path, &mut conn).unwrap();
    let second = import_seed(&path, &mut conn).unwrap();

    assert_eq!(first.digest, second.digest);
    assert_eq!(SqliteRepo::list_fields(&conn).unwrap().len(), 2);
    let blog = SqliteRepo::load_layout(&conn, "blog").unwrap().unwrap();
    assert_eq!(blog.element_count(), 5);
}

#[test]
fn test_seed_may_reference_fields_already_stored() {
    let mut conn = db::open_in_memory().unwrap();
    import_seed_str(
        "schema_version: 0\nfields:\n  - { id: 3, name: Summary, handle: summary, kind: Text }\n",
        &mut conn,
    )
    .unwrap();

    let later = r#"
schema_version: 0
layouts:
  - id: news
    owner_kind: entryType
    groups:
      - name: Content
        elements:
          - { type: FieldPlacement, field_id: 3 }
"#;
    import_seed_str(later, &mut conn).unwrap();

    let news = SqliteRepo::load_layout(&conn, "news").unwrap().unwrap();
    assert_eq!(news.element_count(), 1);
}

#[test]
fn test_failed_import_writes_nothing() {
    let mut conn = db::open_in_memory().unwrap();
    let seed = r#"
schema_version: 0
fields:
  - { id: 1, name: Body, handle: body, kind: Text }
layouts:
  - id: bad
    owner_kind: entryType
    groups:
      - name: Content
        elements:
          - { type: FieldPlacement, field_id: 404 }
"#;

    assert!(import_seed_str(seed, &mut conn).is_err());
    assert!(SqliteRepo::list_fields(&conn).unwrap().is_empty());
}

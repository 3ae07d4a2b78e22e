#![allow(clippy::unwrap_used, clippy::expect_used)]

use layoutx_core::errors::LayoutError;
use layoutx_core::logging_facility::test_capture::init_test_capture;
use layoutx_core::{log_op_end, log_op_error, log_op_start};
use layoutx_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_carries_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, layout_id = "layout-1");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("layout_id"), Some("layout-1"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42, preserved = 3);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
    assert_eq!(events[0].field("preserved"), Some("3"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = LayoutError::UnresolvedFieldReference { field_id: 999_999 };
    log_op_error!(op_name, err, duration_ms = 5);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(
        events[0].field("err_code"),
        Some("ERR_UNRESOLVED_FIELD_REFERENCE")
    );
    assert_eq!(
        events[0].field("err_kind"),
        Some("UnresolvedFieldReference")
    );
}

#[test]
fn test_assert_event_exists() {
    let capture = init_test_capture();
    let op_name = "test_assert_event_exists_unique_4";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 1);

    capture.assert_event_exists(op_name, EVENT_START);
    capture.assert_event_exists(op_name, EVENT_END);
}

#[test]
fn test_log_op_error_passes_extra_fields_through() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_fields_unique_5";
    let layout_id = String::from("blog");

    let err = LayoutError::LayoutNotFound {
        layout_id: layout_id.clone(),
    };
    log_op_error!(op_name, err, duration_ms = 2, layout_id = %layout_id, dry_run = true,);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("err_code"), Some("ERR_LAYOUT_NOT_FOUND"));
    assert_eq!(events[0].field("layout_id"), Some("blog"));
    assert_eq!(events[0].field("dry_run"), Some("true"));
}

//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent across logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_LAYOUT_ID: &str = "layout_id";
pub const FIELD_ELEMENT_UID: &str = "uid";
pub const FIELD_FIELD_ID: &str = "field_id";

// Reconciliation counters
pub const FIELD_GROUP_COUNT: &str = "group_count";
pub const FIELD_PRESERVED: &str = "preserved";
pub const FIELD_CREATED: &str = "created";
pub const FIELD_REMOVED: &str = "removed";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_keys_are_plain_identifiers() {
        // tracing field names cannot contain dots when passed as bare idents
        assert!(!FIELD_ERR_KIND.contains('.'));
        assert!(!FIELD_ERR_CODE.contains('.'));
    }
}

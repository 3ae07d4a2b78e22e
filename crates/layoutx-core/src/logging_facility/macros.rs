//! Lifecycle event macros for engine operations
//!
//! Every engine operation emits exactly one `start` event followed by either
//! one `end` or one `end_error` event, all tagged with the same `op`. Extra
//! `key = value` fields are passed through to `tracing` unchanged, so the
//! usual `%` and `?` sigils work.
//!
//! Callers need `tracing` and `layoutx-core-types` in their dependencies.

/// Emit the `start` event of `op`
///
/// ```
/// # use layoutx_core::log_op_start;
/// let layout_id = "blog";
/// log_op_start!("layout_get", layout_id = layout_id);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = layoutx_core_types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Emit the `end` event of `op`; `duration_ms` is mandatory
///
/// ```
/// # use layoutx_core::log_op_end;
/// log_op_end!("layout_update", duration_ms = 3_u64, preserved = 2, created = 1);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = layoutx_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Emit the `end_error` event of `op`
///
/// `$err` may be an `ExError` or anything with `Into<ExError>`, such as a
/// `LayoutError`. Its kind and stable code are recorded as `err_kind` and
/// `err_code`.
///
/// ```ignore
/// let err = LayoutError::UnresolvedFieldReference { field_id: 999_999 };
/// log_op_error!("layout_update", err, duration_ms = 1_u64, layout_id = "blog");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = layoutx_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($($field)*)?
        );
    }};
}

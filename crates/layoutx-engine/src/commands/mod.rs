//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Handlers here emit `log_op_start!` at entry, then `log_op_end!` or
//! `log_op_error!`. Lower layers (store, core) use only `tracing::debug!()`.

pub mod field;
pub mod layout;
pub mod tool;

/// Milliseconds since `start`, for the `duration_ms` log field
pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

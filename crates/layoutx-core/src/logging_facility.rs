//! Structured logging facility for LayoutX
//!
//! - Single initialization point via `init(profile)`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use layoutx_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Only the engine layer emits start/end events. Core and store code log
//! per-element and per-statement detail with `tracing::debug!`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

//! LayoutX Core - field layout reconciliation kernel
//!
//! A layout arranges the reusable fields, built-in attributes, and UI
//! elements of a content type into named groups. This crate provides:
//! - The layout and element model, including the built-in attribute catalog
//! - A call-scoped uid index over a persisted layout
//! - Submission parsing and validation
//! - The reconciler, which merges a submission into the stored layout by uid
//! - The response projection returned to tool callers
//! - The `ContentStore` seam and an in-memory implementation
//!
//! Storage, transactions, and lifecycle logging live in the store and engine
//! crates.

pub mod content_store;
pub mod errors;
pub mod index;
pub mod logging_facility;
pub mod model;
pub mod reconcile;
pub mod serialize;
pub mod submission;

// Re-export commonly used types
pub use content_store::{ContentStore, MemoryContentStore};
pub use errors::{ExError, ExErrorKind, LayoutError, Result};
pub use index::LayoutIndex;
pub use model::{Element, ElementKind, FieldDescriptor, FieldId, Group, Layout, OwnerKind, Width};
pub use reconcile::{ReconcileReport, Reconciler, Reconciliation, UpdateOptions};
pub use serialize::{serialize_element, serialize_layout, ElementView, GroupView, LayoutView};
pub use submission::{validate_submission, ElementSpec, GroupSpec};

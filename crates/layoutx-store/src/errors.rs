//! Error handling for layoutx-store
//!
//! Store functions report `ExError`. The `ContentStore` adapter converts to
//! `LayoutError` at the trait boundary.

use layoutx_core::errors::{ExError, ExErrorKind, LayoutError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error for an already-applied migration
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch: recorded {}, embedded {}",
            expected, actual
        ))
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an error for a stored row that does not map back to the model
pub fn corrupt_row(layout_id: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("load_layout")
        .with_entity_id(layout_id)
        .with_message(reason)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Collapse a store error into the `PersistenceError` of the content store seam
pub fn to_persistence(err: ExError) -> LayoutError {
    LayoutError::Persistence {
        message: err.message().to_string(),
    }
}

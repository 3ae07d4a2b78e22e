//! Repository layer: SQLite rows to and from the layout model

pub mod content_store;
pub mod sqlite_repo;

pub use content_store::SqliteContentStore;
pub use sqlite_repo::SqliteRepo;

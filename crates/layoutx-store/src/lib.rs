//! LayoutX Store - SQLite persistence and seed import
//!
//! Provides:
//! - SQLite schema with an embedded, checksummed migrations framework
//! - Repository functions for fields and layouts
//! - A `ContentStore` implementation over a connection or transaction
//! - Seed Format v0 parser and importer

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteContentStore, SqliteRepo};

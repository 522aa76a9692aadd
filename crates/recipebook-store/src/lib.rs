//! Recipebook Store - SQLite persistence for recipes and revisions
//!
//! Provides:
//! - Connection configuration (`StoreConfig`, pragmas)
//! - SQLite schema with a checksummed migrations framework
//! - `SqliteRepo`, row-level access to recipes, the ingredient catalog, and
//!   the revision log
//! - `SqliteRecipeStore`, the core persistence ports over a connection or an
//!   open transaction

pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use repo::{SqliteRecipeStore, SqliteRepo};

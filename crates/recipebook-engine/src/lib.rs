//! Recipebook Engine - transactional orchestration over SQLite
//!
//! Runs the `recipebook-core` use cases against `recipebook-store`, one
//! `rusqlite::Transaction` per write, and owns lifecycle logging for every
//! public operation. Results are returned as camelCase transport views.

pub mod commands;

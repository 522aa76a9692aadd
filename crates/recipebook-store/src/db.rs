//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open the configured database file, creating its directory if needed
pub fn open_with_config(config: &StoreConfig) -> Result<Connection> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
    }
    let conn = open(&config.path)?;
    configure(&conn, Duration::from_millis(config.busy_timeout_ms))?;
    tracing::debug!(path = %config.path.display(), "store opened");
    Ok(conn)
}

/// Configure a connection: foreign keys, WAL journal, busy timeout
pub fn configure(conn: &Connection, busy_timeout: Duration) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(from_rusqlite)?;

    // journal_mode answers with the resulting mode; in-memory databases stay "memory"
    let _mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;

    conn.busy_timeout(busy_timeout).map_err(from_rusqlite)?;

    Ok(())
}

//! Subcommand implementations

pub mod init;
pub mod recipe;
pub mod revisions;

use std::io::Read;
use std::path::Path;

use recipebook_core::errors::ExError;
use recipebook_core_types::RequestContext;
use recipebook_store::db::open_with_config;
use recipebook_store::migrations::apply_migrations;
use recipebook_store::StoreConfig;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Open the configured database with the schema up to date
///
/// # Errors
///
/// Fails when the file cannot be opened or a migration fails.
pub fn open_store(config: &StoreConfig, ctx: &RequestContext) -> CliResult<Connection> {
    let mut conn = open_with_config(config).map_err(tagged(ctx))?;
    apply_migrations(&mut conn).map_err(tagged(ctx))?;
    Ok(conn)
}

/// Attach this invocation's correlation ids to a store or engine error
pub fn tagged(ctx: &RequestContext) -> impl Fn(ExError) -> ExError + '_ {
    move |e| e.with_context(ctx)
}

/// Read a JSON request body from a file, or from stdin when the path is `-`
///
/// # Errors
///
/// Fails on I/O errors or JSON that does not match `T`.
pub fn read_request<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

/// # Errors
///
/// Fails only if `value` cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Database initialization command

use recipebook_core_types::RequestContext;
use recipebook_store::migrations::applied_migrations;
use recipebook_store::StoreConfig;
use serde_json::json;

use super::{open_store, print_json, tagged, CliResult};

/// # Errors
///
/// Fails when the database cannot be opened or migrated.
pub fn execute(config: &StoreConfig, ctx: &RequestContext) -> CliResult<()> {
    let conn = open_store(config, ctx)?;
    let migrations = applied_migrations(&conn).map_err(tagged(ctx))?;
    print_json(&json!({
        "db": config.path.display().to_string(),
        "migrations": migrations,
    }))
}

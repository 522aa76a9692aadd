//! Recipe write commands.
//!
//! Each write opens one `rusqlite::Transaction`, runs the core use case
//! against a `SqliteRecipeStore` over it, and commits only on success. An
//! error at any step drops the transaction, so recipe fields, associations,
//! catalog rows, and revisions are either all stored or none are.
//!
//! ## Logging Ownership
//!
//! The public functions here own lifecycle events (`start` / `end` /
//! `end_error`). The `_impl` helpers and the core use cases only emit
//! debug details.

#![allow(clippy::result_large_err)]

use recipebook_core::errors::ExError;
use recipebook_core::model::{CreateRecipeRequest, RecipeId, UpdateRecipeRequest};
use recipebook_core::ops::{self, UpdateOutcome};
use recipebook_core::{log_op_end, log_op_error, log_op_start};
use recipebook_store::errors::{from_rusqlite, Result};
use recipebook_store::SqliteRecipeStore;
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::commands::views::{RecipeView, RevisionView};

/// Result of a recipe update
#[derive(Debug, Clone, Serialize)]
pub struct RecipeUpdateResult {
    pub recipe: RecipeView,
    /// Revisions written by this update, in storage order
    pub revisions: Vec<RevisionView>,
}

impl From<&UpdateOutcome> for RecipeUpdateResult {
    fn from(outcome: &UpdateOutcome) -> Self {
        Self {
            recipe: RecipeView::from(&outcome.recipe),
            revisions: outcome.revisions.iter().map(Into::into).collect(),
        }
    }
}

/// Create a recipe owned by `caller_id`
///
/// # Errors
///
/// Returns `Validation` for a blank title or an unresolvable ingredient
/// reference, or `Persistence` on database failure.
pub fn recipe_create(
    caller_id: Uuid,
    request: &CreateRecipeRequest,
    conn: &mut Connection,
) -> Result<RecipeView> {
    log_op_start!("recipe_create", caller_id = %caller_id);
    let start = std::time::Instant::now();

    let view = recipe_create_impl(caller_id, request, conn).map_err(|e| {
        log_op_error!(
            "recipe_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "recipe_create",
        duration_ms = start.elapsed().as_millis() as u64,
        recipe_id = view.recipe_id
    );
    Ok(view)
}

fn recipe_create_impl(
    caller_id: Uuid,
    request: &CreateRecipeRequest,
    conn: &mut Connection,
) -> Result<RecipeView> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let recipe = {
        let mut store = SqliteRecipeStore::new(&tx);
        ops::create_recipe(&mut store, caller_id, request).map_err(ExError::from)?
    };
    tx.commit().map_err(from_rusqlite)?;
    Ok(RecipeView::from(&recipe))
}

/// Read a recipe by external identifier
///
/// # Errors
///
/// Returns `NotFound` for a malformed or unknown identifier.
pub fn recipe_get(recipe_id: &str, conn: &Connection) -> Result<RecipeView> {
    log_op_start!("recipe_get", recipe_id = recipe_id);
    let start = std::time::Instant::now();

    let store = SqliteRecipeStore::new(conn);
    let recipe = ops::get_recipe(&store, recipe_id)
        .map_err(ExError::from)
        .map_err(|e| {
            log_op_error!(
                "recipe_get",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "recipe_get",
        duration_ms = start.elapsed().as_millis() as u64
    );
    Ok(RecipeView::from(&recipe))
}

/// Update a recipe and record ingredient and step revisions
///
/// Runs load, authorization, ingredient resolution, diffing, recipe save,
/// and revision append inside one transaction.
///
/// # Errors
///
/// * `NotFound` - malformed or unknown recipe identifier
/// * `AccessDenied` - caller is not the owning user
/// * `Validation` - an ingredient reference has neither a valid id nor a name
/// * `Persistence` - database failure; nothing is committed
pub fn recipe_update(
    recipe_id: &str,
    caller_id: Uuid,
    request: &UpdateRecipeRequest,
    conn: &mut Connection,
) -> Result<RecipeUpdateResult> {
    log_op_start!(
        "recipe_update",
        recipe_id = recipe_id,
        caller_id = %caller_id
    );
    let start = std::time::Instant::now();

    let outcome = recipe_update_impl(recipe_id, caller_id, request, conn).map_err(|e| {
        log_op_error!(
            "recipe_update",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "recipe_update",
        duration_ms = start.elapsed().as_millis() as u64,
        revision_count = outcome.revisions.len()
    );
    Ok(RecipeUpdateResult::from(&outcome))
}

fn recipe_update_impl(
    recipe_id: &str,
    caller_id: Uuid,
    request: &UpdateRecipeRequest,
    conn: &mut Connection,
) -> Result<UpdateOutcome> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let outcome = {
        let mut store = SqliteRecipeStore::new(&tx);
        ops::update_recipe(&mut store, recipe_id, caller_id, request).map_err(ExError::from)?
    };
    tx.commit().map_err(from_rusqlite)?;
    Ok(outcome)
}

/// Delete a recipe with its associations and revision history
///
/// # Errors
///
/// Returns `NotFound` for a malformed or unknown identifier, or
/// `AccessDenied` when the caller is not the owning user.
pub fn recipe_delete(recipe_id: &str, caller_id: Uuid, conn: &mut Connection) -> Result<RecipeId> {
    log_op_start!(
        "recipe_delete",
        recipe_id = recipe_id,
        caller_id = %caller_id
    );
    let start = std::time::Instant::now();

    let deleted = recipe_delete_impl(recipe_id, caller_id, conn).map_err(|e| {
        log_op_error!(
            "recipe_delete",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "recipe_delete",
        duration_ms = start.elapsed().as_millis() as u64
    );
    Ok(deleted)
}

fn recipe_delete_impl(recipe_id: &str, caller_id: Uuid, conn: &mut Connection) -> Result<RecipeId> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let deleted = {
        let mut store = SqliteRecipeStore::new(&tx);
        ops::delete_recipe(&mut store, recipe_id, caller_id).map_err(ExError::from)?
    };
    tx.commit().map_err(from_rusqlite)?;
    Ok(deleted)
}

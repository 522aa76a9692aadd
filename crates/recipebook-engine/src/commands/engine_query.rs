//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for revision history
//! reads. It takes a shared connection and never writes. Every query is
//! owner-gated: a caller other than the recipe's owning user gets
//! `AccessDenied`.

#![allow(clippy::result_large_err)]

use recipebook_core::errors::ExError;
use recipebook_core::model::{IngredientId, StepNumber};
use recipebook_core::queries::{
    list_ingredient_revisions, list_recipe_revisions, list_step_revisions,
};
use recipebook_core::{log_op_end, log_op_error, log_op_start};
use recipebook_store::errors::Result;
use recipebook_store::SqliteRecipeStore;
use rusqlite::Connection;
use uuid::Uuid;

use crate::commands::views::{
    IngredientRevisionsResponse, RevisionsResponse, StepRevisionsResponse,
};

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    /// Whole revision history of a recipe.
    Revisions { recipe_id: String, caller_id: Uuid },

    /// History of one ingredient the recipe currently uses.
    IngredientRevisions {
        recipe_id: String,
        ingredient_id: IngredientId,
        caller_id: Uuid,
    },

    /// History of one step the recipe currently has.
    StepRevisions {
        recipe_id: String,
        step_id: StepNumber,
        caller_id: Uuid,
    },
}

impl EngineQuery {
    fn op(&self) -> &'static str {
        match self {
            EngineQuery::Revisions { .. } => "revisions_get",
            EngineQuery::IngredientRevisions { .. } => "ingredient_revisions_get",
            EngineQuery::StepRevisions { .. } => "step_revisions_get",
        }
    }
}

/// Result of applying an engine query.
#[derive(Debug, Clone)]
pub enum EngineQueryResult {
    Revisions(RevisionsResponse),
    IngredientRevisions(IngredientRevisionsResponse),
    StepRevisions(StepRevisionsResponse),
}

/// Apply a read-only query.
///
/// # Errors
///
/// * `NotFound` - malformed or unknown recipe identifier, or an ingredient
///   or step the recipe does not currently have
/// * `AccessDenied` - caller is not the owning user
/// * `Persistence` - database failure
pub fn apply_engine_query(query: EngineQuery, conn: &Connection) -> Result<EngineQueryResult> {
    let op = query.op();
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = run_query(query, conn);

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(EngineQueryResult::Revisions(r)) => {
            log_op_end!(op, duration_ms = elapsed, total_count = r.total_count)
        }
        Ok(EngineQueryResult::IngredientRevisions(r)) => {
            log_op_end!(op, duration_ms = elapsed, total_count = r.total_count)
        }
        Ok(EngineQueryResult::StepRevisions(r)) => {
            log_op_end!(op, duration_ms = elapsed, total_count = r.total_count)
        }
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!(op, e_clone, duration_ms = elapsed);
        }
    }
    result
}

fn run_query(query: EngineQuery, conn: &Connection) -> Result<EngineQueryResult> {
    let store = SqliteRecipeStore::new(conn);
    match query {
        EngineQuery::Revisions {
            recipe_id,
            caller_id,
        } => {
            let page = list_recipe_revisions(&store, &recipe_id, caller_id).map_err(ExError::from)?;
            Ok(EngineQueryResult::Revisions(RevisionsResponse::from(&page)))
        }
        EngineQuery::IngredientRevisions {
            recipe_id,
            ingredient_id,
            caller_id,
        } => {
            let page = list_ingredient_revisions(&store, &recipe_id, ingredient_id, caller_id)
                .map_err(ExError::from)?;
            Ok(EngineQueryResult::IngredientRevisions(
                IngredientRevisionsResponse::new(&page, ingredient_id),
            ))
        }
        EngineQuery::StepRevisions {
            recipe_id,
            step_id,
            caller_id,
        } => {
            let page = list_step_revisions(&store, &recipe_id, step_id, caller_id)
                .map_err(ExError::from)?;
            Ok(EngineQueryResult::StepRevisions(StepRevisionsResponse::new(
                &page, step_id,
            )))
        }
    }
}

/// All revisions of a recipe
///
/// # Errors
///
/// See [`apply_engine_query`].
pub fn revisions_get(recipe_id: &str, caller_id: Uuid, conn: &Connection) -> Result<RevisionsResponse> {
    match apply_engine_query(
        EngineQuery::Revisions {
            recipe_id: recipe_id.to_string(),
            caller_id,
        },
        conn,
    )? {
        EngineQueryResult::Revisions(r) => Ok(r),
        other => Err(unexpected_result(&other)),
    }
}

/// Revisions of one ingredient of a recipe
///
/// # Errors
///
/// See [`apply_engine_query`].
pub fn ingredient_revisions_get(
    recipe_id: &str,
    ingredient_id: IngredientId,
    caller_id: Uuid,
    conn: &Connection,
) -> Result<IngredientRevisionsResponse> {
    match apply_engine_query(
        EngineQuery::IngredientRevisions {
            recipe_id: recipe_id.to_string(),
            ingredient_id,
            caller_id,
        },
        conn,
    )? {
        EngineQueryResult::IngredientRevisions(r) => Ok(r),
        other => Err(unexpected_result(&other)),
    }
}

/// Revisions of one step of a recipe
///
/// # Errors
///
/// See [`apply_engine_query`].
pub fn step_revisions_get(
    recipe_id: &str,
    step_id: StepNumber,
    caller_id: Uuid,
    conn: &Connection,
) -> Result<StepRevisionsResponse> {
    match apply_engine_query(
        EngineQuery::StepRevisions {
            recipe_id: recipe_id.to_string(),
            step_id,
            caller_id,
        },
        conn,
    )? {
        EngineQueryResult::StepRevisions(r) => Ok(r),
        other => Err(unexpected_result(&other)),
    }
}

fn unexpected_result(result: &EngineQueryResult) -> ExError {
    use recipebook_core::errors::ExErrorKind;
    ExError::new(ExErrorKind::Internal)
        .with_op("apply_engine_query")
        .with_message(format!("unexpected query result: {:?}", result))
}

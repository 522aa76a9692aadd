//! Revision history commands

use clap::{Args, Subcommand};
use recipebook_engine::commands::engine_query::{
    apply_engine_query, EngineQuery, EngineQueryResult,
};
use recipebook_core_types::RequestContext;
use recipebook_store::StoreConfig;
use uuid::Uuid;

use super::{open_store, print_json, tagged, CliResult};

#[derive(Debug, Args)]
pub struct RevisionsArgs {
    #[command(subcommand)]
    pub command: RevisionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RevisionsCommand {
    /// Every revision of a recipe
    List {
        recipe_id: String,
        #[arg(long)]
        caller: Uuid,
    },
    /// Revisions of one ingredient the recipe currently uses
    Ingredient {
        recipe_id: String,
        ingredient_id: i64,
        #[arg(long)]
        caller: Uuid,
    },
    /// Revisions of one step, by step number
    Step {
        recipe_id: String,
        step_id: u32,
        #[arg(long)]
        caller: Uuid,
    },
}

impl From<RevisionsCommand> for EngineQuery {
    fn from(command: RevisionsCommand) -> Self {
        match command {
            RevisionsCommand::List { recipe_id, caller } => EngineQuery::Revisions {
                recipe_id,
                caller_id: caller,
            },
            RevisionsCommand::Ingredient {
                recipe_id,
                ingredient_id,
                caller,
            } => EngineQuery::IngredientRevisions {
                recipe_id,
                ingredient_id,
                caller_id: caller,
            },
            RevisionsCommand::Step {
                recipe_id,
                step_id,
                caller,
            } => EngineQuery::StepRevisions {
                recipe_id,
                step_id,
                caller_id: caller,
            },
        }
    }
}

/// # Errors
///
/// Returns the engine error for the query.
pub fn execute(
    args: RevisionsArgs,
    config: &StoreConfig,
    ctx: &RequestContext,
) -> CliResult<()> {
    let conn = open_store(config, ctx)?;

    match apply_engine_query(args.command.into(), &conn).map_err(tagged(ctx))? {
        EngineQueryResult::Revisions(r) => print_json(&r),
        EngineQueryResult::IngredientRevisions(r) => print_json(&r),
        EngineQueryResult::StepRevisions(r) => print_json(&r),
    }
}

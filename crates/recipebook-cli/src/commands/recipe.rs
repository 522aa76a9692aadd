//! Recipe create, read, update, and delete commands

use std::path::PathBuf;

use clap::{Args, Subcommand};
use recipebook_core::model::{CreateRecipeRequest, UpdateRecipeRequest};
use recipebook_core_types::RequestContext;
use recipebook_engine::commands::recipe::{recipe_create, recipe_delete, recipe_get, recipe_update};
use recipebook_store::StoreConfig;
use serde_json::json;
use uuid::Uuid;

use super::{open_store, print_json, read_request, tagged, CliResult};

#[derive(Debug, Args)]
pub struct RecipeArgs {
    #[command(subcommand)]
    pub command: RecipeCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecipeCommand {
    /// Create a recipe from a JSON request
    Create {
        /// Acting user; becomes the owner
        #[arg(long)]
        caller: Uuid,
        /// JSON request body (`-` for stdin)
        #[arg(long)]
        file: PathBuf,
    },
    /// Print a recipe
    Get { recipe_id: String },
    /// Apply a JSON update request and print the recipe with new revisions
    Update {
        recipe_id: String,
        #[arg(long)]
        caller: Uuid,
        /// JSON request body (`-` for stdin)
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a recipe and its history
    Delete {
        recipe_id: String,
        #[arg(long)]
        caller: Uuid,
    },
}

/// # Errors
///
/// Returns the engine error (not found, access denied, validation) or an
/// I/O or JSON error for the request file.
pub fn execute(args: RecipeArgs, config: &StoreConfig, ctx: &RequestContext) -> CliResult<()> {
    let mut conn = open_store(config, ctx)?;

    match args.command {
        RecipeCommand::Create { caller, file } => {
            let request: CreateRecipeRequest = read_request(&file)?;
            let recipe = recipe_create(caller, &request, &mut conn).map_err(tagged(ctx))?;
            print_json(&recipe)
        }
        RecipeCommand::Get { recipe_id } => {
            let recipe = recipe_get(&recipe_id, &conn).map_err(tagged(ctx))?;
            print_json(&recipe)
        }
        RecipeCommand::Update {
            recipe_id,
            caller,
            file,
        } => {
            let request: UpdateRecipeRequest = read_request(&file)?;
            let result =
                recipe_update(&recipe_id, caller, &request, &mut conn).map_err(tagged(ctx))?;
            print_json(&result)
        }
        RecipeCommand::Delete { recipe_id, caller } => {
            let deleted = recipe_delete(&recipe_id, caller, &mut conn).map_err(tagged(ctx))?;
            print_json(&json!({ "deletedRecipeId": deleted }))
        }
    }
}

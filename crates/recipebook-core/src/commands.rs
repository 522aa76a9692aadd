//! Command types for recipe mutations
//!
//! Commands are the input of the functional-boundary `apply()` function over
//! the in-memory `Store`.

use uuid::Uuid;

use crate::model::{CreateRecipeRequest, UpdateRecipeRequest};

/// Command enum representing every recipe mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a recipe owned by `caller_id`
    RecipeCreate {
        caller_id: Uuid,
        request: CreateRecipeRequest,
    },

    /// Update a recipe, recording ingredient and step revisions
    RecipeUpdate {
        recipe_id: String,
        caller_id: Uuid,
        request: UpdateRecipeRequest,
    },

    /// Delete a recipe and everything it owns
    RecipeDelete { recipe_id: String, caller_id: Uuid },
}

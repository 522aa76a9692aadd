//! Functional-boundary apply function
//!
//! `apply()` is the entry point for atomic mutations of the in-memory
//! `Store`.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: either the command succeeds and the new state is
//!   returned, or it fails and the state passed in is dropped. Callers keep
//!   the previous state by cloning before the call.
//! - **No panics**: invalid input returns typed errors
//!
//! ## Example
//!
//! ```
//! use recipebook_core::{apply, Command, Store};
//! use recipebook_core::model::CreateRecipeRequest;
//! use uuid::Uuid;
//!
//! let state = Store::new();
//! let cmd = Command::RecipeCreate {
//!     caller_id: Uuid::new_v4(),
//!     request: CreateRecipeRequest {
//!         title: "Porridge".to_string(),
//!         ..Default::default()
//!     },
//! };
//!
//! let new_state = apply(state, cmd).unwrap();
//! assert_eq!(new_state.recipe_count(), 1);
//! ```

use crate::commands::Command;
use crate::errors::Result;
use crate::ops::{recipe_ops, Store};

/// Apply a command to a store, returning the new store state
///
/// Takes ownership of the current state, executes the command, and returns
/// either the new state or an error. A failed update may already have created
/// catalog entries on the owned state; those are discarded with it.
///
/// # Arguments
///
/// * `state` - Current store state (ownership transferred)
/// * `cmd` - Command to execute
///
/// # Errors
///
/// Returns the `RecipeError` of the failed operation: not-found,
/// access-denied, or validation.
pub fn apply(mut state: Store, cmd: Command) -> Result<Store> {
    match cmd {
        Command::RecipeCreate { caller_id, request } => {
            recipe_ops::create_recipe(&mut state, caller_id, &request)?;
            Ok(state)
        }

        Command::RecipeUpdate {
            recipe_id,
            caller_id,
            request,
        } => {
            recipe_ops::update_recipe(&mut state, &recipe_id, caller_id, &request)?;
            Ok(state)
        }

        Command::RecipeDelete {
            recipe_id,
            caller_id,
        } => {
            recipe_ops::delete_recipe(&mut state, &recipe_id, caller_id)?;
            Ok(state)
        }
    }
}

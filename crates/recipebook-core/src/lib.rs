//! Recipebook Core - in-memory recipe mutation and revision audit kernel
//!
//! This crate provides the domain logic for editing recipes while keeping an
//! append-only audit trail of structural changes:
//! - Recipe, ingredient-link, step and revision entry models
//! - Ingredient resolution against the ingredient catalog
//! - Canonical snapshot encoding of ingredient-links and steps
//! - Keyed-set revision diffing (ADD / UPDATE / DELETE)
//! - The recipe update use case and owner-gated revision queries
//! - Persistence port traits plus an in-memory `Store` implementing them
//!
//! Nothing in this crate performs I/O. Transactions belong to the caller.

pub mod apply;
pub mod commands;
pub mod diff;
pub mod errors;
pub mod ingredient_resolver;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;
pub mod repository;
pub mod snapshot;

// Re-export commonly used types
pub use apply::apply;
pub use commands::Command;
pub use errors::{ExError, ExErrorKind, RecipeError, Result};
pub use model::{
    DifficultyLevel, Ingredient, IngredientLink, IngredientUnit, NewRevision, Recipe,
    RevisionCategory, RevisionEntry, RevisionType, Step,
};
pub use ops::Store;
pub use repository::{IngredientCatalog, RecipeRepository, RecipeStore, RevisionLedger};

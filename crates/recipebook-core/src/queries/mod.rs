//! Revision history queries
//!
//! Read-only, owner-gated access to a recipe's revision log, either whole or
//! scoped to one ingredient link or one step. Results are ordered by creation
//! time, then revision identifier.

pub mod revision_queries;

pub use revision_queries::{
    list_ingredient_revisions, list_recipe_revisions, list_step_revisions, RevisionPage,
};

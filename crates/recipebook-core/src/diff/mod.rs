//! Revision diff engine.
//!
//! Compares a recipe's current ingredient links or steps with a requested
//! replacement collection and produces one pending revision per key that was
//! added, removed, or whose snapshot encoding changed.
//!
//! ## Entry points
//!
//! ```ignore
//! use recipebook_core::diff::{diff_ingredients, diff_steps, DiffContext};
//!
//! let ctx = DiffContext::new(recipe.recipe_id, caller_id);
//! let mut revisions = diff_ingredients(&ctx, &recipe.ingredients, &new_links)?;
//! revisions.extend(diff_steps(&ctx, &recipe.steps, &new_steps)?);
//! ```
//!
//! ## Guarantees
//!
//! - **No-op silence**: keys present on both sides with equal encodings emit nothing.
//! - **Exact count**: entries = changed keys + added keys + removed keys.
//! - **Stable order**: UPDATEs, then ADDs, then DELETEs, each ascending by key.
//! - **Payload shape**: ADD has empty previous data, DELETE has empty new data.

pub mod engine;
pub mod model;

pub use engine::{diff_ingredients, diff_steps};
pub use model::{DiffContext, DiffCounts};

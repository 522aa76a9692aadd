pub mod ingredient;
pub mod recipe;
pub mod request;
pub mod revision;
pub mod step;

pub use ingredient::{Ingredient, IngredientId, IngredientLink, IngredientUnit};
pub use recipe::{DifficultyLevel, Recipe, RecipeId};
pub use request::{CreateRecipeRequest, IngredientReference, StepRequest, UpdateRecipeRequest};
pub use revision::{NewRevision, RevisionCategory, RevisionEntry, RevisionId, RevisionType};
pub use step::{Step, StepNumber};

use chrono::{DateTime, Utc};

/// Current time at millisecond precision, the resolution records are stored at
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

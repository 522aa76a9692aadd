//! Persistence port traits
//!
//! The recipe update and revision query operations are written against these
//! traits rather than a concrete store. `ops::Store` implements them in memory;
//! the SQLite repository in `recipebook-store` implements them over a
//! connection or an open transaction.
//!
//! Implementations report infrastructure failures as
//! `RecipeError::Persistence`. Atomicity of a multi-call unit of work is the
//! caller's concern (a transaction, or an owned state that is discarded on
//! error).

use crate::errors::Result;
use crate::model::{
    Ingredient, IngredientId, NewRevision, Recipe, RecipeId, RevisionCategory, RevisionEntry,
};

/// Recipe load/save by identifier
pub trait RecipeRepository {
    /// Load a recipe with its ingredient links and steps
    ///
    /// # Returns
    /// * `Ok(None)` - No recipe has this identifier
    fn find_recipe(&self, recipe_id: RecipeId) -> Result<Option<Recipe>>;

    /// Insert a new recipe, assigning its identifier
    ///
    /// # Returns
    /// The stored recipe carrying its new identifier
    fn insert_recipe(&mut self, recipe: Recipe) -> Result<Recipe>;

    /// Persist scalar fields and replace both owned collections
    fn save_recipe(&mut self, recipe: &Recipe) -> Result<()>;

    /// Delete a recipe together with everything it owns
    ///
    /// # Returns
    /// * `true` - A recipe was removed
    /// * `false` - No recipe had this identifier
    fn delete_recipe(&mut self, recipe_id: RecipeId) -> Result<bool>;

    /// Existence check
    fn recipe_exists(&self, recipe_id: RecipeId) -> Result<bool> {
        Ok(self.find_recipe(recipe_id)?.is_some())
    }
}

/// Shared ingredient catalog
pub trait IngredientCatalog {
    fn find_ingredient(&self, ingredient_id: IngredientId) -> Result<Option<Ingredient>>;

    /// Case-insensitive lookup on the trimmed name
    fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>>;

    /// Create a catalog entry with the given (already trimmed) name
    fn create_ingredient(&mut self, name: &str) -> Result<Ingredient>;
}

/// Append-only revision log
pub trait RevisionLedger {
    /// Persist a batch of revisions, assigning identifiers and timestamps
    fn append_revisions(&mut self, revisions: Vec<NewRevision>) -> Result<Vec<RevisionEntry>>;

    /// All revisions of a recipe, ordered by creation time then identifier
    fn revisions_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<RevisionEntry>>;

    /// Revisions of one ingredient link or step, same ordering
    fn revisions_for_subject(
        &self,
        recipe_id: RecipeId,
        category: RevisionCategory,
        subject_id: i64,
    ) -> Result<Vec<RevisionEntry>>;
}

/// Everything the recipe operations need from persistence
pub trait RecipeStore: RecipeRepository + IngredientCatalog + RevisionLedger {}

impl<T> RecipeStore for T where T: RecipeRepository + IngredientCatalog + RevisionLedger {}

//! Core persistence ports over SQLite
//!
//! `SqliteRecipeStore` adapts `SqliteRepo` to the `recipebook-core` port
//! traits so the update and query operations run unchanged against SQLite.
//! Wrap an open `Transaction` to make a whole use case atomic.

use recipebook_core::errors::Result;
use recipebook_core::model::{
    Ingredient, IngredientId, NewRevision, Recipe, RecipeId, RevisionCategory, RevisionEntry,
};
use recipebook_core::{IngredientCatalog, RecipeRepository, RevisionLedger};
use rusqlite::Connection;

use crate::errors::to_domain;
use crate::repo::sqlite_repo::SqliteRepo;

/// Port-trait view of a connection or transaction
pub struct SqliteRecipeStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteRecipeStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl RecipeRepository for SqliteRecipeStore<'_> {
    fn find_recipe(&self, recipe_id: RecipeId) -> Result<Option<Recipe>> {
        SqliteRepo::get_recipe(self.conn, recipe_id).map_err(to_domain)
    }

    fn insert_recipe(&mut self, recipe: Recipe) -> Result<Recipe> {
        let recipe_id = SqliteRepo::insert_recipe(self.conn, &recipe).map_err(to_domain)?;
        // Re-read so timestamps carry the stored precision
        Ok(self.find_recipe(recipe_id)?.unwrap_or(Recipe {
            recipe_id,
            ..recipe
        }))
    }

    fn save_recipe(&mut self, recipe: &Recipe) -> Result<()> {
        SqliteRepo::update_recipe(self.conn, recipe).map_err(to_domain)
    }

    fn delete_recipe(&mut self, recipe_id: RecipeId) -> Result<bool> {
        SqliteRepo::delete_recipe(self.conn, recipe_id).map_err(to_domain)
    }
}

impl IngredientCatalog for SqliteRecipeStore<'_> {
    fn find_ingredient(&self, ingredient_id: IngredientId) -> Result<Option<Ingredient>> {
        SqliteRepo::get_ingredient(self.conn, ingredient_id).map_err(to_domain)
    }

    fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        SqliteRepo::find_ingredient_by_name(self.conn, name).map_err(to_domain)
    }

    fn create_ingredient(&mut self, name: &str) -> Result<Ingredient> {
        SqliteRepo::insert_ingredient(self.conn, name).map_err(to_domain)
    }
}

impl RevisionLedger for SqliteRecipeStore<'_> {
    fn append_revisions(&mut self, revisions: Vec<NewRevision>) -> Result<Vec<RevisionEntry>> {
        SqliteRepo::insert_revisions(self.conn, revisions).map_err(to_domain)
    }

    fn revisions_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<RevisionEntry>> {
        SqliteRepo::list_revisions(self.conn, recipe_id).map_err(to_domain)
    }

    fn revisions_for_subject(
        &self,
        recipe_id: RecipeId,
        category: RevisionCategory,
        subject_id: i64,
    ) -> Result<Vec<RevisionEntry>> {
        SqliteRepo::list_subject_revisions(self.conn, recipe_id, category, subject_id)
            .map_err(to_domain)
    }
}

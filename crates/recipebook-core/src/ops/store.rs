use std::collections::BTreeMap;

use crate::errors::Result;
use crate::model::{
    now_millis, Ingredient, IngredientId, NewRevision, Recipe, RecipeId, RevisionCategory,
    RevisionEntry, RevisionId,
};
use crate::repository::{IngredientCatalog, RecipeRepository, RevisionLedger};

/// In-memory store for recipes, the ingredient catalog, and revisions
///
/// Not thread-safe - designed for single-threaded use and for the
/// functional-boundary `apply()`. Identifiers are assigned sequentially
/// starting at 1.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) recipes: BTreeMap<RecipeId, Recipe>,
    pub(crate) ingredients: BTreeMap<IngredientId, Ingredient>,
    pub(crate) revisions: Vec<RevisionEntry>,
    last_recipe_id: RecipeId,
    last_ingredient_id: IngredientId,
    last_revision_id: RevisionId,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn revision_count(&self) -> usize {
        self.revisions.len()
    }

    fn sorted(mut entries: Vec<RevisionEntry>) -> Vec<RevisionEntry> {
        entries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.revision_id.cmp(&b.revision_id))
        });
        entries
    }
}

impl RecipeRepository for Store {
    fn find_recipe(&self, recipe_id: RecipeId) -> Result<Option<Recipe>> {
        Ok(self.recipes.get(&recipe_id).cloned())
    }

    fn insert_recipe(&mut self, mut recipe: Recipe) -> Result<Recipe> {
        self.last_recipe_id += 1;
        recipe.recipe_id = self.last_recipe_id;
        self.recipes.insert(recipe.recipe_id, recipe.clone());
        Ok(recipe)
    }

    fn save_recipe(&mut self, recipe: &Recipe) -> Result<()> {
        self.recipes.insert(recipe.recipe_id, recipe.clone());
        Ok(())
    }

    fn delete_recipe(&mut self, recipe_id: RecipeId) -> Result<bool> {
        let removed = self.recipes.remove(&recipe_id).is_some();
        if removed {
            self.revisions.retain(|r| r.recipe_id != recipe_id);
        }
        Ok(removed)
    }
}

impl IngredientCatalog for Store {
    fn find_ingredient(&self, ingredient_id: IngredientId) -> Result<Option<Ingredient>> {
        Ok(self.ingredients.get(&ingredient_id).cloned())
    }

    fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        let key = Ingredient::name_key(name);
        Ok(self
            .ingredients
            .values()
            .find(|i| Ingredient::name_key(&i.name) == key)
            .cloned())
    }

    fn create_ingredient(&mut self, name: &str) -> Result<Ingredient> {
        self.last_ingredient_id += 1;
        let ingredient = Ingredient::new(self.last_ingredient_id, name.trim().to_string());
        self.ingredients
            .insert(ingredient.ingredient_id, ingredient.clone());
        Ok(ingredient)
    }
}

impl RevisionLedger for Store {
    fn append_revisions(&mut self, revisions: Vec<NewRevision>) -> Result<Vec<RevisionEntry>> {
        let created_at = now_millis();
        let entries: Vec<RevisionEntry> = revisions
            .into_iter()
            .map(|revision| {
                self.last_revision_id += 1;
                RevisionEntry::from_new(revision, self.last_revision_id, created_at)
            })
            .collect();
        self.revisions.extend(entries.iter().cloned());
        Ok(entries)
    }

    fn revisions_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<RevisionEntry>> {
        Ok(Self::sorted(
            self.revisions
                .iter()
                .filter(|r| r.recipe_id == recipe_id)
                .cloned()
                .collect(),
        ))
    }

    fn revisions_for_subject(
        &self,
        recipe_id: RecipeId,
        category: RevisionCategory,
        subject_id: i64,
    ) -> Result<Vec<RevisionEntry>> {
        Ok(Self::sorted(
            self.revisions
                .iter()
                .filter(|r| r.recipe_id == recipe_id && r.concerns(category, subject_id))
                .cloned()
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RevisionType;
    use uuid::Uuid;

    fn pending(recipe_id: RecipeId, category: RevisionCategory, subject_id: i64) -> NewRevision {
        NewRevision {
            recipe_id,
            user_id: Uuid::nil(),
            category,
            change_type: RevisionType::Add,
            subject_id,
            previous_data: String::new(),
            new_data: "{}".to_string(),
            comment: None,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut store = Store::new();
        let a = store.insert_recipe(Recipe::new(Uuid::nil(), "A".to_string())).unwrap();
        let b = store.insert_recipe(Recipe::new(Uuid::nil(), "B".to_string())).unwrap();
        assert_eq!((a.recipe_id, b.recipe_id), (1, 2));

        let salt = store.create_ingredient(" Salt ").unwrap();
        assert_eq!(salt.ingredient_id, 1);
        assert_eq!(salt.name, "Salt");
    }

    #[test]
    fn test_delete_cascades_revisions() {
        let mut store = Store::new();
        let kept = store.insert_recipe(Recipe::new(Uuid::nil(), "Kept".to_string())).unwrap();
        let gone = store.insert_recipe(Recipe::new(Uuid::nil(), "Gone".to_string())).unwrap();
        store
            .append_revisions(vec![
                pending(kept.recipe_id, RevisionCategory::Step, 1),
                pending(gone.recipe_id, RevisionCategory::Step, 1),
            ])
            .unwrap();

        assert!(store.delete_recipe(gone.recipe_id).unwrap());
        assert!(!store.delete_recipe(gone.recipe_id).unwrap());
        assert_eq!(store.revision_count(), 1);
        assert!(!store.recipe_exists(gone.recipe_id).unwrap());
    }

    #[test]
    fn test_subject_filter() {
        let mut store = Store::new();
        store
            .append_revisions(vec![
                pending(1, RevisionCategory::Ingredient, 7),
                pending(1, RevisionCategory::Step, 7),
                pending(1, RevisionCategory::Ingredient, 8),
                pending(2, RevisionCategory::Ingredient, 7),
            ])
            .unwrap();

        let entries = store
            .revisions_for_subject(1, RevisionCategory::Ingredient, 7)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].revision_id, 1);
        assert_eq!(store.revisions_for_recipe(1).unwrap().len(), 3);
    }
}

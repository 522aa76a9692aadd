use serde::Serialize;
use uuid::Uuid;

use crate::errors::{RecipeError, Result};
use crate::model::{IngredientId, RecipeId, RevisionCategory, RevisionEntry, StepNumber};
use crate::ops::{load_owned_recipe, parse_recipe_id};
use crate::repository::{RecipeRepository, RevisionLedger};

const VIEW_REVISIONS: &str = "view revisions for";

/// Revision entries with their count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevisionPage {
    pub recipe_id: RecipeId,
    pub entries: Vec<RevisionEntry>,
    pub total_count: usize,
}

impl RevisionPage {
    fn new(recipe_id: RecipeId, mut entries: Vec<RevisionEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.revision_id.cmp(&b.revision_id))
        });
        let total_count = entries.len();
        Self {
            recipe_id,
            entries,
            total_count,
        }
    }
}

/// All revisions of a recipe, any category
///
/// # Errors
///
/// Returns `InvalidRecipeId`, `RecipeNotFound`, or `AccessDenied` for a
/// caller other than the owning user.
pub fn list_recipe_revisions<S>(store: &S, recipe_id: &str, caller_id: Uuid) -> Result<RevisionPage>
where
    S: RecipeRepository + RevisionLedger + ?Sized,
{
    let recipe_id = parse_recipe_id(recipe_id)?;
    load_owned_recipe(store, recipe_id, caller_id, VIEW_REVISIONS)?;

    Ok(RevisionPage::new(
        recipe_id,
        store.revisions_for_recipe(recipe_id)?,
    ))
}

/// Revisions of one ingredient link of a recipe
///
/// The link must currently exist: history of a removed ingredient is only
/// reachable through [`list_recipe_revisions`].
///
/// # Errors
///
/// As [`list_recipe_revisions`], plus `RecipeIngredientNotFound` if the
/// recipe does not currently use the ingredient.
pub fn list_ingredient_revisions<S>(
    store: &S,
    recipe_id: &str,
    ingredient_id: IngredientId,
    caller_id: Uuid,
) -> Result<RevisionPage>
where
    S: RecipeRepository + RevisionLedger + ?Sized,
{
    let recipe_id = parse_recipe_id(recipe_id)?;
    let recipe = load_owned_recipe(store, recipe_id, caller_id, VIEW_REVISIONS)?;

    if recipe.ingredient_link(ingredient_id).is_none() {
        return Err(RecipeError::RecipeIngredientNotFound {
            recipe_id,
            ingredient_id,
        });
    }

    Ok(RevisionPage::new(
        recipe_id,
        store.revisions_for_subject(recipe_id, RevisionCategory::Ingredient, ingredient_id)?,
    ))
}

/// Revisions of one step of a recipe, identified by step number
///
/// # Errors
///
/// As [`list_recipe_revisions`], plus `StepNotFound` if the recipe has no
/// step with this number.
pub fn list_step_revisions<S>(
    store: &S,
    recipe_id: &str,
    step_number: StepNumber,
    caller_id: Uuid,
) -> Result<RevisionPage>
where
    S: RecipeRepository + RevisionLedger + ?Sized,
{
    let recipe_id = parse_recipe_id(recipe_id)?;
    let recipe = load_owned_recipe(store, recipe_id, caller_id, VIEW_REVISIONS)?;

    if recipe.step(step_number).is_none() {
        return Err(RecipeError::StepNotFound {
            recipe_id,
            step_number,
        });
    }

    Ok(RevisionPage::new(
        recipe_id,
        store.revisions_for_subject(recipe_id, RevisionCategory::Step, i64::from(step_number))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CreateRecipeRequest, IngredientReference, IngredientUnit, StepRequest,
        UpdateRecipeRequest,
    };
    use crate::ops::{create_recipe, update_recipe, Store};
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_history_is_not_an_error() {
        let owner = Uuid::new_v4();
        let mut store = Store::new();
        let recipe = create_recipe(
            &mut store,
            owner,
            &CreateRecipeRequest {
                title: "Tea".to_string(),
                steps: vec![StepRequest::new(1, "Steep")],
                ..Default::default()
            },
        )
        .unwrap();
        let id = recipe.recipe_id.to_string();

        let page = list_recipe_revisions(&store, &id, owner).unwrap();
        assert_eq!(page.total_count, 0);
        assert!(page.entries.is_empty());

        let page = list_step_revisions(&store, &id, 1, owner).unwrap();
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_removed_ingredient_is_not_found() {
        let owner = Uuid::new_v4();
        let mut store = Store::new();
        let recipe = create_recipe(
            &mut store,
            owner,
            &CreateRecipeRequest {
                title: "Stew".to_string(),
                ingredients: vec![IngredientReference::by_name(
                    "Carrot",
                    Decimal::TWO,
                    IngredientUnit::Piece,
                )],
                ..Default::default()
            },
        )
        .unwrap();
        let id = recipe.recipe_id.to_string();
        let carrot = recipe.ingredients[0].ingredient_id;

        update_recipe(
            &mut store,
            &id,
            owner,
            &UpdateRecipeRequest {
                ingredients: Some(Vec::new()),
                ..Default::default()
            },
        )
        .unwrap();

        let err = list_ingredient_revisions(&store, &id, carrot, owner).unwrap_err();
        assert!(matches!(err, RecipeError::RecipeIngredientNotFound { .. }));

        let page = list_recipe_revisions(&store, &id, owner).unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.entries[0].subject_id, carrot);
    }

    #[test]
    fn test_unknown_step_is_not_found() {
        let owner = Uuid::new_v4();
        let mut store = Store::new();
        let recipe = create_recipe(
            &mut store,
            owner,
            &CreateRecipeRequest {
                title: "Toast".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let err = list_step_revisions(&store, &recipe.recipe_id.to_string(), 3, owner).unwrap_err();
        assert_eq!(
            err,
            RecipeError::StepNotFound {
                recipe_id: recipe.recipe_id,
                step_number: 3
            }
        );
    }
}

//! Transport representations returned by the engine.
//!
//! Plain camelCase data containers mapped from core entities. Mapping is
//! field renaming only.

use chrono::{DateTime, Utc};
use recipebook_core::model::{
    DifficultyLevel, IngredientId, IngredientLink, IngredientUnit, Recipe, RecipeId,
    RevisionCategory, RevisionEntry, RevisionId, RevisionType, Step, StepNumber,
};
use recipebook_core::queries::RevisionPage;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientView {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub quantity: Decimal,
    pub unit: IngredientUnit,
    pub is_optional: bool,
}

impl From<&IngredientLink> for RecipeIngredientView {
    fn from(link: &IngredientLink) -> Self {
        Self {
            ingredient_id: link.ingredient_id,
            ingredient_name: link.ingredient_name.clone(),
            quantity: link.quantity.normalize(),
            unit: link.unit,
            is_optional: link.is_optional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepView {
    pub step_number: StepNumber,
    pub instruction: String,
    pub optional: bool,
    pub timer_seconds: Option<u32>,
}

impl From<&Step> for RecipeStepView {
    fn from(step: &Step) -> Self {
        Self {
            step_number: step.step_number,
            instruction: step.instruction.clone(),
            optional: step.optional,
            timer_seconds: step.timer_seconds,
        }
    }
}

/// A recipe with its ingredient-links and steps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub recipe_id: RecipeId,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub origin_url: Option<String>,
    pub servings: Option<u32>,
    pub preparation_time: Option<u32>,
    pub cooking_time: Option<u32>,
    pub difficulty: Option<DifficultyLevel>,
    pub ingredients: Vec<RecipeIngredientView>,
    pub steps: Vec<RecipeStepView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Recipe> for RecipeView {
    fn from(recipe: &Recipe) -> Self {
        Self {
            recipe_id: recipe.recipe_id,
            user_id: recipe.user_id,
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            origin_url: recipe.origin_url.clone(),
            servings: recipe.servings,
            preparation_time: recipe.preparation_time,
            cooking_time: recipe.cooking_time,
            difficulty: recipe.difficulty,
            ingredients: recipe.ingredients.iter().map(Into::into).collect(),
            steps: recipe.steps.iter().map(Into::into).collect(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Revisions
// ---------------------------------------------------------------------------

/// One revision entry; `previousData` and `newData` are the stored snapshots
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionView {
    pub revision_id: RevisionId,
    pub recipe_id: RecipeId,
    pub user_id: Uuid,
    pub category: RevisionCategory,
    pub change_type: RevisionType,
    pub previous_data: String,
    pub new_data: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&RevisionEntry> for RevisionView {
    fn from(entry: &RevisionEntry) -> Self {
        Self {
            revision_id: entry.revision_id,
            recipe_id: entry.recipe_id,
            user_id: entry.user_id,
            category: entry.category,
            change_type: entry.change_type,
            previous_data: entry.previous_data.clone(),
            new_data: entry.new_data.clone(),
            comment: entry.comment.clone(),
            created_at: entry.created_at,
        }
    }
}

fn revision_views(page: &RevisionPage) -> Vec<RevisionView> {
    page.entries.iter().map(Into::into).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionsResponse {
    pub recipe_id: RecipeId,
    pub total_count: usize,
    pub revisions: Vec<RevisionView>,
}

impl From<&RevisionPage> for RevisionsResponse {
    fn from(page: &RevisionPage) -> Self {
        Self {
            recipe_id: page.recipe_id,
            total_count: page.total_count,
            revisions: revision_views(page),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRevisionsResponse {
    pub recipe_id: RecipeId,
    pub ingredient_id: IngredientId,
    pub total_count: usize,
    pub revisions: Vec<RevisionView>,
}

impl IngredientRevisionsResponse {
    pub fn new(page: &RevisionPage, ingredient_id: IngredientId) -> Self {
        Self {
            recipe_id: page.recipe_id,
            ingredient_id,
            total_count: page.total_count,
            revisions: revision_views(page),
        }
    }
}

/// Revisions of one step; `stepId` is the step number
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRevisionsResponse {
    pub recipe_id: RecipeId,
    pub step_id: StepNumber,
    pub total_count: usize,
    pub revisions: Vec<RevisionView>,
}

impl StepRevisionsResponse {
    pub fn new(page: &RevisionPage, step_id: StepNumber) -> Self {
        Self {
            recipe_id: page.recipe_id,
            step_id,
            total_count: page.total_count,
            revisions: revision_views(page),
        }
    }
}

use uuid::Uuid;

use crate::diff::{diff_ingredients, diff_steps, DiffContext};
use crate::errors::{RecipeError, Result};
use crate::ingredient_resolver::resolve_links;
use crate::model::{
    now_millis, CreateRecipeRequest, Recipe, RecipeId, RevisionEntry, Step, StepRequest,
    UpdateRecipeRequest,
};
use crate::repository::{RecipeRepository, RecipeStore};

/// Result of a successful recipe update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// The recipe as persisted
    pub recipe: Recipe,

    /// Revisions written by this update (empty for a no-op)
    pub revisions: Vec<RevisionEntry>,
}

/// Parse an external recipe identifier
///
/// # Errors
///
/// Returns `InvalidRecipeId` unless `raw` is a positive integer.
pub fn parse_recipe_id(raw: &str) -> Result<RecipeId> {
    raw.trim()
        .parse::<RecipeId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| RecipeError::InvalidRecipeId {
            raw: raw.to_string(),
        })
}

/// Load a recipe and check that `caller_id` owns it
///
/// # Arguments
/// * `store` - Recipe repository
/// * `recipe_id` - Parsed recipe identifier
/// * `caller_id` - Acting user
/// * `action` - Verb used in the access-denied message ("update", "view revisions for")
///
/// # Errors
///
/// Returns `RecipeNotFound` if the recipe does not exist, or `AccessDenied`
/// if the caller is not its owning user.
pub fn load_owned_recipe<S>(
    store: &S,
    recipe_id: RecipeId,
    caller_id: Uuid,
    action: &str,
) -> Result<Recipe>
where
    S: RecipeRepository + ?Sized,
{
    let recipe = store
        .find_recipe(recipe_id)?
        .ok_or(RecipeError::RecipeNotFound { recipe_id })?;

    if !recipe.is_owned_by(caller_id) {
        return Err(RecipeError::AccessDenied {
            recipe_id,
            caller_id,
            action: action.to_string(),
        });
    }

    Ok(recipe)
}

/// Update a recipe and record revisions for its ingredients and steps
///
/// Scalar fields present in the request are copied onto the recipe without
/// revisions. A present ingredient or step list (including an empty one)
/// replaces the current collection and is diffed against it; an absent list
/// leaves the collection untouched. Revisions are appended in one batch, and
/// only when the diff produced at least one.
///
/// The caller supplies atomicity: on error nothing must be committed.
///
/// # Arguments
/// * `store` - Persistence collaborator (transaction-scoped or owned state)
/// * `recipe_id` - External recipe identifier
/// * `caller_id` - Acting user
/// * `request` - Requested changes
///
/// # Returns
/// The persisted recipe and the revisions written
///
/// # Errors
///
/// * `InvalidRecipeId` / `RecipeNotFound` - malformed or unknown identifier
/// * `AccessDenied` - caller is not the owning user
/// * `IngredientUnresolvable` - an ingredient reference has no valid id and no name
pub fn update_recipe<S>(
    store: &mut S,
    recipe_id: &str,
    caller_id: Uuid,
    request: &UpdateRecipeRequest,
) -> Result<UpdateOutcome>
where
    S: RecipeStore + ?Sized,
{
    let recipe_id = parse_recipe_id(recipe_id)?;
    let mut recipe = load_owned_recipe(&*store, recipe_id, caller_id, "update")?;

    apply_field_updates(&mut recipe, request);

    let ctx = DiffContext::new(recipe_id, caller_id);
    let mut pending = Vec::new();

    if let Some(references) = &request.ingredients {
        let links = resolve_links(store, references)?;
        pending.extend(diff_ingredients(&ctx, &recipe.ingredients, &links)?);
        recipe.ingredients = links;
    }

    if let Some(step_requests) = &request.steps {
        let steps = collect_steps(step_requests);
        pending.extend(diff_steps(&ctx, &recipe.steps, &steps)?);
        recipe.set_steps(steps);
    }

    recipe.updated_at = now_millis();
    store.save_recipe(&recipe)?;

    let revisions = if pending.is_empty() {
        Vec::new()
    } else {
        store.append_revisions(pending)?
    };

    tracing::debug!(
        recipe_id,
        revision_count = revisions.len(),
        "recipe updated"
    );

    Ok(UpdateOutcome { recipe, revisions })
}

/// Create a recipe owned by `caller_id`
///
/// Ingredients are resolved like an update; no revisions are recorded.
///
/// # Errors
///
/// Returns `InvalidTitle` for a blank title, or `IngredientUnresolvable`
/// for an ingredient reference that cannot be resolved.
pub fn create_recipe<S>(store: &mut S, caller_id: Uuid, request: &CreateRecipeRequest) -> Result<Recipe>
where
    S: RecipeStore + ?Sized,
{
    let title = request.title.trim();
    if title.is_empty() {
        return Err(RecipeError::InvalidTitle {
            reason: "title must not be blank".to_string(),
        });
    }

    let mut recipe = Recipe::new(caller_id, title.to_string());
    recipe.description = request.description.clone();
    recipe.origin_url = request.origin_url.clone();
    recipe.servings = request.servings;
    recipe.preparation_time = request.preparation_time;
    recipe.cooking_time = request.cooking_time;
    recipe.difficulty = request.difficulty;
    recipe.ingredients = resolve_links(store, &request.ingredients)?;
    recipe.set_steps(collect_steps(&request.steps));

    let recipe = store.insert_recipe(recipe)?;
    tracing::debug!(recipe_id = recipe.recipe_id, "recipe created");
    Ok(recipe)
}

/// Read a recipe by external identifier
///
/// Reads are not ownership-gated.
///
/// # Errors
///
/// Returns `InvalidRecipeId` or `RecipeNotFound`.
pub fn get_recipe<S>(store: &S, recipe_id: &str) -> Result<Recipe>
where
    S: RecipeRepository + ?Sized,
{
    let recipe_id = parse_recipe_id(recipe_id)?;
    store
        .find_recipe(recipe_id)?
        .ok_or(RecipeError::RecipeNotFound { recipe_id })
}

/// Delete a recipe with its ingredient links, steps, and revisions
///
/// # Errors
///
/// Returns `InvalidRecipeId`, `RecipeNotFound`, or `AccessDenied` for a
/// caller other than the owning user.
pub fn delete_recipe<S>(store: &mut S, recipe_id: &str, caller_id: Uuid) -> Result<RecipeId>
where
    S: RecipeRepository + ?Sized,
{
    let recipe_id = parse_recipe_id(recipe_id)?;
    load_owned_recipe(&*store, recipe_id, caller_id, "delete")?;

    if !store.delete_recipe(recipe_id)? {
        return Err(RecipeError::RecipeNotFound { recipe_id });
    }
    tracing::debug!(recipe_id, "recipe deleted");
    Ok(recipe_id)
}

fn apply_field_updates(recipe: &mut Recipe, request: &UpdateRecipeRequest) {
    if let Some(title) = &request.title {
        recipe.title = title.clone();
    }
    if let Some(description) = &request.description {
        recipe.description = Some(description.clone());
    }
    if let Some(origin_url) = &request.origin_url {
        recipe.origin_url = Some(origin_url.clone());
    }
    if let Some(servings) = request.servings {
        recipe.servings = Some(servings);
    }
    if let Some(preparation_time) = request.preparation_time {
        recipe.preparation_time = Some(preparation_time);
    }
    if let Some(cooking_time) = request.cooking_time {
        recipe.cooking_time = Some(cooking_time);
    }
    if let Some(difficulty) = request.difficulty {
        recipe.difficulty = Some(difficulty);
    }
}

// Later requests for the same step number replace earlier ones.
fn collect_steps(requests: &[StepRequest]) -> Vec<Step> {
    let mut steps: Vec<Step> = Vec::with_capacity(requests.len());
    for step in requests.iter().map(StepRequest::to_step) {
        match steps.iter_mut().find(|s| s.step_number == step.step_number) {
            Some(existing) => *existing = step,
            None => steps.push(step),
        }
    }
    steps
}

//! Recipe Update Tests
//!
//! End-to-end behaviour of the recipe update use case over the in-memory
//! store.
//!
//! ## Scenarios Covered
//!
//! 1. Update one ingredient and add another (UPDATE + ADD)
//! 2. Clear the steps with an empty list (DELETE per step)
//! 3. Resubmit an identical ingredient (no revisions)
//! 4. Unresolvable ingredient reference (validation, no writes)
//! 5. Non-owner caller (access denied, no writes)
//! 6. Same request applied twice (converges)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use recipebook_core::errors::ExErrorKind;
use recipebook_core::model::{
    CreateRecipeRequest, IngredientReference, IngredientUnit, StepRequest, UpdateRecipeRequest,
};
use recipebook_core::ops::{create_recipe, get_recipe, update_recipe};
use recipebook_core::queries::{
    list_ingredient_revisions, list_recipe_revisions, list_step_revisions,
};
use recipebook_core::{
    ExError, IngredientCatalog, Recipe, RecipeError, RevisionCategory, RevisionType, Store,
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn dec(text: &str) -> Decimal {
    text.parse().unwrap()
}

/// Recipe with Salt 1.0 TSP and step 1 "Mix ingredients"
fn salted_recipe(store: &mut Store, owner: Uuid) -> Recipe {
    let request = CreateRecipeRequest {
        title: "Seasoned Dough".to_string(),
        ingredients: vec![IngredientReference::by_name(
            "Salt",
            dec("1.0"),
            IngredientUnit::Tsp,
        )],
        steps: vec![StepRequest::new(1, "Mix ingredients")],
        ..Default::default()
    };
    create_recipe(store, owner, &request).unwrap()
}

#[test]
fn test_update_quantity_and_add_ingredient() {
    // GIVEN a recipe with Salt 1.0 TSP
    let owner = Uuid::new_v4();
    let mut store = Store::new();
    let recipe = salted_recipe(&mut store, owner);
    let salt_id = recipe.ingredients[0].ingredient_id;

    // WHEN Salt becomes 2.0 and optional Pepper 0.5 TSP is added
    let request = UpdateRecipeRequest {
        ingredients: Some(vec![
            IngredientReference::by_id(salt_id, dec("2.0"), IngredientUnit::Tsp),
            IngredientReference::by_name("Pepper", dec("0.5"), IngredientUnit::Tsp).optional(true),
        ]),
        ..Default::default()
    };
    let outcome = update_recipe(&mut store, &recipe.recipe_id.to_string(), owner, &request).unwrap();

    // THEN exactly one UPDATE for Salt and one ADD for Pepper are recorded
    assert_eq!(outcome.revisions.len(), 2);
    let update = &outcome.revisions[0];
    assert_eq!(update.category, RevisionCategory::Ingredient);
    assert_eq!(update.change_type, RevisionType::Update);
    assert_eq!(update.subject_id, salt_id);
    assert!(update.previous_data.contains("\"quantity\":\"1\""));
    assert!(update.new_data.contains("\"quantity\":\"2\""));
    assert_eq!(update.comment.as_deref(), Some("Ingredient quantity updated"));

    let add = &outcome.revisions[1];
    assert_eq!(add.change_type, RevisionType::Add);
    assert!(add.previous_data.is_empty());
    assert!(add.new_data.contains("Pepper"));

    // AND the recipe now carries both links in request order
    let stored = get_recipe(&store, &recipe.recipe_id.to_string()).unwrap();
    let names: Vec<_> = stored
        .ingredients
        .iter()
        .map(|l| l.ingredient_name.as_str())
        .collect();
    assert_eq!(names, vec!["Salt", "Pepper"]);
    assert!(stored.ingredients[1].is_optional);
}

#[test]
fn test_empty_steps_list_deletes_step() {
    // GIVEN a recipe with step 1
    let owner = Uuid::new_v4();
    let mut store = Store::new();
    let recipe = salted_recipe(&mut store, owner);

    // WHEN the update supplies an empty steps list
    let request = UpdateRecipeRequest {
        steps: Some(Vec::new()),
        ..Default::default()
    };
    let outcome = update_recipe(&mut store, &recipe.recipe_id.to_string(), owner, &request).unwrap();

    // THEN one DELETE/STEP revision is recorded and ingredients are untouched
    assert_eq!(outcome.revisions.len(), 1);
    assert_eq!(outcome.revisions[0].category, RevisionCategory::Step);
    assert_eq!(outcome.revisions[0].change_type, RevisionType::Delete);
    assert_eq!(outcome.revisions[0].subject_id, 1);
    assert!(outcome.revisions[0].new_data.is_empty());
    assert!(outcome.recipe.steps.is_empty());
    assert_eq!(outcome.recipe.ingredients.len(), 1);
}

#[test]
fn test_identical_ingredient_is_noop() {
    // GIVEN a recipe with Salt 1.0 TSP
    let owner = Uuid::new_v4();
    let mut store = Store::new();
    let recipe = salted_recipe(&mut store, owner);
    let salt_id = recipe.ingredients[0].ingredient_id;

    // WHEN Salt is resubmitted unchanged (quantity written with another scale)
    let request = UpdateRecipeRequest {
        ingredients: Some(vec![
            IngredientReference::by_id(salt_id, dec("1.00"), IngredientUnit::Tsp).optional(false),
        ]),
        ..Default::default()
    };
    let outcome = update_recipe(&mut store, &recipe.recipe_id.to_string(), owner, &request).unwrap();

    // THEN no revisions are produced or stored
    assert!(outcome.revisions.is_empty());
    assert_eq!(store.revision_count(), 0);
}

#[test]
fn test_unresolvable_ingredient_aborts() {
    // GIVEN a recipe with Salt and step 1
    let owner = Uuid::new_v4();
    let mut store = Store::new();
    let recipe = salted_recipe(&mut store, owner);
    let catalog_before = store.ingredient_count();

    // WHEN an ingredient reference has neither an id nor a name
    let request = UpdateRecipeRequest {
        title: Some("Renamed".to_string()),
        ingredients: Some(vec![
            IngredientReference::by_name("Garlic", dec("2"), IngredientUnit::Clove),
            IngredientReference {
                ingredient_id: None,
                ingredient_name: None,
                quantity: dec("1"),
                unit: IngredientUnit::G,
                is_optional: None,
            },
        ]),
        steps: Some(Vec::new()),
        ..Default::default()
    };
    let err = update_recipe(&mut store, &recipe.recipe_id.to_string(), owner, &request).unwrap_err();

    // THEN a validation error is raised
    assert_eq!(err, RecipeError::IngredientUnresolvable { position: 1 });
    assert_eq!(ExError::from(err).kind(), ExErrorKind::Validation);

    // AND neither the recipe, the catalog, nor the revision log changed
    let stored = get_recipe(&store, &recipe.recipe_id.to_string()).unwrap();
    assert_eq!(stored, recipe);
    assert_eq!(store.ingredient_count(), catalog_before);
    assert!(store.find_ingredient_by_name("garlic").unwrap().is_none());
    assert_eq!(store.revision_count(), 0);
}

#[test]
fn test_non_owner_is_denied() {
    // GIVEN a recipe owned by someone else
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let mut store = Store::new();
    let recipe = salted_recipe(&mut store, owner);
    let id = recipe.recipe_id.to_string();

    // WHEN the intruder updates it
    let request = UpdateRecipeRequest {
        title: Some("Mine now".to_string()),
        steps: Some(Vec::new()),
        ..Default::default()
    };
    let err = update_recipe(&mut store, &id, intruder, &request).unwrap_err();

    // THEN access is denied and nothing is written
    assert!(matches!(err, RecipeError::AccessDenied { .. }));
    assert_eq!(get_recipe(&store, &id).unwrap(), recipe);
    assert_eq!(store.revision_count(), 0);

    // AND every revision read is denied too
    let salt_id = recipe.ingredients[0].ingredient_id;
    for result in [
        list_recipe_revisions(&store, &id, intruder),
        list_ingredient_revisions(&store, &id, salt_id, intruder),
        list_step_revisions(&store, &id, 1, intruder),
    ] {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::AccessDenied);
    }
}

#[test]
fn test_malformed_and_missing_ids_are_not_found() {
    let owner = Uuid::new_v4();
    let mut store = Store::new();
    salted_recipe(&mut store, owner);
    let request = UpdateRecipeRequest::default();

    for raw in ["abc", "0", "999"] {
        let err = update_recipe(&mut store, raw, owner, &request).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound, "id {raw:?}");
    }
}

#[test]
fn test_same_request_twice_converges() {
    // GIVEN a recipe and a request that changes both collections
    let owner = Uuid::new_v4();
    let mut store = Store::new();
    let recipe = salted_recipe(&mut store, owner);
    let id = recipe.recipe_id.to_string();
    let request = UpdateRecipeRequest {
        ingredients: Some(vec![
            IngredientReference::by_name("salt", dec("3"), IngredientUnit::G),
            IngredientReference::by_name("Thyme", dec("1"), IngredientUnit::Pinch),
        ]),
        steps: Some(vec![
            StepRequest::new(1, "Mix everything"),
            StepRequest::new(2, "Rest for an hour"),
        ]),
        ..Default::default()
    };

    // WHEN it is applied twice
    let first = update_recipe(&mut store, &id, owner, &request).unwrap();
    let second = update_recipe(&mut store, &id, owner, &request).unwrap();

    // THEN only the first application records revisions
    assert_eq!(first.revisions.len(), 4);
    assert!(second.revisions.is_empty());
    assert_eq!(list_recipe_revisions(&store, &id, owner).unwrap().total_count, 4);
}

#[test]
fn test_absent_lists_leave_collections_untouched() {
    let owner = Uuid::new_v4();
    let mut store = Store::new();
    let recipe = salted_recipe(&mut store, owner);

    let request = UpdateRecipeRequest {
        description: Some("Now with a description".to_string()),
        ..Default::default()
    };
    let outcome = update_recipe(&mut store, &recipe.recipe_id.to_string(), owner, &request).unwrap();

    assert_eq!(outcome.recipe.ingredients, recipe.ingredients);
    assert_eq!(outcome.recipe.steps, recipe.steps);
    assert_eq!(
        outcome.recipe.description.as_deref(),
        Some("Now with a description")
    );
    assert!(outcome.revisions.is_empty());
}

#[test]
fn test_scoped_queries_filter_by_subject() {
    // GIVEN a recipe whose Salt and step 1 both changed
    let owner = Uuid::new_v4();
    let mut store = Store::new();
    let recipe = salted_recipe(&mut store, owner);
    let id = recipe.recipe_id.to_string();
    let salt_id = recipe.ingredients[0].ingredient_id;
    let request = UpdateRecipeRequest {
        ingredients: Some(vec![
            IngredientReference::by_id(salt_id, dec("1"), IngredientUnit::Tbsp),
            IngredientReference::by_name("Oil", dec("10"), IngredientUnit::Ml),
        ]),
        steps: Some(vec![StepRequest::new(1, "Mix slowly")]),
        ..Default::default()
    };
    update_recipe(&mut store, &id, owner, &request).unwrap();

    // WHEN history is read whole and per subject
    let all = list_recipe_revisions(&store, &id, owner).unwrap();
    let salt = list_ingredient_revisions(&store, &id, salt_id, owner).unwrap();
    let step = list_step_revisions(&store, &id, 1, owner).unwrap();

    // THEN each scope sees only its own entries
    assert_eq!(all.total_count, 3);
    assert_eq!(salt.total_count, 1);
    assert_eq!(salt.entries[0].comment.as_deref(), Some("Ingredient unit updated"));
    assert_eq!(step.total_count, 1);
    assert_eq!(step.entries[0].category, RevisionCategory::Step);
    assert_eq!(step.entries[0].comment.as_deref(), Some("Step instruction updated"));

    let ids: Vec<_> = all.entries.iter().map(|r| r.revision_id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

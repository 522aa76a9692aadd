//! Ingredient resolution
//!
//! Turns an ingredient reference from a request into a catalog entry:
//! lookup by identifier, then case-insensitive lookup by name, then creation
//! by name. A reference that yields neither is a validation error.

use crate::errors::{RecipeError, Result};
use crate::model::{Ingredient, IngredientLink, IngredientReference};
use crate::repository::IngredientCatalog;

/// Outcome of the read-only resolution pass
enum Planned {
    Existing(Ingredient),
    Create(String),
}

/// Resolve a single reference, creating a catalog entry if needed
///
/// # Arguments
/// * `catalog` - Ingredient catalog
/// * `reference` - Requested ingredient
/// * `position` - Index of the reference in its request (for error reporting)
///
/// # Errors
///
/// Returns `IngredientUnresolvable` if the identifier is absent or unknown and
/// no usable name is given.
pub fn resolve_ingredient<C>(
    catalog: &mut C,
    reference: &IngredientReference,
    position: usize,
) -> Result<Ingredient>
where
    C: IngredientCatalog + ?Sized,
{
    match plan(catalog, reference, position)? {
        Planned::Existing(ingredient) => Ok(ingredient),
        Planned::Create(name) => create_or_reuse(catalog, &name),
    }
}

/// Resolve every reference of a request into ingredient links
///
/// All references are checked before any catalog entry is created, so a
/// failing reference leaves the catalog untouched. Duplicate ingredients keep
/// the position of their first appearance and the attributes of their last.
///
/// # Errors
///
/// Returns `IngredientUnresolvable` for the first reference that cannot be
/// resolved.
pub fn resolve_links<C>(catalog: &mut C, references: &[IngredientReference]) -> Result<Vec<IngredientLink>>
where
    C: IngredientCatalog + ?Sized,
{
    let planned = references
        .iter()
        .enumerate()
        .map(|(position, reference)| plan(&*catalog, reference, position))
        .collect::<Result<Vec<_>>>()?;

    let mut links: Vec<IngredientLink> = Vec::with_capacity(references.len());
    for (reference, planned) in references.iter().zip(planned) {
        let ingredient = match planned {
            Planned::Existing(ingredient) => ingredient,
            Planned::Create(name) => create_or_reuse(catalog, &name)?,
        };
        let link = IngredientLink {
            ingredient_id: ingredient.ingredient_id,
            ingredient_name: ingredient.name,
            quantity: reference.quantity,
            unit: reference.unit,
            is_optional: reference.is_optional.unwrap_or(false),
        };
        match links
            .iter_mut()
            .find(|existing| existing.ingredient_id == link.ingredient_id)
        {
            Some(existing) => *existing = link,
            None => links.push(link),
        }
    }
    Ok(links)
}

fn plan<C>(catalog: &C, reference: &IngredientReference, position: usize) -> Result<Planned>
where
    C: IngredientCatalog + ?Sized,
{
    if let Some(id) = reference.ingredient_id {
        if let Some(ingredient) = catalog.find_ingredient(id)? {
            return Ok(Planned::Existing(ingredient));
        }
    }

    let name = reference
        .usable_name()
        .ok_or(RecipeError::IngredientUnresolvable { position })?;

    match catalog.find_ingredient_by_name(name)? {
        Some(ingredient) => Ok(Planned::Existing(ingredient)),
        None => Ok(Planned::Create(name.to_string())),
    }
}

// A name planned twice in one request is created once.
fn create_or_reuse<C>(catalog: &mut C, name: &str) -> Result<Ingredient>
where
    C: IngredientCatalog + ?Sized,
{
    if let Some(ingredient) = catalog.find_ingredient_by_name(name)? {
        return Ok(ingredient);
    }
    let ingredient = catalog.create_ingredient(name)?;
    tracing::debug!(
        ingredient_id = ingredient.ingredient_id,
        name = %ingredient.name,
        "catalog ingredient created"
    );
    Ok(ingredient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientUnit;
    use crate::ops::Store;
    use rust_decimal::Decimal;

    fn catalog_with_salt() -> (Store, Ingredient) {
        let mut store = Store::new();
        let salt = store.create_ingredient("Salt").unwrap();
        (store, salt)
    }

    #[test]
    fn test_resolves_by_id() {
        let (mut store, salt) = catalog_with_salt();
        let reference = IngredientReference::by_id(salt.ingredient_id, Decimal::ONE, IngredientUnit::Tsp);

        let resolved = resolve_ingredient(&mut store, &reference, 0).unwrap();
        assert_eq!(resolved, salt);
    }

    #[test]
    fn test_resolves_by_name_case_insensitively() {
        let (mut store, salt) = catalog_with_salt();
        let reference = IngredientReference::by_name("  SALT ", Decimal::ONE, IngredientUnit::Tsp);

        let resolved = resolve_ingredient(&mut store, &reference, 0).unwrap();
        assert_eq!(resolved.ingredient_id, salt.ingredient_id);
        assert_eq!(store.ingredients.len(), 1);
    }

    #[test]
    fn test_unknown_id_falls_back_to_name() {
        let (mut store, _) = catalog_with_salt();
        let mut reference = IngredientReference::by_name("Pepper", Decimal::ONE, IngredientUnit::Tsp);
        reference.ingredient_id = Some(999);

        let resolved = resolve_ingredient(&mut store, &reference, 0).unwrap();
        assert_eq!(resolved.name, "Pepper");
        assert_eq!(store.ingredients.len(), 2);
    }

    #[test]
    fn test_neither_id_nor_name_is_validation_error() {
        let (mut store, _) = catalog_with_salt();
        let reference = IngredientReference {
            ingredient_id: Some(999),
            ingredient_name: Some("  ".to_string()),
            quantity: Decimal::ONE,
            unit: IngredientUnit::Tsp,
            is_optional: None,
        };

        let err = resolve_ingredient(&mut store, &reference, 3).unwrap_err();
        assert_eq!(err, RecipeError::IngredientUnresolvable { position: 3 });
    }

    #[test]
    fn test_failed_batch_creates_nothing() {
        let (mut store, _) = catalog_with_salt();
        let references = vec![
            IngredientReference::by_name("Pepper", Decimal::ONE, IngredientUnit::Tsp),
            IngredientReference {
                ingredient_id: None,
                ingredient_name: None,
                quantity: Decimal::ONE,
                unit: IngredientUnit::G,
                is_optional: None,
            },
        ];

        let err = resolve_links(&mut store, &references).unwrap_err();
        assert_eq!(err, RecipeError::IngredientUnresolvable { position: 1 });
        assert_eq!(store.ingredients.len(), 1);
    }

    #[test]
    fn test_batch_dedupes_new_names_and_keys() {
        let mut store = Store::new();
        let references = vec![
            IngredientReference::by_name("Basil", Decimal::ONE, IngredientUnit::G),
            IngredientReference::by_name("Oil", Decimal::ONE, IngredientUnit::Ml),
            IngredientReference::by_name("basil", Decimal::TWO, IngredientUnit::G).optional(true),
        ];

        let links = resolve_links(&mut store, &references).unwrap();
        assert_eq!(store.ingredients.len(), 2);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].ingredient_name, "Basil");
        assert_eq!(links[0].quantity, Decimal::TWO);
        assert!(links[0].is_optional);
        assert_eq!(links[1].ingredient_name, "Oil");
    }
}

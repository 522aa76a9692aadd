//! Keyed-set diff computation.
//!
//! Both collections are indexed into `BTreeMap`s keyed by the diff key
//! (ingredient id or step number) holding the snapshot and its encoding. A
//! single pass over the union of keys classifies every key by presence and
//! encoding equality.

use std::collections::BTreeMap;

use crate::diff::model::{DiffContext, DiffCounts};
use crate::errors::Result;
use crate::model::{IngredientLink, NewRevision, RevisionCategory, RevisionType, Step};
use crate::snapshot::{IngredientSnapshot, StepSnapshot};

/// Snapshot plus its canonical encoding, indexed by diff key
type Indexed<S> = BTreeMap<i64, (S, String)>;

/// Comment wording for one category
struct Wording {
    noun: &'static str,
    added: &'static str,
    removed: &'static str,
}

const INGREDIENT_WORDING: Wording = Wording {
    noun: "Ingredient",
    added: "New ingredient added to recipe",
    removed: "Ingredient removed from recipe",
};

const STEP_WORDING: Wording = Wording {
    noun: "Step",
    added: "New step added to recipe",
    removed: "Step removed from recipe",
};

/// Diff a recipe's ingredient links against a requested replacement.
///
/// Links are keyed by ingredient id. When `new` repeats a key the later link
/// wins.
///
/// # Errors
///
/// Returns `RecipeError::Serialization` if a snapshot cannot be encoded.
pub fn diff_ingredients(
    ctx: &DiffContext,
    old: &[IngredientLink],
    new: &[IngredientLink],
) -> Result<Vec<NewRevision>> {
    let index = |links: &[IngredientLink]| -> Result<Indexed<IngredientSnapshot>> {
        links
            .iter()
            .map(|link| -> Result<(i64, (IngredientSnapshot, String))> {
                let snapshot = IngredientSnapshot::of(link);
                let encoded = snapshot.encode()?;
                Ok((link.ingredient_id, (snapshot, encoded)))
            })
            .collect()
    };

    let revisions = diff_keyed(
        ctx,
        RevisionCategory::Ingredient,
        &INGREDIENT_WORDING,
        index(old)?,
        index(new)?,
        IngredientSnapshot::changed_fields,
    );
    log_counts(RevisionCategory::Ingredient, &revisions);
    Ok(revisions)
}

/// Diff a recipe's steps against a requested replacement.
///
/// Steps are keyed by step number. When `new` repeats a key the later step
/// wins.
///
/// # Errors
///
/// Returns `RecipeError::Serialization` if a snapshot cannot be encoded.
pub fn diff_steps(ctx: &DiffContext, old: &[Step], new: &[Step]) -> Result<Vec<NewRevision>> {
    let index = |steps: &[Step]| -> Result<Indexed<StepSnapshot>> {
        steps
            .iter()
            .map(|step| -> Result<(i64, (StepSnapshot, String))> {
                let snapshot = StepSnapshot::of(step);
                let encoded = snapshot.encode()?;
                Ok((i64::from(step.step_number), (snapshot, encoded)))
            })
            .collect()
    };

    let revisions = diff_keyed(
        ctx,
        RevisionCategory::Step,
        &STEP_WORDING,
        index(old)?,
        index(new)?,
        StepSnapshot::changed_fields,
    );
    log_counts(RevisionCategory::Step, &revisions);
    Ok(revisions)
}

fn diff_keyed<S>(
    ctx: &DiffContext,
    category: RevisionCategory,
    wording: &Wording,
    old: Indexed<S>,
    new: Indexed<S>,
    changed_fields: impl Fn(&S, &S) -> Vec<&'static str>,
) -> Vec<NewRevision> {
    let entry = |change_type, subject_id, previous_data, new_data, comment: String| NewRevision {
        recipe_id: ctx.recipe_id,
        user_id: ctx.user_id,
        category,
        change_type,
        subject_id,
        previous_data,
        new_data,
        comment: Some(comment),
    };

    let mut updates = Vec::new();
    let mut deletes = Vec::new();
    for (key, (old_snapshot, old_encoded)) in &old {
        match new.get(key) {
            Some((new_snapshot, new_encoded)) if new_encoded != old_encoded => {
                let fields = changed_fields(old_snapshot, new_snapshot);
                let comment = if fields.is_empty() {
                    format!("{} updated", wording.noun)
                } else {
                    format!("{} {} updated", wording.noun, fields.join(", "))
                };
                updates.push(entry(
                    RevisionType::Update,
                    *key,
                    old_encoded.clone(),
                    new_encoded.clone(),
                    comment,
                ));
            }
            Some(_) => {}
            None => deletes.push(entry(
                RevisionType::Delete,
                *key,
                old_encoded.clone(),
                String::new(),
                wording.removed.to_string(),
            )),
        }
    }

    let adds = new
        .iter()
        .filter(|(key, _)| !old.contains_key(key))
        .map(|(key, (_, new_encoded))| {
            entry(
                RevisionType::Add,
                *key,
                String::new(),
                new_encoded.clone(),
                wording.added.to_string(),
            )
        });

    let mut revisions = updates;
    revisions.extend(adds);
    revisions.extend(deletes);
    revisions
}

fn log_counts(category: RevisionCategory, revisions: &[NewRevision]) {
    let counts = DiffCounts::of(revisions);
    tracing::debug!(
        category = category.as_str(),
        added = counts.added,
        updated = counts.updated,
        deleted = counts.deleted,
        total = counts.total(),
        "revision diff computed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientUnit;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn ctx() -> DiffContext {
        DiffContext::new(1, Uuid::nil())
    }

    fn link(id: i64, name: &str, quantity: Decimal) -> IngredientLink {
        IngredientLink::new(id, name.to_string(), quantity, IngredientUnit::Tsp)
    }

    #[test]
    fn test_empty_sets_produce_nothing() {
        assert!(diff_ingredients(&ctx(), &[], &[]).unwrap().is_empty());
        assert!(diff_steps(&ctx(), &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_update_then_add_then_delete_order() {
        let old = vec![link(3, "Salt", Decimal::ONE), link(1, "Flour", Decimal::ONE)];
        let new = vec![link(3, "Salt", Decimal::TWO), link(2, "Sugar", Decimal::ONE)];

        let revisions = diff_ingredients(&ctx(), &old, &new).unwrap();
        let shape: Vec<_> = revisions
            .iter()
            .map(|r| (r.change_type, r.subject_id))
            .collect();

        assert_eq!(
            shape,
            vec![
                (RevisionType::Update, 3),
                (RevisionType::Add, 2),
                (RevisionType::Delete, 1),
            ]
        );
        assert_eq!(
            revisions[0].comment.as_deref(),
            Some("Ingredient quantity updated")
        );
        assert_eq!(
            revisions[1].comment.as_deref(),
            Some("New ingredient added to recipe")
        );
        assert_eq!(
            revisions[2].comment.as_deref(),
            Some("Ingredient removed from recipe")
        );
    }

    #[test]
    fn test_payload_shape_per_change_type() {
        let old = vec![link(1, "Salt", Decimal::ONE), link(2, "Oil", Decimal::ONE)];
        let new = vec![link(1, "Salt", Decimal::TWO), link(3, "Basil", Decimal::ONE)];

        for r in diff_ingredients(&ctx(), &old, &new).unwrap() {
            match r.change_type {
                RevisionType::Add => {
                    assert!(r.previous_data.is_empty());
                    assert!(!r.new_data.is_empty());
                }
                RevisionType::Update => {
                    assert!(!r.previous_data.is_empty());
                    assert!(!r.new_data.is_empty());
                }
                RevisionType::Delete => {
                    assert!(!r.previous_data.is_empty());
                    assert!(r.new_data.is_empty());
                }
            }
            assert_eq!(r.category, RevisionCategory::Ingredient);
            assert_eq!(r.recipe_id, 1);
        }
    }

    #[test]
    fn test_clearing_steps_deletes_each() {
        let old = vec![
            Step::new(1, "Mix ingredients".to_string()),
            Step::new(2, "Bake".to_string()),
        ];

        let revisions = diff_steps(&ctx(), &old, &[]).unwrap();
        assert_eq!(revisions.len(), 2);
        assert!(revisions
            .iter()
            .all(|r| r.change_type == RevisionType::Delete && r.category == RevisionCategory::Step));
        assert_eq!(revisions[0].comment.as_deref(), Some("Step removed from recipe"));
    }

    #[test]
    fn test_step_instruction_change_comment() {
        let old = vec![Step::new(1, "Mix".to_string())];
        let new = vec![Step::new(1, "Whisk".to_string())];

        let revisions = diff_steps(&ctx(), &old, &new).unwrap();
        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0].change_type, RevisionType::Update);
        assert_eq!(revisions[0].comment.as_deref(), Some("Step instruction updated"));
    }

    #[test]
    fn test_duplicate_key_later_wins() {
        let old = vec![link(1, "Salt", Decimal::ONE)];
        let new = vec![link(1, "Salt", Decimal::TWO), link(1, "Salt", Decimal::ONE)];

        assert!(diff_ingredients(&ctx(), &old, &new).unwrap().is_empty());
    }
}

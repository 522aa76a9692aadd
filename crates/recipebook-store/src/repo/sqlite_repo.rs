//! SQLite repository implementation
//!
//! Row-level reads and writes of recipes, their ingredient links and steps,
//! the ingredient catalog, and revision entries. Every function works on a
//! plain `Connection`; pass an open `Transaction` (it derefs to one) to group
//! writes atomically.

use chrono::{DateTime, Utc};
use recipebook_core::model::{
    now_millis, DifficultyLevel, Ingredient, IngredientId, IngredientLink, IngredientUnit,
    NewRevision, Recipe, RecipeId, RevisionCategory, RevisionEntry, RevisionType, Step,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{decode_error, from_rusqlite, Result};

/// SQLite repository for recipes, the ingredient catalog, and revisions
pub struct SqliteRepo;

const RECIPE_COLUMNS: &str = "recipe_id, user_id, title, description, origin_url, servings, \
     preparation_time, cooking_time, difficulty, created_at, updated_at";

const REVISION_COLUMNS: &str = "revision_id, recipe_id, user_id, category, change_type, \
     subject_id, previous_data, new_data, change_comment, created_at";

impl SqliteRepo {
    // ===== Recipes =====

    /// Insert a recipe with its ingredient links and steps
    ///
    /// # Returns
    /// The identifier assigned by the database
    pub fn insert_recipe(conn: &Connection, recipe: &Recipe) -> Result<RecipeId> {
        conn.execute(
            "INSERT INTO recipes (user_id, title, description, origin_url, servings,
                preparation_time, cooking_time, difficulty, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                recipe.user_id.to_string(),
                recipe.title,
                recipe.description,
                recipe.origin_url,
                recipe.servings,
                recipe.preparation_time,
                recipe.cooking_time,
                recipe.difficulty.map(|d| d.as_str()),
                recipe.created_at.timestamp_millis(),
                recipe.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        let recipe_id = conn.last_insert_rowid();
        Self::replace_ingredient_links(conn, recipe_id, &recipe.ingredients)?;
        Self::replace_steps(conn, recipe_id, &recipe.steps)?;
        Ok(recipe_id)
    }

    /// Persist scalar fields and replace both owned collections
    pub fn update_recipe(conn: &Connection, recipe: &Recipe) -> Result<()> {
        conn.execute(
            "UPDATE recipes SET
                title = ?2,
                description = ?3,
                origin_url = ?4,
                servings = ?5,
                preparation_time = ?6,
                cooking_time = ?7,
                difficulty = ?8,
                updated_at = ?9
             WHERE recipe_id = ?1",
            params![
                recipe.recipe_id,
                recipe.title,
                recipe.description,
                recipe.origin_url,
                recipe.servings,
                recipe.preparation_time,
                recipe.cooking_time,
                recipe.difficulty.map(|d| d.as_str()),
                recipe.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Self::replace_ingredient_links(conn, recipe.recipe_id, &recipe.ingredients)?;
        Self::replace_steps(conn, recipe.recipe_id, &recipe.steps)?;
        Ok(())
    }

    /// Load a recipe with its ingredient links (in position order) and steps
    pub fn get_recipe(conn: &Connection, recipe_id: RecipeId) -> Result<Option<Recipe>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM recipes WHERE recipe_id = ?",
                RECIPE_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let recipe = stmt
            .query_row([recipe_id], recipe_from_row)
            .optional()
            .map_err(from_rusqlite)?;

        let Some(mut recipe) = recipe else {
            return Ok(None);
        };
        recipe.ingredients = Self::list_ingredient_links(conn, recipe_id)?;
        recipe.steps = Self::list_steps(conn, recipe_id)?;
        Ok(Some(recipe))
    }

    /// Delete a recipe and everything it owns
    ///
    /// Children are removed explicitly so the result does not depend on the
    /// connection's `foreign_keys` setting.
    pub fn delete_recipe(conn: &Connection, recipe_id: RecipeId) -> Result<bool> {
        for table in ["recipe_revisions", "recipe_steps", "recipe_ingredients"] {
            conn.execute(
                &format!("DELETE FROM {} WHERE recipe_id = ?", table),
                [recipe_id],
            )
            .map_err(from_rusqlite)?;
        }
        let removed = conn
            .execute("DELETE FROM recipes WHERE recipe_id = ?", [recipe_id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    fn replace_ingredient_links(
        conn: &Connection,
        recipe_id: RecipeId,
        links: &[IngredientLink],
    ) -> Result<()> {
        conn.execute(
            "DELETE FROM recipe_ingredients WHERE recipe_id = ?",
            [recipe_id],
        )
        .map_err(from_rusqlite)?;

        let mut stmt = conn
            .prepare(
                "INSERT INTO recipe_ingredients
                    (recipe_id, ingredient_id, position, quantity, unit, is_optional)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(from_rusqlite)?;
        for (position, link) in links.iter().enumerate() {
            stmt.execute(params![
                recipe_id,
                link.ingredient_id,
                position as i64,
                link.quantity.to_string(),
                link.unit.as_str(),
                link.is_optional,
            ])
            .map_err(from_rusqlite)?;
        }
        Ok(())
    }

    fn replace_steps(conn: &Connection, recipe_id: RecipeId, steps: &[Step]) -> Result<()> {
        conn.execute("DELETE FROM recipe_steps WHERE recipe_id = ?", [recipe_id])
            .map_err(from_rusqlite)?;

        let mut stmt = conn
            .prepare(
                "INSERT INTO recipe_steps
                    (recipe_id, step_number, instruction, optional, timer_seconds)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(from_rusqlite)?;
        for step in steps {
            stmt.execute(params![
                recipe_id,
                step.step_number,
                step.instruction,
                step.optional,
                step.timer_seconds,
            ])
            .map_err(from_rusqlite)?;
        }
        Ok(())
    }

    fn list_ingredient_links(conn: &Connection, recipe_id: RecipeId) -> Result<Vec<IngredientLink>> {
        let mut stmt = conn
            .prepare(
                "SELECT ri.ingredient_id, i.name, ri.quantity, ri.unit, ri.is_optional
                 FROM recipe_ingredients ri
                 JOIN ingredients i ON i.ingredient_id = ri.ingredient_id
                 WHERE ri.recipe_id = ?
                 ORDER BY ri.position",
            )
            .map_err(from_rusqlite)?;

        let links = stmt
            .query_map([recipe_id], |row| {
                let quantity: String = row.get(2)?;
                let unit: String = row.get(3)?;
                Ok(IngredientLink {
                    ingredient_id: row.get(0)?,
                    ingredient_name: row.get(1)?,
                    quantity: Decimal::from_str(&quantity)
                        .map_err(|e| decode_error(2, format!("quantity {quantity}: {e}")))?,
                    unit: IngredientUnit::parse(&unit)
                        .ok_or_else(|| decode_error(3, format!("unknown unit {unit}")))?,
                    is_optional: row.get(4)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(links)
    }

    fn list_steps(conn: &Connection, recipe_id: RecipeId) -> Result<Vec<Step>> {
        let mut stmt = conn
            .prepare(
                "SELECT step_number, instruction, optional, timer_seconds
                 FROM recipe_steps WHERE recipe_id = ? ORDER BY step_number",
            )
            .map_err(from_rusqlite)?;

        let steps = stmt
            .query_map([recipe_id], |row| {
                Ok(Step {
                    step_number: row.get(0)?,
                    instruction: row.get(1)?,
                    optional: row.get(2)?,
                    timer_seconds: row.get(3)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(steps)
    }

    // ===== Ingredient catalog =====

    pub fn get_ingredient(conn: &Connection, ingredient_id: IngredientId) -> Result<Option<Ingredient>> {
        conn.query_row(
            "SELECT ingredient_id, name, description, category, created_at
             FROM ingredients WHERE ingredient_id = ?",
            [ingredient_id],
            ingredient_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Case-insensitive lookup through the `name_key` column
    pub fn find_ingredient_by_name(conn: &Connection, name: &str) -> Result<Option<Ingredient>> {
        conn.query_row(
            "SELECT ingredient_id, name, description, category, created_at
             FROM ingredients WHERE name_key = ?",
            [Ingredient::name_key(name)],
            ingredient_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn insert_ingredient(conn: &Connection, name: &str) -> Result<Ingredient> {
        let mut ingredient = Ingredient::new(0, name.trim().to_string());
        conn.execute(
            "INSERT INTO ingredients (name, name_key, description, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                ingredient.name,
                Ingredient::name_key(&ingredient.name),
                ingredient.description,
                ingredient.category,
                ingredient.created_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;
        ingredient.ingredient_id = conn.last_insert_rowid();
        Ok(ingredient)
    }

    // ===== Revisions =====

    /// Insert a batch of revisions sharing one creation timestamp
    pub fn insert_revisions(conn: &Connection, revisions: Vec<NewRevision>) -> Result<Vec<RevisionEntry>> {
        let created_at = now_millis();
        let mut stmt = conn
            .prepare(
                "INSERT INTO recipe_revisions (recipe_id, user_id, category, change_type,
                    subject_id, previous_data, new_data, change_comment, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(from_rusqlite)?;

        let mut entries = Vec::with_capacity(revisions.len());
        for revision in revisions {
            let revision_id = stmt
                .insert(params![
                    revision.recipe_id,
                    revision.user_id.to_string(),
                    revision.category.as_str(),
                    revision.change_type.as_str(),
                    revision.subject_id,
                    revision.previous_data,
                    revision.new_data,
                    revision.comment,
                    created_at.timestamp_millis(),
                ])
                .map_err(from_rusqlite)?;
            entries.push(RevisionEntry::from_new(revision, revision_id, created_at));
        }
        Ok(entries)
    }

    /// All revisions of a recipe ordered by creation time, then identifier
    pub fn list_revisions(conn: &Connection, recipe_id: RecipeId) -> Result<Vec<RevisionEntry>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM recipe_revisions WHERE recipe_id = ?
                 ORDER BY created_at, revision_id",
                REVISION_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let entries = stmt
            .query_map([recipe_id], revision_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(entries)
    }

    /// Revisions of one ingredient link or step, same ordering
    pub fn list_subject_revisions(
        conn: &Connection,
        recipe_id: RecipeId,
        category: RevisionCategory,
        subject_id: i64,
    ) -> Result<Vec<RevisionEntry>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM recipe_revisions
                 WHERE recipe_id = ?1 AND category = ?2 AND subject_id = ?3
                 ORDER BY created_at, revision_id",
                REVISION_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let entries = stmt
            .query_map(
                params![recipe_id, category.as_str(), subject_id],
                revision_from_row,
            )
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(entries)
    }
}

fn millis(row: &Row<'_>, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(column)?;
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| decode_error(column, format!("timestamp {ms} out of range")))
}

fn uuid(row: &Row<'_>, column: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|e| decode_error(column, format!("user id {text}: {e}")))
}

fn recipe_from_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    let difficulty: Option<String> = row.get(8)?;
    let difficulty = difficulty
        .map(|d| {
            DifficultyLevel::parse(&d).ok_or_else(|| decode_error(8, format!("unknown difficulty {d}")))
        })
        .transpose()?;

    Ok(Recipe {
        recipe_id: row.get(0)?,
        user_id: uuid(row, 1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        origin_url: row.get(4)?,
        servings: row.get(5)?,
        preparation_time: row.get(6)?,
        cooking_time: row.get(7)?,
        difficulty,
        ingredients: Vec::new(),
        steps: Vec::new(),
        created_at: millis(row, 9)?,
        updated_at: millis(row, 10)?,
    })
}

fn ingredient_from_row(row: &Row<'_>) -> rusqlite::Result<Ingredient> {
    Ok(Ingredient {
        ingredient_id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        created_at: millis(row, 4)?,
    })
}

fn revision_from_row(row: &Row<'_>) -> rusqlite::Result<RevisionEntry> {
    let category: String = row.get(3)?;
    let change_type: String = row.get(4)?;

    Ok(RevisionEntry {
        revision_id: row.get(0)?,
        recipe_id: row.get(1)?,
        user_id: uuid(row, 2)?,
        category: RevisionCategory::parse(&category)
            .ok_or_else(|| decode_error(3, format!("unknown category {category}")))?,
        change_type: RevisionType::parse(&change_type)
            .ok_or_else(|| decode_error(4, format!("unknown change type {change_type}")))?,
        subject_id: row.get(5)?,
        previous_data: row.get(6)?,
        new_data: row.get(7)?,
        comment: row.get(8)?,
        created_at: millis(row, 9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_ingredient_name_key_is_unique() {
        let conn = setup();
        SqliteRepo::insert_ingredient(&conn, "Salt").unwrap();

        let found = SqliteRepo::find_ingredient_by_name(&conn, " sALT").unwrap();
        assert_eq!(found.map(|i| i.name), Some("Salt".to_string()));
        assert!(SqliteRepo::insert_ingredient(&conn, "SALT").is_err());
    }

    #[test]
    fn test_revisions_cannot_be_updated() {
        let conn = setup();
        let recipe = Recipe::new(Uuid::new_v4(), "Rice".to_string());
        let recipe_id = SqliteRepo::insert_recipe(&conn, &recipe).unwrap();
        SqliteRepo::insert_revisions(
            &conn,
            vec![NewRevision {
                recipe_id,
                user_id: recipe.user_id,
                category: RevisionCategory::Step,
                change_type: RevisionType::Add,
                subject_id: 1,
                previous_data: String::new(),
                new_data: "{}".to_string(),
                comment: None,
            }],
        )
        .unwrap();

        let result = conn.execute("UPDATE recipe_revisions SET new_data = 'x'", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_recipe_is_none() {
        let conn = setup();
        assert!(SqliteRepo::get_recipe(&conn, 42).unwrap().is_none());
        assert!(!SqliteRepo::delete_recipe(&conn, 42).unwrap());
    }
}

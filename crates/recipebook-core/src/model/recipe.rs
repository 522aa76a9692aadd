use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ingredient::{IngredientId, IngredientLink};
use super::step::{Step, StepNumber};

/// Recipe identifier (positive, store-assigned)
pub type RecipeId = i64;

/// Difficulty rating of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Beginner,
    Easy,
    Medium,
    Hard,
    Expert,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "BEGINNER",
            DifficultyLevel::Easy => "EASY",
            DifficultyLevel::Medium => "MEDIUM",
            DifficultyLevel::Hard => "HARD",
            DifficultyLevel::Expert => "EXPERT",
        }
    }

    /// Parse the stored representation; returns `None` for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "BEGINNER" => Some(DifficultyLevel::Beginner),
            "EASY" => Some(DifficultyLevel::Easy),
            "MEDIUM" => Some(DifficultyLevel::Medium),
            "HARD" => Some(DifficultyLevel::Hard),
            "EXPERT" => Some(DifficultyLevel::Expert),
            _ => None,
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipe - a user-owned composition of ingredient links and steps
///
/// The recipe exclusively owns its ingredient links and steps. Deleting a
/// recipe removes both collections together with its revision history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Store-assigned identifier (0 until inserted)
    pub recipe_id: RecipeId,

    /// Owning user; the only principal allowed to mutate the recipe
    pub user_id: Uuid,

    pub title: String,
    pub description: Option<String>,
    pub origin_url: Option<String>,
    pub servings: Option<u32>,

    /// Preparation time in minutes
    pub preparation_time: Option<u32>,

    /// Cooking time in minutes
    pub cooking_time: Option<u32>,

    pub difficulty: Option<DifficultyLevel>,

    /// Ingredient links in insertion order, unique by ingredient id
    pub ingredients: Vec<IngredientLink>,

    /// Steps sorted by step number, unique by step number
    pub steps: Vec<Step>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create an empty recipe owned by `user_id`
    ///
    /// # Arguments
    /// * `user_id` - Owning user
    /// * `title` - Recipe title
    ///
    /// # Returns
    /// A recipe with no id, no ingredients, no steps, and current timestamps
    pub fn new(user_id: Uuid, title: String) -> Self {
        let now = super::now_millis();
        Self {
            recipe_id: 0,
            user_id,
            title,
            description: None,
            origin_url: None,
            servings: None,
            preparation_time: None,
            cooking_time: None,
            difficulty: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether `caller_id` owns this recipe
    pub fn is_owned_by(&self, caller_id: Uuid) -> bool {
        self.user_id == caller_id
    }

    /// Find the current link to a catalog ingredient
    pub fn ingredient_link(&self, ingredient_id: IngredientId) -> Option<&IngredientLink> {
        self.ingredients
            .iter()
            .find(|link| link.ingredient_id == ingredient_id)
    }

    /// Find the current step with the given number
    pub fn step(&self, step_number: StepNumber) -> Option<&Step> {
        self.steps.iter().find(|s| s.step_number == step_number)
    }

    /// Replace the step collection, keeping it ordered by step number
    pub fn set_steps(&mut self, mut steps: Vec<Step>) {
        steps.sort_by_key(|s| s.step_number);
        self.steps = steps;
    }
}

//! Inbound request shapes
//!
//! Field names follow the transport representation (camelCase). On update
//! requests an absent field means "leave unchanged"; for the ingredient and
//! step lists an explicitly empty list is distinct from an absent one and
//! clears the collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ingredient::{IngredientId, IngredientUnit};
use super::recipe::DifficultyLevel;
use super::step::{Step, StepNumber};

/// Reference to a catalog ingredient plus the link attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientReference {
    #[serde(default)]
    pub ingredient_id: Option<IngredientId>,
    #[serde(default)]
    pub ingredient_name: Option<String>,
    pub quantity: Decimal,
    pub unit: IngredientUnit,
    #[serde(default)]
    pub is_optional: Option<bool>,
}

impl IngredientReference {
    /// Reference an existing catalog entry by id
    pub fn by_id(ingredient_id: IngredientId, quantity: Decimal, unit: IngredientUnit) -> Self {
        Self {
            ingredient_id: Some(ingredient_id),
            ingredient_name: None,
            quantity,
            unit,
            is_optional: None,
        }
    }

    /// Reference a catalog entry by name, creating it when unknown
    pub fn by_name(name: &str, quantity: Decimal, unit: IngredientUnit) -> Self {
        Self {
            ingredient_id: None,
            ingredient_name: Some(name.to_string()),
            quantity,
            unit,
            is_optional: None,
        }
    }

    pub fn optional(mut self, is_optional: bool) -> Self {
        self.is_optional = Some(is_optional);
        self
    }

    /// The name, trimmed, if it is present and not blank
    pub fn usable_name(&self) -> Option<&str> {
        self.ingredient_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Requested state of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    pub step_number: StepNumber,
    pub instruction: String,
    #[serde(default)]
    pub optional: Option<bool>,
    #[serde(default)]
    pub timer_seconds: Option<u32>,
}

impl StepRequest {
    pub fn new(step_number: StepNumber, instruction: &str) -> Self {
        Self {
            step_number,
            instruction: instruction.to_string(),
            optional: None,
            timer_seconds: None,
        }
    }

    pub fn to_step(&self) -> Step {
        Step {
            step_number: self.step_number,
            instruction: self.instruction.clone(),
            optional: self.optional.unwrap_or(false),
            timer_seconds: self.timer_seconds,
        }
    }
}

/// Partial update of a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub origin_url: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub preparation_time: Option<u32>,
    #[serde(default)]
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<DifficultyLevel>,
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientReference>>,
    #[serde(default)]
    pub steps: Option<Vec<StepRequest>>,
}

/// A new recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub origin_url: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub preparation_time: Option<u32>,
    #[serde(default)]
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<DifficultyLevel>,
    #[serde(default)]
    pub ingredients: Vec<IngredientReference>,
    #[serde(default)]
    pub steps: Vec<StepRequest>,
}

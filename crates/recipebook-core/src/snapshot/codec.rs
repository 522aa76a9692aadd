use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::{IngredientId, IngredientLink, IngredientUnit, Step, StepNumber};

/// Comparable fields of an ingredient link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSnapshot {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    /// Normalized decimal text
    pub quantity: String,
    pub unit: IngredientUnit,
    pub is_optional: bool,
}

impl IngredientSnapshot {
    pub fn of(link: &IngredientLink) -> Self {
        Self {
            ingredient_id: link.ingredient_id,
            ingredient_name: link.ingredient_name.clone(),
            quantity: link.quantity.normalize().to_string(),
            unit: link.unit,
            is_optional: link.is_optional,
        }
    }

    /// Names of the attributes that differ from `other`
    pub fn changed_fields(&self, other: &Self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.ingredient_name != other.ingredient_name {
            fields.push("name");
        }
        if self.quantity != other.quantity {
            fields.push("quantity");
        }
        if self.unit != other.unit {
            fields.push("unit");
        }
        if self.is_optional != other.is_optional {
            fields.push("optional flag");
        }
        fields
    }

    /// Canonical text form
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Serialization` if JSON serialization fails.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Comparable fields of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSnapshot {
    pub step_number: StepNumber,
    pub instruction: String,
    pub optional: bool,
    pub timer_seconds: Option<u32>,
}

impl StepSnapshot {
    pub fn of(step: &Step) -> Self {
        Self {
            step_number: step.step_number,
            instruction: step.instruction.clone(),
            optional: step.optional,
            timer_seconds: step.timer_seconds,
        }
    }

    /// Names of the attributes that differ from `other`
    pub fn changed_fields(&self, other: &Self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.instruction != other.instruction {
            fields.push("instruction");
        }
        if self.optional != other.optional {
            fields.push("optional flag");
        }
        if self.timer_seconds != other.timer_seconds {
            fields.push("timer");
        }
        fields
    }

    /// Canonical text form
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Serialization` if JSON serialization fails.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Encode an ingredient link snapshot.
///
/// ## Example
///
/// ```
/// use recipebook_core::model::{IngredientLink, IngredientUnit};
/// use recipebook_core::snapshot::encode_ingredient;
/// use rust_decimal::Decimal;
///
/// let link = IngredientLink::new(1, "Salt".to_string(), Decimal::new(10, 1), IngredientUnit::Tsp);
/// let text = encode_ingredient(&link).unwrap();
/// assert!(text.contains("\"quantity\":\"1\""));
/// ```
///
/// ## Errors
///
/// Returns `RecipeError::Serialization` if JSON serialization fails.
pub fn encode_ingredient(link: &IngredientLink) -> Result<String> {
    IngredientSnapshot::of(link).encode()
}

/// Encode a step snapshot.
///
/// ## Errors
///
/// Returns `RecipeError::Serialization` if JSON serialization fails.
pub fn encode_step(step: &Step) -> Result<String> {
    StepSnapshot::of(step).encode()
}

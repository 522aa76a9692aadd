use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog ingredient identifier (positive, store-assigned)
pub type IngredientId = i64;

/// Measurement unit of an ingredient quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngredientUnit {
    G,
    Kg,
    Oz,
    Lb,
    Ml,
    L,
    Cup,
    Tbsp,
    Tsp,
    Piece,
    Clove,
    Slice,
    Pinch,
    Can,
    Bottle,
    Packet,
    Unit,
}

impl IngredientUnit {
    pub const ALL: [IngredientUnit; 17] = [
        IngredientUnit::G,
        IngredientUnit::Kg,
        IngredientUnit::Oz,
        IngredientUnit::Lb,
        IngredientUnit::Ml,
        IngredientUnit::L,
        IngredientUnit::Cup,
        IngredientUnit::Tbsp,
        IngredientUnit::Tsp,
        IngredientUnit::Piece,
        IngredientUnit::Clove,
        IngredientUnit::Slice,
        IngredientUnit::Pinch,
        IngredientUnit::Can,
        IngredientUnit::Bottle,
        IngredientUnit::Packet,
        IngredientUnit::Unit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientUnit::G => "G",
            IngredientUnit::Kg => "KG",
            IngredientUnit::Oz => "OZ",
            IngredientUnit::Lb => "LB",
            IngredientUnit::Ml => "ML",
            IngredientUnit::L => "L",
            IngredientUnit::Cup => "CUP",
            IngredientUnit::Tbsp => "TBSP",
            IngredientUnit::Tsp => "TSP",
            IngredientUnit::Piece => "PIECE",
            IngredientUnit::Clove => "CLOVE",
            IngredientUnit::Slice => "SLICE",
            IngredientUnit::Pinch => "PINCH",
            IngredientUnit::Can => "CAN",
            IngredientUnit::Bottle => "BOTTLE",
            IngredientUnit::Packet => "PACKET",
            IngredientUnit::Unit => "UNIT",
        }
    }

    /// Parse the stored representation; returns `None` for unknown units
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.as_str() == value)
    }
}

impl fmt::Display for IngredientUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ingredient - a shared catalog entry
///
/// Catalog entries are referenced by many recipes and never owned by one.
/// Names are unique case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient_id: IngredientId,

    /// Display name, stored trimmed
    pub name: String,

    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Ingredient {
    pub fn new(ingredient_id: IngredientId, name: String) -> Self {
        Self {
            ingredient_id,
            name,
            description: None,
            category: None,
            created_at: super::now_millis(),
        }
    }

    /// Lookup key used for case-insensitive name matching
    pub fn name_key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

/// A recipe's use of a catalog ingredient
///
/// Keyed by ingredient id within its recipe. The catalog name is carried
/// along so snapshots and views can show it without a catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLink {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub quantity: Decimal,
    pub unit: IngredientUnit,
    pub is_optional: bool,
}

impl IngredientLink {
    pub fn new(
        ingredient_id: IngredientId,
        ingredient_name: String,
        quantity: Decimal,
        unit: IngredientUnit,
    ) -> Self {
        Self {
            ingredient_id,
            ingredient_name,
            quantity,
            unit,
            is_optional: false,
        }
    }

    pub fn optional(mut self, is_optional: bool) -> Self {
        self.is_optional = is_optional;
        self
    }
}

//! Revision audit entries
//!
//! A revision entry records one ADD, UPDATE, or DELETE of a single ingredient
//! link or step. Entries are append-only: they are created as a side effect of
//! a recipe update that actually changed something, and never modified after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::recipe::RecipeId;

/// Revision identifier (positive, store-assigned)
pub type RevisionId = i64;

/// Which sub-collection of a recipe a revision describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevisionCategory {
    Ingredient,
    Step,
}

impl RevisionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevisionCategory::Ingredient => "INGREDIENT",
            RevisionCategory::Step => "STEP",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INGREDIENT" => Some(RevisionCategory::Ingredient),
            "STEP" => Some(RevisionCategory::Step),
            _ => None,
        }
    }
}

impl fmt::Display for RevisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of change a revision records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevisionType {
    Add,
    Update,
    Delete,
}

impl RevisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevisionType::Add => "ADD",
            RevisionType::Update => "UPDATE",
            RevisionType::Delete => "DELETE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADD" => Some(RevisionType::Add),
            "UPDATE" => Some(RevisionType::Update),
            "DELETE" => Some(RevisionType::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for RevisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A revision produced by the diff engine, not yet persisted
///
/// `previous_data` is empty for ADD and `new_data` is empty for DELETE.
/// `subject_id` is the diff key: ingredient id for INGREDIENT entries,
/// step number for STEP entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRevision {
    pub recipe_id: RecipeId,
    pub user_id: Uuid,
    pub category: RevisionCategory,
    pub change_type: RevisionType,
    pub subject_id: i64,
    pub previous_data: String,
    pub new_data: String,
    pub comment: Option<String>,
}

/// A persisted, immutable revision entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionEntry {
    pub revision_id: RevisionId,
    pub recipe_id: RecipeId,
    pub user_id: Uuid,
    pub category: RevisionCategory,
    pub change_type: RevisionType,
    pub subject_id: i64,
    pub previous_data: String,
    pub new_data: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RevisionEntry {
    /// Stamp a pending revision with its store-assigned id and creation time
    pub fn from_new(revision: NewRevision, revision_id: RevisionId, created_at: DateTime<Utc>) -> Self {
        Self {
            revision_id,
            recipe_id: revision.recipe_id,
            user_id: revision.user_id,
            category: revision.category,
            change_type: revision.change_type,
            subject_id: revision.subject_id,
            previous_data: revision.previous_data,
            new_data: revision.new_data,
            comment: revision.comment,
            created_at,
        }
    }

    /// Whether this entry describes the given ingredient or step
    pub fn concerns(&self, category: RevisionCategory, subject_id: i64) -> bool {
        self.category == category && self.subject_id == subject_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_type_codes() {
        assert_eq!(RevisionCategory::Ingredient.as_str(), "INGREDIENT");
        assert_eq!(RevisionCategory::parse("STEP"), Some(RevisionCategory::Step));
        assert_eq!(RevisionCategory::parse("step"), None);

        for t in [RevisionType::Add, RevisionType::Update, RevisionType::Delete] {
            assert_eq!(RevisionType::parse(t.as_str()), Some(t));
        }
        let json = serde_json::to_string(&RevisionType::Update).unwrap();
        assert_eq!(json, "\"UPDATE\"");
    }

    #[test]
    fn test_from_new_keeps_payload() {
        let pending = NewRevision {
            recipe_id: 4,
            user_id: Uuid::nil(),
            category: RevisionCategory::Step,
            change_type: RevisionType::Delete,
            subject_id: 2,
            previous_data: "{\"stepNumber\":2}".to_string(),
            new_data: String::new(),
            comment: Some("Step removed from recipe".to_string()),
        };
        let now = Utc::now();
        let entry = RevisionEntry::from_new(pending, 9, now);

        assert_eq!(entry.revision_id, 9);
        assert_eq!(entry.created_at, now);
        assert!(entry.concerns(RevisionCategory::Step, 2));
        assert!(!entry.concerns(RevisionCategory::Ingredient, 2));
        assert!(entry.new_data.is_empty());
    }
}

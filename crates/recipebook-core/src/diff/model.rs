use serde::Serialize;
use uuid::Uuid;

use crate::model::{NewRevision, RecipeId, RevisionType};

/// Identity stamped onto every revision a diff produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffContext {
    pub recipe_id: RecipeId,
    /// The authorized caller performing the update
    pub user_id: Uuid,
}

impl DiffContext {
    pub fn new(recipe_id: RecipeId, user_id: Uuid) -> Self {
        Self { recipe_id, user_id }
    }
}

/// Per-change-type tally of a set of pending revisions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffCounts {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl DiffCounts {
    pub fn of(revisions: &[NewRevision]) -> Self {
        revisions
            .iter()
            .fold(DiffCounts::default(), |mut counts, r| {
                match r.change_type {
                    RevisionType::Add => counts.added += 1,
                    RevisionType::Update => counts.updated += 1,
                    RevisionType::Delete => counts.deleted += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.added + self.updated + self.deleted
    }
}

use recipebook_core_types::{RequestContext, RequestId, TraceId};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{IngredientId, RecipeId, StepNumber};

/// Result type alias using RecipeError
pub type Result<T> = std::result::Result<T, RecipeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that boundary layers use to pick a
/// response class (NotFound → 404, AccessDenied → 403, Validation → 400).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Caller/input errors
    InvalidInput,
    Validation,
    NotFound,
    AccessDenied,
    ConstraintViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AccessDenied => "ERR_ACCESS_DENIED",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for errors caused by the caller's input or identity rather than
    /// by infrastructure. These are never retried.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::Validation
                | ExErrorKind::NotFound
                | ExErrorKind::AccessDenied
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus context for
/// debugging. Store and engine functions return this type.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    recipe_id: Option<RecipeId>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            recipe_id: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add recipe ID context
    pub fn with_recipe_id(mut self, recipe_id: RecipeId) -> Self {
        self.recipe_id = Some(recipe_id);
        self
    }

    /// Add entity ID context (ingredient id, step number, raw identifier)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Attach the ids of the request that produced this error
    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.request_id = Some(ctx.request_id.clone());
        self.trace_id = ctx.trace_id.clone();
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn recipe_id(&self) -> Option<RecipeId> {
        self.recipe_id
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(recipe_id) = self.recipe_id {
            write!(f, " (recipe_id: {})", recipe_id)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        if let Some(trace_id) = &self.trace_id {
            write!(f, " (trace_id: {})", trace_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for recipe mutation and revision queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeError {
    // ===== Lookup Errors =====
    /// Recipe identifier could not be parsed (reported as not-found)
    #[error("Invalid recipe ID: {raw}")]
    InvalidRecipeId { raw: String },

    #[error("Recipe not found: {recipe_id}")]
    RecipeNotFound { recipe_id: RecipeId },

    /// The (recipe, ingredient) association does not currently exist
    #[error("Recipe ingredient not found for recipe {recipe_id} and ingredient {ingredient_id}")]
    RecipeIngredientNotFound {
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    },

    /// The recipe has no step with this number
    #[error("Step {step_number} not found for recipe {recipe_id}")]
    StepNotFound {
        recipe_id: RecipeId,
        step_number: StepNumber,
    },

    // ===== Authorization Errors =====
    /// Caller is not the recipe's owning user
    #[error("User {caller_id} does not have permission to {action} recipe {recipe_id}")]
    AccessDenied {
        recipe_id: RecipeId,
        caller_id: Uuid,
        action: String,
    },

    // ===== Validation Errors =====
    /// Ingredient reference resolves to neither a catalog entry nor a usable name
    #[error("Ingredient must have either a valid identifier or a name (entry {position})")]
    IngredientUnresolvable { position: usize },

    #[error("Invalid title: {reason}")]
    InvalidTitle { reason: String },

    // ===== Generic Errors =====
    /// Failure reported by a persistence collaborator
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RecipeError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            RecipeError::InvalidRecipeId { .. }
            | RecipeError::RecipeNotFound { .. }
            | RecipeError::RecipeIngredientNotFound { .. }
            | RecipeError::StepNotFound { .. } => ExErrorKind::NotFound,
            RecipeError::AccessDenied { .. } => ExErrorKind::AccessDenied,
            RecipeError::IngredientUnresolvable { .. } | RecipeError::InvalidTitle { .. } => {
                ExErrorKind::Validation
            }
            RecipeError::Persistence { .. } => ExErrorKind::Persistence,
            RecipeError::Serialization { .. } => ExErrorKind::Serialization,
            RecipeError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

/// Conversion from RecipeError to the canonical ExError
impl From<RecipeError> for ExError {
    fn from(err: RecipeError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let base = ExError::new(kind).with_message(message);
        match err {
            RecipeError::InvalidRecipeId { raw } => base.with_entity_id(raw),
            RecipeError::RecipeNotFound { recipe_id } => base.with_recipe_id(recipe_id),
            RecipeError::RecipeIngredientNotFound {
                recipe_id,
                ingredient_id,
            } => base
                .with_recipe_id(recipe_id)
                .with_entity_id(ingredient_id.to_string()),
            RecipeError::StepNotFound {
                recipe_id,
                step_number,
            } => base
                .with_recipe_id(recipe_id)
                .with_entity_id(step_number.to_string()),
            RecipeError::AccessDenied { recipe_id, .. } => base.with_recipe_id(recipe_id),
            RecipeError::IngredientUnresolvable { position } => {
                base.with_op("resolve_ingredient")
                    .with_entity_id(position.to_string())
            }
            RecipeError::InvalidTitle { .. }
            | RecipeError::Persistence { .. }
            | RecipeError::Serialization { .. }
            | RecipeError::Internal { .. } => base,
        }
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::Serialization {
            message: err.to_string(),
        }
    }
}

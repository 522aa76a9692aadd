//! Error handling for recipebook-store
//!
//! Store functions return the core `ExError`; these helpers build it for
//! store-specific failures.

use recipebook_core::errors::{ExError, ExErrorKind, RecipeError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a configuration error
pub fn config_error(err: config::ConfigError) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("store_config")
        .with_message(err.to_string())
}

/// Column value that cannot be decoded into its domain type
pub(crate) fn decode_error(column: usize, reason: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, reason.into())
}

/// Report a store failure through the core port traits
pub(crate) fn to_domain(err: ExError) -> RecipeError {
    RecipeError::Persistence {
        message: err.to_string(),
    }
}

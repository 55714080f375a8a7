//! Database error types for tg-db.

use thiserror::Error;
use tg_core::enums::EntityType;
use tg_core::errors::CoreError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The addressed record does not exist in the caller's team, or the
    /// caller does not own it.
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: EntityType, id: String },

    /// The request is well-formed but not allowed (missing parent, cycle,
    /// non-finite order, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity_type: EntityType, id: &str) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Whether the caller should be told "no longer exists" rather than
    /// "not allowed".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Collapse storage errors into the two kinds callers act on; everything
/// else stays opaque.
impl From<DatabaseError> for CoreError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { entity_type, id } => Self::NotFound {
                entity_type: entity_type.to_string(),
                id,
            },
            DatabaseError::InvalidArgument(reason) => Self::InvalidArgument(reason),
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}

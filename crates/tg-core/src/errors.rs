//! Cross-cutting error types for Thinkgraph.
//!
//! Storage errors (`DatabaseError`) live in `tg-db`; configuration errors in
//! `tg-config`. The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Thinkgraph crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result within the caller's team.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// The request is well-formed but not allowed (bad parent, cycle, bad number).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

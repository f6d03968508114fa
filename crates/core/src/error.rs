//! Domain error type shared across the workspace.

/// Domain-level errors produced by core logic and surfaced verbatim to
/// the caller. HTTP mapping lives in the `api` crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An input violated a domain constraint. Fails fast, before any write.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A state transition conflicts with the current stored state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

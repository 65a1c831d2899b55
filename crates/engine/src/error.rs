use outreach_core::error::CoreError;

/// Error type for engine operations.
///
/// Wraps [`CoreError`] for domain errors and [`sqlx::Error`] for store
/// failures. A store failure inside a transaction has already rolled the
/// transaction back by the time it reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A domain-level error from `outreach_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for engine return values.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// True for every "does not exist" domain error.
    pub fn is_not_found(&self) -> bool {
        match self {
            EngineError::Core(core) => core.is_not_found(),
            EngineError::Database(_) => false,
        }
    }
}

use thiserror::Error;

/// Failure taxonomy for the record store.
///
/// `InvalidInput` and `NotFound` are recoverable and map to distinct HTTP
/// statuses so callers can render "invalid id" vs "already gone".
/// `Unavailable` covers connectivity and backend failures; it surfaces as a
/// generic server error with no detail leaked to clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("record not found")]
    NotFound,

    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

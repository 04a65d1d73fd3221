//! Request operation errors.

use clockwork_domain::{DomainError, RequestId};

/// Errors that can occur during request operations.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The id names no open request. Either it never existed or another
    /// staff action already closed it.
    #[error("No open request with id {0}")]
    NotFound(RequestId),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

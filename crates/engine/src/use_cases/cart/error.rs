//! Cart operation errors.

use clockwork_domain::DomainError;

/// Errors that can occur during cart operations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Item not in catalog: {0}")]
    ItemNotFound(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
}

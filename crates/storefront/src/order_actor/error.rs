use crate::model::StatusRejection;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidStatusTransition(#[from] StatusRejection),

    /// A line subtotal or the order total does not fit in a decimal.
    #[error("Order amount overflow")]
    AmountOverflow,

    /// Stock reservation or restoration failed in the product store.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

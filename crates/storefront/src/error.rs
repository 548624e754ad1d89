//! # Service Errors
//!
//! The error vocabulary every service call collapses into. Each actor keeps its own error
//! enum; the `From` impls below decide which bucket each variant belongs to.

use crate::category_actor::CategoryError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DuplicateResource(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    InvalidStatusTransition(String),

    /// The resource is still referenced by another one.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    /// Channel failures and anything else the caller cannot fix.
    #[error("{0}")]
    Internal(String),
}

impl From<CategoryError> for ServiceError {
    fn from(e: CategoryError) -> Self {
        let message = e.to_string();
        match e {
            CategoryError::NotFound(_) => ServiceError::NotFound(message),
            CategoryError::Duplicate(_) => ServiceError::DuplicateResource(message),
            CategoryError::InUse(_) => ServiceError::Conflict(message),
            CategoryError::Validation(_) => ServiceError::Validation(message),
            CategoryError::ActorCommunicationError(_) => ServiceError::Internal(message),
        }
    }
}

impl From<ProductError> for ServiceError {
    fn from(e: ProductError) -> Self {
        let message = e.to_string();
        match e {
            ProductError::NotFound(_) | ProductError::CategoryNotFound(_) => {
                ServiceError::NotFound(message)
            }
            ProductError::InsufficientStock { .. } => ServiceError::InsufficientStock(message),
            ProductError::Validation(_) => ServiceError::Validation(message),
            ProductError::ActorCommunicationError(_) => ServiceError::Internal(message),
        }
    }
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::NotFound(_) => ServiceError::NotFound(message),
            OrderError::Validation(_) => ServiceError::Validation(message),
            OrderError::InvalidStatusTransition(_) => {
                ServiceError::InvalidStatusTransition(message)
            }
            OrderError::Product(inner) => inner.into(),
            OrderError::AmountOverflow | OrderError::ActorCommunicationError(_) => {
                ServiceError::Internal(message)
            }
        }
    }
}

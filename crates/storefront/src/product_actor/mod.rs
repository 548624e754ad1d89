//! # Product Actor
//!
//! Owns the product catalog and its inventory.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for
//!   [`Product`](crate::model::Product)
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor runs with a [`CategoryClient`](crate::clients::CategoryClient) as its context:
//! creating a product, or moving it to another category, requires the category to exist.
//!
//! ## Stock
//!
//! Stock is a `u32` and only changes through [`ProductAction::Reserve`] and
//! [`ProductAction::Restock`] (or an explicit update). A reservation larger than the stock on
//! hand is rejected before anything changes, so stock never goes negative.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}

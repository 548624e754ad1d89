//! # Order Actor
//!
//! Owns orders and their line items as one aggregate. This is where the order processing
//! rules live:
//!
//! - **Placing an order** ([`on_create`](actor_framework::ActorEntity::on_create)): validate
//!   the request, reserve every line in one product-store transaction, freeze unit prices and
//!   compute the total. Nothing is inserted unless the reservation committed.
//! - **Status changes** ([`OrderAction::Transition`]): `CANCELLED` is final, `DELIVERED` only
//!   accepts `DELIVERED`. Entering `CANCELLED` restores stock.
//! - **Cancellation** ([`OrderAction::Cancel`]): refused for delivered or already cancelled
//!   orders; otherwise stock is restored, then the status changes.
//!
//! The actor runs with a [`ProductClient`](crate::clients::ProductClient) as its context.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for
//!   [`Order`](crate::model::Order)
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}

//! # Category Actor
//!
//! Owns the category store. Categories have no dependencies (`Context = ()`) and no custom
//! actions; the interesting rule is the unique name, enforced through
//! [`conflicts_with`](actor_framework::ActorEntity::conflicts_with) on create and rename.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for
//!   [`Category`](crate::model::Category)
//! - [`error`] - [`CategoryError`]
//! - [`new()`] - Factory function that creates the actor and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Category;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Category actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Category>, ResourceClient<Category>) {
    ResourceActor::new(buffer_size)
}

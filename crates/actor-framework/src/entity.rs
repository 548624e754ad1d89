//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (Category, Product, Order, …)
//! implements to be managed by the generic `ResourceActor`. Associated types fix the ID, the
//! create/update payloads, the custom actions, the query and sort vocabulary, the injected
//! context and the error type. Lifecycle hooks (`on_create`, `on_update`, `on_delete`,
//! `handle_action`) carry the business rules.
//!
//! # Architecture Note
//! The actor never mutates a stored entity directly. Every hook runs against a *staged copy*;
//! the copy replaces the stored value only when the hook returns `Ok`. That is what makes each
//! request (and each [`Transaction`](crate::ResourceRequest::Transaction)) all-or-nothing.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::conflicts_with`]
//!
//! The defaults accept everything.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can await other actors. The `Context` type is injected
/// into every hook at `run()` time ("late binding"), which is how the Order actor reaches the
/// Product actor without either of them knowing how the other was built.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Unique identifier. Generated from a `u32` counter; ordered so the store iterates
    /// deterministically (ascending id is the default order of every query).
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Reserve`, `Restock`).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Filter vocabulary understood by [`ActorEntity::matches`].
    type Query: Send + Sync + Debug;

    /// Sort vocabulary understood by [`ActorEntity::compare_by`].
    type SortField: Send + Sync + Debug;

    /// Runtime dependencies injected into the actor. Use `()` if none are needed.
    type Context: Send + Sync;

    /// Per-actor error type. It travels boxed inside
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) and is recovered by
    /// the typed clients with [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its freshly generated ID and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity is selected by `query`.
    fn matches(&self, query: &Self::Query) -> bool;

    /// Ordering of two entities by `field` (ascending).
    fn compare_by(&self, other: &Self, field: &Self::SortField) -> Ordering;

    /// Unique-constraint check against another stored entity.
    ///
    /// Called for every other entity in the store before a create or update is committed.
    /// Returning `Some(error)` rejects the request.
    fn conflicts_with(&self, _other: &Self) -> Option<Self::Error> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after `from_create_params`, before the entity is inserted.
    /// Use it for validation against other actors (reached through the context).
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload to the staged copy.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action against the staged copy.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

//! # Actor Framework
//!
//! Building blocks for single-writer, in-memory resource stores. Each resource type is owned by
//! one [`ResourceActor`] running in its own Tokio task; everything else talks to it through a
//! cloneable [`ResourceClient`]. Requests are processed one at a time, so a store never needs a
//! lock and every request sees a consistent state.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the resource, its payloads, its rules
//! 2. **Runtime Layer** ([`ResourceActor`]) - the message loop and the store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async access
//!
//! ## Requests
//!
//! | Request | Effect |
//! |---------|--------|
//! | `Create` | Build from params, check unique constraints, run `on_create`, insert |
//! | `Get` | Clone out one entity |
//! | `Update` | Run `on_update` on a staged copy, check constraints, commit |
//! | `Delete` | Run `on_delete`, remove |
//! | `Action` | Run `handle_action` on a staged copy, commit |
//! | `Transaction` | Run several actions on staged copies, commit all or none |
//! | `Find` / `FindPage` | Filter with `matches`, sort with `compare_by`, slice |
//!
//! A failing hook never leaves a partial write behind: hooks only ever see staged copies.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the loop starts (`run(ctx)`), not at construction time. An
//! actor that needs another store simply receives that store's client:
//!
//! ```rust,ignore
//! let (category_actor, category_client) = ResourceActor::<Category>::new(32);
//! let (product_actor, product_client) = ResourceActor::<Product>::new(32);
//!
//! tokio::spawn(category_actor.run(()));
//! tokio::spawn(product_actor.run(category_client.clone()));
//! ```
//!
//! Actors reaching into other actors must form an acyclic graph: an actor awaiting a client
//! of an actor that awaits it back would deadlock both loops.
//!
//! ## Errors
//!
//! Plumbing failures are [`FrameworkError`] variants. Entity errors travel boxed in
//! [`FrameworkError::EntityError`] and come back typed through
//! [`FrameworkError::into_entity_error`].
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted expectations, which lets
//! an actor be tested against fake dependencies. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod page;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use page::{Direction, Page, PageRequest};

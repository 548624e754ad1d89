//! # Storefront
//!
//! Back-office core for a small shop: a category tree, a product catalog with stock, and
//! orders that reserve that stock. Each store is a [`ResourceActor`](actor_framework::ResourceActor)
//! owning its data; everything else talks to it through a typed client.
//!
//! ## Components
//!
//! - **[model]**: Plain data ([`Category`](model::Category), [`Product`](model::Product),
//!   [`Order`](model::Order)) and their query/sort vocabulary.
//! - **[category_actor]**, **[product_actor]**, **[order_actor]**: The
//!   [`ActorEntity`](actor_framework::ActorEntity) implementations, where the business rules live.
//! - **[clients]**: Typed services over each store ([`OrderClient`](clients::OrderClient) etc.).
//! - **[lifecycle]**: [`StoreSystem`](lifecycle::StoreSystem) starts and stops the actors.
//! - **[api]**: The axum router.
//! - **[config]**, **[telemetry]**, **[error]**: Environment configuration, tracing setup and
//!   the [`ServiceError`](error::ServiceError) taxonomy.
//!
//! ## Placing an order
//!
//! ```text
//! POST /api/orders
//!   └─ OrderClient::create_order ──▶ Order actor (on_create)
//!        └─ ProductClient::reserve_all ──▶ Product actor (one Transaction of Reserve)
//!        ◀─ reservations (name, unit price) ── priced lines, total
//!   ◀─ 201 Order { status: PENDING }
//! ```
//!
//! ## Testing
//!
//! See [`actor_framework::mock`] for utilities to test clients without spawning full actors.

pub mod api;
pub mod category_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod telemetry;

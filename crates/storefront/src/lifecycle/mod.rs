//! # System Lifecycle
//!
//! Starting, wiring and stopping the three store actors.
//!
//! ## Wiring
//!
//! Actors are created first, then started with their context: the clients of the actors they
//! depend on.
//!
//! ```text
//! Order ──ProductClient──▶ Product ──CategoryClient──▶ Category
//! ```
//!
//! ## Shutdown
//!
//! 1. Every client is dropped, which closes the sender side of the channels.
//! 2. Each actor sees `recv()` return `None` once its queue is drained, and exits.
//! 3. The task handles are awaited.
//!
//! Clients held in a context are clones. The graph above is acyclic, so the Order actor
//! exiting releases the last `ProductClient`, which lets the Product actor exit, and so on
//! down the chain. Every clone handed out (the HTTP state included) must be dropped before
//! [`StoreSystem::shutdown`] can return.

pub mod store_system;

pub use store_system::*;

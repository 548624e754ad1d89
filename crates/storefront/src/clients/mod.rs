//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient), one per
//! store. These are the services the HTTP layer talks to.

pub mod category_client;
pub mod order_client;
pub mod product_client;

pub use category_client::*;
pub use order_client::*;
pub use product_client::*;

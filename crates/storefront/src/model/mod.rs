//! Plain data: the stored entities, their payloads and their query vocabulary.
//!
//! The `ActorEntity` implementations live next to each actor (`*_actor/entity.rs`).

pub mod category;
pub mod order;
pub mod product;

pub use category::*;
pub use order::*;
pub use product::*;

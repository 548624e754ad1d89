//! # Generic Messages
//!
//! The request vocabulary shared by `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::page::{Page, PageRequest};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to a `ResourceActor`.
///
/// # Resource-Oriented Architecture
/// Each actor manages one type of resource (the [`ActorEntity`]). Instead of ad-hoc messages
/// per operation, requests are standardized around the lifecycle of a stored resource:
///
/// - **Create** / **Get** / **Update** / **Delete**: CRUD. Create answers with the stored entity.
/// - **Action**: a custom [`ActorEntity::Action`] on one entity.
/// - **Transaction**: several actions, possibly on different entities, committed together or
///   not at all. This is the store's atomic unit of work.
/// - **Find** / **FindPage**: filtered reads using [`ActorEntity::Query`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Transaction {
        actions: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>>,
    },
    Find {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    FindPage {
        query: T::Query,
        page: PageRequest<T::SortField>,
        respond_to: Response<Page<T>>,
    },
}

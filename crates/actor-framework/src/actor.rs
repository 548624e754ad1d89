//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the single writer that owns a store of entities.
//! It processes messages sequentially, so every request observes the effects of all earlier
//! requests and nothing else: each store is serializable by construction.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::page::{Direction, Page, PageRequest};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// ## ResourceActor
///
/// `ResourceActor<T>` is the *server* half of the framework. It owns the store for one entity
/// type and the receiving end of the request channel. Each actor runs in its own Tokio task,
/// which gives it exclusive access to its state without any locking.
///
/// * **Staged writes** – updates, actions and transactions run against clones; the store is
///   only touched once every hook succeeded.
/// * **Unique constraints** – [`ActorEntity::conflicts_with`] is evaluated against every other
///   stored entity before a create or update commits.
/// * **Context injection** – the `Context` given to [`run`](Self::run) is passed to every hook.
///
/// # Usage Pattern
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
/// use std::cmp::Ordering;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32, label: String }
/// #[derive(Debug)] struct TagCreate(String);
/// #[derive(Debug)] enum TagQuery { All }
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = u32; type Create = TagCreate; type Update = (); type Action = ();
///     type ActionResult = (); type Query = TagQuery; type SortField = ();
///     type Context = (); type Error = TagError;
///
///     fn from_create_params(id: u32, params: TagCreate) -> Result<Self, TagError> {
///         Ok(Self { id, label: params.0 })
///     }
///     fn matches(&self, _: &TagQuery) -> bool { true }
///     fn compare_by(&self, other: &Self, _: &()) -> Ordering { self.id.cmp(&other.id) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Tag>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let tag = client.create(TagCreate("sale".into())).await.unwrap();
///     assert_eq!(tag.id, 1);
///     assert_eq!(client.find(TagQuery::All).await.unwrap().len(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

fn entity_error<E>(e: E) -> FrameworkError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FrameworkError::EntityError(Box::new(e))
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, callers wait.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` is injected into every entity hook. It is typically the clients of the
    /// actors this one depends on, created after this actor but before its loop starts.
    pub async fn run(mut self, context: T::Context) {
        // "Product" rather than "storefront::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, id = %self.last_id(), size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Transaction {
                    actions,
                    respond_to,
                } => {
                    debug!(entity_type, ?actions, "Transaction");
                    let steps = actions.len();
                    let result = self.transaction(actions, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, steps, "Transaction committed"),
                        Err(e) => warn!(entity_type, steps, error = %e, "Transaction rolled back"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Find { query, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&query))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, found = items.len(), "Find");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::FindPage {
                    query,
                    page,
                    respond_to,
                } => {
                    debug!(entity_type, ?query, ?page, "FindPage");
                    let _ = respond_to.send(self.find_page(&query, &page));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn last_id(&self) -> T::Id {
        T::Id::from(self.next_id.saturating_sub(1))
    }

    fn check_conflicts(&self, id: &T::Id, candidate: &T) -> Result<(), FrameworkError> {
        self.store
            .iter()
            .filter(|(other_id, _)| *other_id != id)
            .find_map(|(_, other)| candidate.conflicts_with(other))
            .map_or(Ok(()), |e| Err(entity_error(e)))
    }

    async fn create(&mut self, params: T::Create, ctx: &T::Context) -> Result<T, FrameworkError> {
        let id = T::Id::from(self.next_id);
        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        // Constraints first: on_create may have side effects in other actors.
        self.check_conflicts(&id, &item)?;
        item.on_create(ctx).await.map_err(entity_error)?;
        self.next_id += 1;
        self.store.insert(id, item.clone());
        Ok(item)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut staged = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        staged.on_update(update, ctx).await.map_err(entity_error)?;
        self.check_conflicts(id, &staged)?;
        self.store.insert(id.clone(), staged.clone());
        Ok(staged)
    }

    async fn delete(&mut self, id: &T::Id, ctx: &T::Context) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(ctx).await.map_err(entity_error)?;
        self.store.remove(id);
        Ok(())
    }

    async fn action(
        &mut self,
        id: &T::Id,
        action: T::Action,
        ctx: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut staged = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let result = staged
            .handle_action(action, ctx)
            .await
            .map_err(entity_error)?;
        self.store.insert(id.clone(), staged);
        Ok(result)
    }

    /// Applies every action in order against staged copies and commits them together.
    ///
    /// An id appearing twice sees the effect of its earlier action. The first failure (missing
    /// id or entity error) discards the staged copies.
    async fn transaction(
        &mut self,
        actions: Vec<(T::Id, T::Action)>,
        ctx: &T::Context,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        let mut staged: BTreeMap<T::Id, T> = BTreeMap::new();
        let mut results = Vec::with_capacity(actions.len());

        for (id, action) in actions {
            let item = match staged.entry(id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let current = self
                        .store
                        .get(entry.key())
                        .cloned()
                        .ok_or_else(|| FrameworkError::NotFound(entry.key().to_string()))?;
                    entry.insert(current)
                }
            };
            results.push(item.handle_action(action, ctx).await.map_err(entity_error)?);
        }

        self.store.extend(staged);
        Ok(results)
    }

    fn find_page(
        &self,
        query: &T::Query,
        request: &PageRequest<T::SortField>,
    ) -> Result<Page<T>, FrameworkError> {
        request.validate()?;
        let mut items: Vec<T> = self
            .store
            .values()
            .filter(|item| item.matches(query))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            let ordering = a.compare_by(b, &request.sort_by);
            match request.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });
        Ok(Page::from_sorted(items, request))
    }
}

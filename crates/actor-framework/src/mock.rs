//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of scripted expectations instead of a store. Code that only talks to a client (an
//! entity hook calling another actor, a service wrapper) can be tested without spawning the
//! actors it depends on.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, answers are scripted | Real store |
//! | **Use Case** | Logic *around* the client | The actor itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Requires building the failing state |
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//! use std::cmp::Ordering;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Shelf { id: u32, slots: u32 }
//! #[derive(Debug)] struct ShelfCreate;
//! #[derive(Debug)] enum ShelfAction { Take(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("shelf error")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = ShelfCreate; type Update = (); type Action = ShelfAction;
//!     type ActionResult = u32; type Query = (); type SortField = ();
//!     type Context = (); type Error = ShelfError;
//!     fn from_create_params(id: u32, _: ShelfCreate) -> Result<Self, ShelfError> {
//!         Ok(Self { id, slots: 0 })
//!     }
//!     fn matches(&self, _: &()) -> bool { true }
//!     fn compare_by(&self, other: &Self, _: &()) -> Ordering { self.id.cmp(&other.id) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), ShelfError> { Ok(()) }
//!     async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<u32, ShelfError> {
//!         Ok(self.slots)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shelf>::new();
//!     mock.expect_get(1).return_ok(Some(Shelf { id: 1, slots: 4 }));
//!     mock.expect_transaction().return_err(FrameworkError::NotFound("9".into()));
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap().unwrap().slots, 4);
//!     let failed = client.transact(vec![(9, ShelfAction::Take(1))]).await;
//!     assert!(matches!(failed, Err(FrameworkError::NotFound(_))));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Inspecting Payloads
//!
//! When the test needs to look at *what* was sent (the quantities in a reservation, say),
//! use [`create_mock_client`] and the `expect_*` receiver helpers instead: they hand back the
//! request payload together with the responder.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::page::Page;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer to the next request.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Transaction {
        response: Result<Vec<T::ActionResult>, FrameworkError>,
    },
    Find {
        response: Result<Vec<T>, FrameworkError>,
    },
    FindPage {
        response: Result<Page<T>, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "Get",
            Expectation::Create { .. } => "Create",
            Expectation::Update { .. } => "Update",
            Expectation::Delete { .. } => "Delete",
            Expectation::Action { .. } => "Action",
            Expectation::Transaction { .. } => "Transaction",
            Expectation::Find { .. } => "Find",
            Expectation::FindPage { .. } => "FindPage",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn answer_for<R, I: PartialEq + std::fmt::Display>(
    expected: &I,
    actual: &I,
    respond_to: Response<R>,
    response: Result<R, FrameworkError>,
    failures: &Mutex<Vec<String>>,
) {
    if expected == actual {
        let _ = respond_to.send(response);
    } else {
        // Dropping the responder surfaces as ActorDropped in the code under test.
        lock(failures).push(format!("expected id {expected}, got {actual}"));
    }
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next expectation
/// (wrong kind or wrong id) is answered by dropping its responder and recorded;
/// [`verify`](Self::verify) panics on recorded mismatches and on unconsumed expectations.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    failures: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let failed = failures.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => answer_for(&expected, &id, respond_to, response, &failed),
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => answer_for(&expected, &id, respond_to, response, &failed),
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => answer_for(&expected, &id, respond_to, response, &failed),
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => answer_for(&expected, &id, respond_to, response, &failed),
                    (
                        ResourceRequest::Transaction { respond_to, .. },
                        Some(Expectation::Transaction { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Find { respond_to, .. },
                        Some(Expectation::Find { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::FindPage { respond_to, .. },
                        Some(Expectation::FindPage { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, Some(expectation)) => {
                        lock(&failed).push(format!(
                            "expected {} request, got {:?}",
                            expectation.name(),
                            request
                        ));
                    }
                    (request, None) => {
                        lock(&failed).push(format!("unexpected request {request:?}"));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            failures,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder(&self) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            inner: self.builder(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            inner: self.builder(),
        }
    }

    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            inner: self.builder(),
        }
    }

    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            inner: self.builder(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            inner: self.builder(),
        }
    }

    /// Expects a `transact` call, whatever its actions.
    pub fn expect_transaction(&mut self) -> TransactionExpectationBuilder<T> {
        TransactionExpectationBuilder {
            inner: self.builder(),
        }
    }

    pub fn expect_find(&mut self) -> FindExpectationBuilder<T> {
        FindExpectationBuilder {
            inner: self.builder(),
        }
    }

    pub fn expect_find_page(&mut self) -> FindPageExpectationBuilder<T> {
        FindPageExpectationBuilder {
            inner: self.builder(),
        }
    }

    /// Verifies that every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let failures = lock(&self.failures);
        if !failures.is_empty() {
            panic!("Mock received mismatched requests: {failures:?}");
        }
        let exps = lock(&self.expectations);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

struct ExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> ExpectationBuilder<T> {
    fn push(self, expectation: Expectation<T>) {
        lock(&self.expectations).push_back(expectation);
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    inner: ExpectationBuilder<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.inner.push(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.inner.push(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    inner: ExpectationBuilder<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    /// Answers with `entity` as if it had just been stored.
    pub fn return_ok(self, entity: T) {
        self.inner.push(Expectation::Create {
            response: Ok(entity),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.inner.push(Expectation::Create {
            response: Err(error),
        });
    }
}

pub struct UpdateExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    inner: ExpectationBuilder<T>,
}

impl<T: ActorEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, entity: T) {
        self.inner.push(Expectation::Update {
            id: self.id,
            response: Ok(entity),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.inner.push(Expectation::Update {
            id: self.id,
            response: Err(error),
        });
    }
}

pub struct DeleteExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    inner: ExpectationBuilder<T>,
}

impl<T: ActorEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.inner.push(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.inner.push(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    inner: ExpectationBuilder<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.inner.push(Expectation::Action {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.inner.push(Expectation::Action {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `transaction` expectations.
pub struct TransactionExpectationBuilder<T: ActorEntity> {
    inner: ExpectationBuilder<T>,
}

impl<T: ActorEntity> TransactionExpectationBuilder<T> {
    pub fn return_ok(self, results: Vec<T::ActionResult>) {
        self.inner.push(Expectation::Transaction {
            response: Ok(results),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.inner.push(Expectation::Transaction {
            response: Err(error),
        });
    }
}

pub struct FindExpectationBuilder<T: ActorEntity> {
    inner: ExpectationBuilder<T>,
}

impl<T: ActorEntity> FindExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        self.inner.push(Expectation::Find {
            response: Ok(items),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.inner.push(Expectation::Find {
            response: Err(error),
        });
    }
}

pub struct FindPageExpectationBuilder<T: ActorEntity> {
    inner: ExpectationBuilder<T>,
}

impl<T: ActorEntity> FindPageExpectationBuilder<T> {
    pub fn return_ok(self, page: Page<T>) {
        self.inner.push(Expectation::FindPage {
            response: Ok(page),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.inner.push(Expectation::FindPage {
            response: Err(error),
        });
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiving end of its channel.
///
/// The test plays the actor: it pulls requests off `receiver`, asserts on their payloads and
/// answers through the responder. Use this over [`MockClient`] when the payload matters.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Transaction request
pub async fn expect_transaction<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<(T::Id, T::Action)>, Response<Vec<T::ActionResult>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Transaction {
            actions,
            respond_to,
        }) => Some((actions, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cmp::Ordering;

    #[derive(Clone, Debug, PartialEq)]
    struct Bin {
        id: u32,
        label: String,
        count: u32,
    }

    #[derive(Debug)]
    struct BinCreate {
        label: String,
    }

    #[derive(Debug, PartialEq)]
    enum BinAction {
        Add(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Bin error")]
    struct BinError;

    #[async_trait]
    impl ActorEntity for Bin {
        type Id = u32;
        type Create = BinCreate;
        type Update = ();
        type Action = BinAction;
        type ActionResult = u32;
        type Query = ();
        type SortField = ();
        type Context = ();
        type Error = BinError;

        fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
                count: 0,
            })
        }

        fn matches(&self, _query: &()) -> bool {
            true
        }

        fn compare_by(&self, other: &Self, _field: &()) -> Ordering {
            self.id.cmp(&other.id)
        }

        async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: BinAction, _ctx: &()) -> Result<u32, BinError> {
            let BinAction::Add(n) = action;
            self.count += n;
            Ok(self.count)
        }
    }

    fn bin(id: u32, label: &str) -> Bin {
        Bin {
            id,
            label: label.to_string(),
            count: 0,
        }
    }

    #[tokio::test]
    async fn test_receiver_helpers_expose_payloads() {
        let (client, mut receiver) = create_mock_client::<Bin>(10);

        let task = tokio::spawn(async move {
            client
                .transact(vec![(1, BinAction::Add(2)), (2, BinAction::Add(5))])
                .await
        });

        let (actions, responder) = expect_transaction(&mut receiver)
            .await
            .expect("Expected Transaction request");
        assert_eq!(actions, vec![(1, BinAction::Add(2)), (2, BinAction::Add(5))]);
        responder.send(Ok(vec![2, 5])).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), vec![2, 5]);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_create().return_ok(bin(1, "a"));
        mock.expect_get(1).return_ok(Some(bin(1, "a")));
        mock.expect_find().return_ok(vec![bin(1, "a"), bin(2, "b")]);
        mock.expect_delete(1).return_ok();

        let client = mock.client();

        let created = client
            .create(BinCreate {
                label: "a".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.unwrap().label, "a");
        assert_eq!(client.find(()).await.unwrap().len(), 2);
        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "mismatched")]
    async fn test_verify_reports_wrong_id() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "remaining")]
    async fn test_verify_reports_unused_expectations() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_action(1).return_ok(3);
        mock.verify();
    }
}

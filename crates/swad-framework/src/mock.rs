//! # Mock Clients
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of by an actor. Use it when
//! the code under test *talks to* an actor (a domain client, or an actor whose
//! context holds other clients) and the other side should be scripted.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | scripted replies | real store |
//! | Error injection | `return_err` | needs crafted state |
//! | Use case | logic around the client | the actor itself, full flows |
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (wrong kind or wrong id) is answered with
//! [`FrameworkError::NotFound`] and recorded; [`MockClient::verify`] panics with
//! the recorded mismatches and with any expectation left unused.
//!
//! ```rust
//! use swad_framework::mock::MockClient;
//! use swad_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Kitchen { id: u32, open: bool }
//! #[derive(Debug)] struct KitchenCreate;
//! #[derive(Debug)] struct KitchenUpdate;
//! #[derive(Debug)] enum KitchenAction {}
//! #[derive(Debug, thiserror::Error)] #[error("kitchen error")] struct KitchenError;
//!
//! #[async_trait]
//! impl ActorEntity for Kitchen {
//!     type Id = u32; type Create = KitchenCreate; type Update = KitchenUpdate;
//!     type Action = KitchenAction; type ActionResult = (); type Context = (); type Error = KitchenError;
//!     fn from_create_params(id: u32, _: KitchenCreate) -> Result<Self, Self::Error> { Ok(Self { id, open: true }) }
//!     async fn on_update(&mut self, _: KitchenUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: KitchenAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Kitchen>::new();
//!     mock.expect_get(1).return_ok(Some(Kitchen { id: 1, open: true }));
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get(1).await.unwrap().unwrap().open);
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For finer control, [`create_mock_client`] returns the raw request receiver
//! and [`expect_action`] and friends pull typed requests off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Get { id, .. } => format!("get({id})"),
            Expectation::List { .. } => "list()".to_string(),
            Expectation::Create { .. } => "create()".to_string(),
            Expectation::Update { id, .. } => format!("update({id})"),
            Expectation::Action { id, .. } => format!("action({id})"),
        }
    }
}

struct Script<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
}

type Shared<T> = Arc<Mutex<Script<T>>>;

fn lock<T: ActorEntity>(script: &Shared<T>) -> MutexGuard<'_, Script<T>> {
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    script: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let script: Shared<T> = Arc::new(Mutex::new(Script {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let responder = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&responder).expectations.pop_front();
                answer(request, next, &responder);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.script, move |response| Expectation::Get { id, response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.script, |response| Expectation::List { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(&self.script, |response| Expectation::Create { response })
    }

    /// Expects an `update` operation for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.script, move |response| Expectation::Update { id, response })
    }

    /// Expects an `action` operation for `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(&self.script, move |response| Expectation::Action { id, response })
    }

    /// Panics if a request did not match its expectation or if expectations
    /// remain unused.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.mismatches.is_empty() {
            panic!("Unexpected requests: {}", script.mismatches.join(", "));
        }
        if !script.expectations.is_empty() {
            let remaining: Vec<String> = script.expectations.iter().map(Expectation::describe).collect();
            panic!("Not all expectations were met: {}", remaining.join(", "));
        }
    }
}

/// Answers one request, recording a mismatch before replying to it.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
    script: &Shared<T>,
) {
    match (request, expectation) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response }))
            if id == want =>
        {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) if id == want => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) if id == want => {
            let _ = respond_to.send(response);
        }
        (request, expectation) => {
            let wanted = expectation
                .as_ref()
                .map_or_else(|| "nothing".to_string(), Expectation::describe);
            let got = describe_request(&request);
            lock(script)
                .mismatches
                .push(format!("{got} while expecting {wanted}"));
            refuse(request);
        }
    }
}

fn describe_request<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Get { id, .. } => format!("get({id})"),
        ResourceRequest::List { .. } => "list()".to_string(),
        ResourceRequest::Create { .. } => "create()".to_string(),
        ResourceRequest::Update { id, .. } => format!("update({id})"),
        ResourceRequest::Delete { id, .. } => format!("delete({id})"),
        ResourceRequest::Action { id, .. } => format!("action({id})"),
        ResourceRequest::Watch { id, .. } => format!("watch({id})"),
    }
}

fn refusal<R>() -> Result<R, FrameworkError> {
    Err(FrameworkError::NotFound("unexpected mock request".to_string()))
}

fn refuse<T: ActorEntity>(request: ResourceRequest<T>) {
    match request {
        ResourceRequest::Get { respond_to, .. } => {
            let _ = respond_to.send(refusal());
        }
        ResourceRequest::List { respond_to } => {
            let _ = respond_to.send(refusal());
        }
        ResourceRequest::Create { respond_to, .. } => {
            let _ = respond_to.send(refusal());
        }
        ResourceRequest::Update { respond_to, .. } => {
            let _ = respond_to.send(refusal());
        }
        ResourceRequest::Delete { respond_to, .. } => {
            let _ = respond_to.send(refusal());
        }
        ResourceRequest::Action { respond_to, .. } => {
            let _ = respond_to.send(refusal());
        }
        ResourceRequest::Watch { respond_to, .. } => {
            let _ = respond_to.send(refusal());
        }
    }
}

/// Queues one expectation replying with `R`.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    script: Shared<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        script: &Shared<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            script: script.clone(),
            build: Box::new(build),
        }
    }

    /// Replies with a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        lock(&self.script).expectations.push_back(expectation);
    }

    /// Replies with an error.
    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.build)(Err(error));
        lock(&self.script).expectations.push_back(expectation);
    }
}

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: pull a request with one of the `expect_*`
/// helpers, assert on its payload, then answer through the returned sender.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Stall {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct StallCreate {
        name: String,
    }

    #[derive(Debug)]
    struct StallUpdate;

    #[derive(Debug)]
    enum StallAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("Stall error")]
    struct StallError;

    #[async_trait]
    impl ActorEntity for Stall {
        type Id = u32;
        type Create = StallCreate;
        type Update = StallUpdate;
        type Action = StallAction;
        type ActionResult = ();
        type Context = ();
        type Error = StallError;

        fn from_create_params(id: u32, params: StallCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(&mut self, _: StallUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: StallAction, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn stall(id: u32, name: &str) -> Stall {
        Stall {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn raw_receiver_lets_the_test_answer() {
        let (client, mut receiver) = create_mock_client::<Stall>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(StallCreate {
                    name: "Momo Corner".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Momo Corner");
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn expectations_are_answered_in_order() {
        let mut mock = MockClient::<Stall>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(stall(1, "Chai Point")));
        mock.expect_list().return_ok(vec![stall(1, "Chai Point"), stall(2, "Thali House")]);

        let client = mock.client();
        let id = client
            .create(StallCreate {
                name: "Chai Point".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().name, "Chai Point");
        assert_eq!(client.list().await.unwrap().len(), 2);

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests: get(2) while expecting get(1)")]
    async fn wrong_id_is_reported_by_verify() {
        let mut mock = MockClient::<Stall>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(_))));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met: list()")]
    async fn unused_expectations_fail_verify() {
        let mut mock = MockClient::<Stall>::new();
        mock.expect_list().return_ok(Vec::new());
        mock.verify();
    }
}

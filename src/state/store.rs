//! RequestStore - Generic Request-State Store
//!
//! One store mediates between one view and one remote operation. It tracks
//! the [`RequestState`] of the latest request, owns the result set, and
//! publishes immutable [`StoreSnapshot`]s on a watch channel that views and
//! selectors subscribe to.
//!
//! ## Pattern
//!
//! ```text
//! view ── trigger(params) ──▶ RequestStore ── call(params) ──▶ RemoteOperation
//!   ▲                              │                                │
//!   │                              ▼                                │
//!   └──── Selector ◀── watch<StoreSnapshot> ◀── complete(gen) ◀─────┘
//! ```
//!
//! Every trigger bumps a generation counter; a response is applied only if
//! its generation is still current, so the most recent trigger always wins.

use crate::services::{RemoteOperation, RemoteResult, spawn_in_tokio, spawn_named_in_tokio};
use crate::state::request_state::RequestState;
use crate::view::Selector;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Immutable view of a store at one point in time
#[derive(Debug)]
pub struct StoreSnapshot<T> {
    /// Status of the latest request
    pub state: RequestState,
    /// Result set; `None` before the first response and after reset
    pub data: Option<Arc<Vec<T>>>,
}

impl<T> StoreSnapshot<T> {
    /// Records of the result set, empty when there is none
    pub fn records(&self) -> &[T] {
        self.data.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

impl<T> Clone for StoreSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            data: self.data.clone(),
        }
    }
}

impl<T> Default for StoreSnapshot<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Init,
            data: None,
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the store handle and its spawned tasks
struct Shared<P, T> {
    name: Arc<str>,
    operation: Arc<dyn RemoteOperation<P, T>>,
    tx: watch::Sender<StoreSnapshot<T>>,
    generation: AtomicU64,
    last_params: Mutex<Option<P>>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl<P, T> Shared<P, T>
where
    P: Clone + Send + 'static,
    T: Send + Sync + 'static,
{
    /// Start a request, superseding any earlier one
    fn dispatch(self: &Arc<Self>, params: P) {
        *lock(&self.last_params) = Some(params.clone());

        // Generation and Loading move together under the channel lock, so a
        // concurrent reset lands either wholly before or wholly after.
        let mut generation = 0;
        self.tx.send_if_modified(|snapshot| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if snapshot.state.is_loading() {
                return false;
            }
            snapshot.state = RequestState::Loading;
            true
        });
        tracing::debug!(store = %self.name, generation, "Request started");

        let request = self.operation.call(params);
        let shared = Arc::clone(self);
        let handle = spawn_in_tokio(async move {
            let result = request.await;
            shared.complete(generation, result);
        });

        let mut tasks = lock(&self.in_flight);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Apply a response if it belongs to the current generation
    fn complete(&self, generation: u64, result: RemoteResult<T>) {
        let mut failure = None;
        let applied = self.tx.send_if_modified(|snapshot| {
            // Checked under the channel lock so a concurrent trigger or reset
            // either lands before this response or overrides it afterwards.
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok(records) => {
                    snapshot.state = RequestState::from_len(records.len());
                    snapshot.data = Some(Arc::new(records));
                }
                Err(error) => {
                    snapshot.state = RequestState::from_error(&error);
                    snapshot.data = Some(Arc::new(Vec::new()));
                    failure = Some(error);
                }
            }
            true
        });

        if !applied {
            tracing::debug!(store = %self.name, generation, "Discarding stale response");
            return;
        }

        let state = self.tx.borrow().state;
        match failure {
            Some(error) => {
                tracing::warn!(store = %self.name, generation, %state, "Request failed: {}", error)
            }
            None => tracing::debug!(store = %self.name, generation, %state, "Request completed"),
        }
    }
}

impl<P, T> Shared<P, T> {
    /// Abort everything in flight, then invalidate its generation
    ///
    /// `settle` runs under the channel lock together with the bump and
    /// reports whether the snapshot changed.
    fn cancel_in_flight(&self, settle: impl FnOnce(&mut StoreSnapshot<T>) -> bool) -> bool {
        for task in lock(&self.in_flight).drain(..) {
            task.abort();
        }
        self.tx.send_if_modified(|snapshot| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            settle(snapshot)
        })
    }
}

/// Per-feature request-state store
///
/// Created by the view that owns it and dropped with it. Dropping aborts
/// all pending continuations, so late responses have no observable effect.
pub struct RequestStore<P, T> {
    shared: Arc<Shared<P, T>>,
    follower: Mutex<Option<JoinHandle<()>>>,
}

impl<P, T> RequestStore<P, T>
where
    P: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    /// Create a store around a remote operation
    pub fn new(name: impl Into<Arc<str>>, operation: impl RemoteOperation<P, T>) -> Self {
        Self::from_arc(name, Arc::new(operation))
    }

    /// Create a store from a shared remote operation
    pub fn from_arc(name: impl Into<Arc<str>>, operation: Arc<dyn RemoteOperation<P, T>>) -> Self {
        let name = name.into();
        let (tx, _rx) = watch::channel(StoreSnapshot::default());
        tracing::debug!(store = %name, "Store created");

        Self {
            shared: Arc::new(Shared {
                name,
                operation,
                tx,
                generation: AtomicU64::new(0),
                last_params: Mutex::new(None),
                in_flight: Mutex::new(Vec::new()),
            }),
            follower: Mutex::new(None),
        }
    }

    /// Store name (for logging)
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    // ==================== Actions ====================

    /// Start (or restart) the remote operation
    ///
    /// The state becomes `Loading` immediately. A response to any earlier
    /// trigger that arrives afterwards is ignored.
    pub fn trigger(&self, params: P) {
        self.shared.dispatch(params);
    }

    /// Re-issue the last triggered request
    ///
    /// Returns `false` when nothing has been triggered since creation or reset.
    pub fn retry(&self) -> bool {
        let last = lock(&self.shared.last_params).clone();
        match last {
            Some(params) => {
                self.shared.dispatch(params);
                true
            }
            None => false,
        }
    }

    /// Return to `Init` and clear the result set
    pub fn reset(&self) {
        *lock(&self.shared.last_params) = None;

        let changed = self.shared.cancel_in_flight(|snapshot| {
            if snapshot.state.is_init() && snapshot.data.is_none() {
                return false;
            }
            *snapshot = StoreSnapshot::default();
            true
        });
        if changed {
            tracing::debug!(store = %self.shared.name, "Store reset");
        }
    }

    /// Trigger the store every time `params` publishes a new value
    ///
    /// The current value is used for an immediate first trigger. Replaces any
    /// earlier binding.
    pub fn follow(&self, mut params: watch::Receiver<P>) {
        let shared = Arc::clone(&self.shared);
        let handle = spawn_named_in_tokio("store-follow", async move {
            let initial = params.borrow_and_update().clone();
            shared.dispatch(initial);
            while params.changed().await.is_ok() {
                let next = params.borrow_and_update().clone();
                shared.dispatch(next);
            }
        });

        if let Some(previous) = lock(&self.follower).replace(handle) {
            previous.abort();
        }
    }

    // ==================== Selectors ====================

    /// Current request state
    pub fn state(&self) -> RequestState {
        self.shared.tx.borrow().state
    }

    /// Current result set
    pub fn data(&self) -> Option<Arc<Vec<T>>> {
        self.shared.tx.borrow().data.clone()
    }

    /// Current snapshot (state and data together)
    pub fn snapshot(&self) -> StoreSnapshot<T> {
        self.shared.tx.borrow().clone()
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot<T>> {
        self.shared.tx.subscribe()
    }

    /// Derive a reactive projection of the store
    pub fn select<V, F>(&self, project: F) -> Selector<T, V>
    where
        V: 'static,
        F: Fn(&StoreSnapshot<T>) -> V + Send + Sync + 'static,
    {
        Selector::new(self.subscribe(), project)
    }
}

impl<P, T> Drop for RequestStore<P, T> {
    fn drop(&mut self) {
        if let Some(follower) = lock(&self.follower).take() {
            follower.abort();
        }
        self.shared.cancel_in_flight(|_| false);
        tracing::debug!(store = %self.shared.name, "Store dropped");
    }
}

impl<P, T> std::fmt::Debug for RequestStore<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestStore")
            .field("name", &self.shared.name)
            .field("state", &self.shared.tx.borrow().state)
            .field("generation", &self.shared.generation.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::services::operation_fn;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::oneshot;

    type Responder = oneshot::Sender<RemoteResult<u32>>;

    /// Remote operation whose responses are released by the test
    #[derive(Default)]
    struct Controlled {
        responders: Mutex<HashMap<u32, Responder>>,
        calls: AtomicUsize,
    }

    impl Controlled {
        fn resolve(&self, request: u32, result: RemoteResult<u32>) {
            let responder = lock(&self.responders)
                .remove(&request)
                .expect("request was issued");
            responder.send(result).expect("store still listening");
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn controlled_store() -> (Arc<Controlled>, RequestStore<u32, u32>) {
        let control = Arc::new(Controlled::default());
        let handle = control.clone();
        let store = RequestStore::new(
            "test",
            operation_fn(move |request: u32| {
                let (tx, rx) = oneshot::channel();
                lock(&handle.responders).insert(request, tx);
                handle.calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    rx.await.unwrap_or_else(|_| {
                        Err(RemoteError::Transport {
                            message: "dropped".into(),
                        })
                    })
                }
            }),
        );
        (control, store)
    }

    async fn settle(store: &RequestStore<u32, u32>) -> StoreSnapshot<u32> {
        let mut rx = store.subscribe();
        let snapshot = tokio::time::timeout(
            Duration::from_secs(1),
            rx.wait_for(|s| !s.state.is_loading()),
        )
        .await
        .expect("store settled in time")
        .expect("store alive")
        .clone();
        snapshot
    }

    async fn let_tasks_run() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_starts_in_init() {
        let (_control, store) = controlled_store();
        assert_eq!(store.state(), RequestState::Init);
        assert!(store.data().is_none());
    }

    #[tokio::test]
    async fn test_loading_immediately_after_trigger() {
        let (control, store) = controlled_store();
        store.trigger(1);
        assert_eq!(store.state(), RequestState::Loading);
        assert_eq!(control.calls(), 1);
    }

    #[tokio::test]
    async fn test_example_scenario() {
        let (control, store) = controlled_store();

        store.trigger(1);
        assert_eq!(store.state(), RequestState::Loading);
        control.resolve(1, Ok(vec![10, 11, 12]));
        let snapshot = settle(&store).await;
        assert_eq!(snapshot.state, RequestState::Loaded);
        assert_eq!(snapshot.len(), 3);

        store.trigger(2);
        assert_eq!(store.state(), RequestState::Loading);
        control.resolve(2, Ok(vec![]));
        let snapshot = settle(&store).await;
        assert_eq!(snapshot.state, RequestState::NotFoundError);
        assert_eq!(snapshot.data.as_deref(), Some(&Vec::new()));

        store.reset();
        assert_eq!(store.state(), RequestState::Init);
        assert!(store.data().is_none());
        assert_eq!(control.calls(), 2);
    }

    #[tokio::test]
    async fn test_not_found_status_classified() {
        let (control, store) = controlled_store();
        store.trigger(1);
        control.resolve(
            1,
            Err(RemoteError::Status {
                status: 404,
                message: "no such user".into(),
            }),
        );
        let snapshot = settle(&store).await;
        assert_eq!(snapshot.state, RequestState::NotFoundError);
        assert!(snapshot.data.is_some());
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_other_failures_are_general_errors() {
        let (control, store) = controlled_store();

        store.trigger(1);
        control.resolve(1, Ok(vec![1, 2]));
        settle(&store).await;

        store.trigger(2);
        control.resolve(
            2,
            Err(RemoteError::Status {
                status: 500,
                message: "boom".into(),
            }),
        );
        let snapshot = settle(&store).await;
        assert_eq!(snapshot.state, RequestState::GeneralError);
        // Emptied, never partially populated
        assert_eq!(snapshot.data.as_deref(), Some(&Vec::new()));
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (control, store) = controlled_store();

        store.trigger(1);
        store.trigger(2);
        control.resolve(1, Ok(vec![1, 1, 1]));
        let_tasks_run().await;
        assert_eq!(store.state(), RequestState::Loading);
        assert!(store.data().is_none());

        control.resolve(2, Ok(vec![2]));
        let snapshot = settle(&store).await;
        assert_eq!(snapshot.state, RequestState::Loaded);
        assert_eq!(snapshot.records(), &[2]);
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_override_newer_success() {
        let (control, store) = controlled_store();

        store.trigger(1);
        store.trigger(2);
        control.resolve(2, Ok(vec![7]));
        settle(&store).await;

        control.resolve(
            1,
            Err(RemoteError::Transport {
                message: "late".into(),
            }),
        );
        let_tasks_run().await;
        assert_eq!(store.state(), RequestState::Loaded);
        assert_eq!(store.snapshot().records(), &[7]);
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let (control, store) = controlled_store();
        store.trigger(1);
        control.resolve(1, Ok(vec![1]));
        settle(&store).await;

        store.reset();
        let first = store.snapshot();
        store.reset();
        let second = store.snapshot();

        assert_eq!(first.state, RequestState::Init);
        assert_eq!(second.state, RequestState::Init);
        assert!(first.data.is_none());
        assert!(second.data.is_none());
    }

    #[tokio::test]
    async fn test_reset_invalidates_in_flight_request() {
        let (control, store) = controlled_store();
        store.trigger(1);
        let responder = lock(&control.responders)
            .remove(&1)
            .expect("request was issued");

        store.reset();
        assert_eq!(store.state(), RequestState::Init);

        let_tasks_run().await;
        assert!(responder.is_closed(), "in-flight task was aborted");
        assert!(responder.send(Ok(vec![1])).is_err());
        assert_eq!(store.state(), RequestState::Init);
        assert!(store.data().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_trigger_and_reset_never_stick_in_loading() {
        let runtime = tokio::runtime::Handle::current();
        for round in 0..500 {
            let store = RequestStore::new(
                "race",
                operation_fn(|request: u32| async move {
                    RemoteResult::<u32>::Ok(vec![request])
                }),
            );
            let barrier = std::sync::Barrier::new(2);
            std::thread::scope(|scope| {
                scope.spawn(|| {
                    let _guard = runtime.enter();
                    barrier.wait();
                    store.trigger(1);
                });
                scope.spawn(|| {
                    let _guard = runtime.enter();
                    barrier.wait();
                    store.reset();
                });
            });

            let mut rx = store.subscribe();
            let settled = tokio::time::timeout(
                Duration::from_secs(1),
                rx.wait_for(|s| !s.state.is_loading()),
            )
            .await
            .is_ok();
            assert!(settled, "round {round} stuck in Loading");
            let state = store.state();
            assert!(
                matches!(state, RequestState::Init | RequestState::Loaded),
                "round {round} ended in {state}"
            );
        }
    }

    #[tokio::test]
    async fn test_retry_reissues_last_params() {
        let (control, store) = controlled_store();
        assert!(!store.retry());

        store.trigger(5);
        control.resolve(
            5,
            Err(RemoteError::Transport {
                message: "offline".into(),
            }),
        );
        assert_eq!(settle(&store).await.state, RequestState::GeneralError);

        assert!(store.retry());
        assert_eq!(store.state(), RequestState::Loading);
        control.resolve(5, Ok(vec![5]));
        assert_eq!(settle(&store).await.state, RequestState::Loaded);
        assert_eq!(control.calls(), 2);
    }

    #[tokio::test]
    async fn test_follow_triggers_on_each_published_value() {
        let (control, store) = controlled_store();
        let (tx, rx) = watch::channel(1u32);
        store.follow(rx);

        let_tasks_run().await;
        assert_eq!(store.state(), RequestState::Loading);
        control.resolve(1, Ok(vec![1]));
        settle(&store).await;

        tx.send_replace(2);
        let_tasks_run().await;
        assert_eq!(control.calls(), 2);
        control.resolve(2, Ok(vec![2, 2]));
        assert_eq!(settle(&store).await.len(), 2);
    }

    #[tokio::test]
    async fn test_drop_ignores_late_response() {
        let (control, store) = controlled_store();
        let mut rx = store.subscribe();
        store.trigger(1);
        assert_eq!(rx.borrow_and_update().state, RequestState::Loading);
        let responder = lock(&control.responders)
            .remove(&1)
            .expect("request was issued");

        drop(store);
        let_tasks_run().await;

        assert!(responder.is_closed(), "in-flight task was aborted");
        assert!(responder.send(Ok(vec![1])).is_err());
        // Sender is gone with the store; the last published value stays put
        assert!(rx.has_changed().is_err());
        assert_eq!(rx.borrow().state, RequestState::Loading);
        assert!(rx.borrow().data.is_none());
    }
}

//! Selector - Reactive Derived Views
//!
//! A selector pairs a store subscription with a pure projection. The
//! projection is re-run on every read; nothing is cached beside the store.

use crate::state::StoreSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

type Projection<T, V> = Arc<dyn Fn(&StoreSnapshot<T>) -> V + Send + Sync>;

/// Read-only projection of a store's snapshot
pub struct Selector<T, V> {
    rx: watch::Receiver<StoreSnapshot<T>>,
    project: Projection<T, V>,
}

impl<T, V> Selector<T, V>
where
    T: 'static,
    V: 'static,
{
    /// Create a selector over a snapshot subscription
    pub fn new<F>(rx: watch::Receiver<StoreSnapshot<T>>, project: F) -> Self
    where
        F: Fn(&StoreSnapshot<T>) -> V + Send + Sync + 'static,
    {
        Self {
            rx,
            project: Arc::new(project),
        }
    }

    /// Project the current snapshot
    pub fn get(&self) -> V {
        let snapshot = self.rx.borrow();
        (self.project)(&*snapshot)
    }

    /// Wait for the store to publish, then project the new snapshot
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<V> {
        self.rx.changed().await.ok()?;
        let snapshot = self.rx.borrow_and_update();
        Some((self.project)(&*snapshot))
    }

    /// Compose a further projection on top of this one
    pub fn map<W, F>(self, f: F) -> Selector<T, W>
    where
        F: Fn(V) -> W + Send + Sync + 'static,
        W: 'static,
    {
        let inner = self.project;
        Selector {
            rx: self.rx,
            project: Arc::new(move |snapshot: &StoreSnapshot<T>| f(inner(snapshot))),
        }
    }
}

impl<T, V> Clone for Selector<T, V> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            project: self.project.clone(),
        }
    }
}

impl<T, V> std::fmt::Debug for Selector<T, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("state", &self.rx.borrow().state)
            .finish()
    }
}

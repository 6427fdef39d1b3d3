//! ListController - Store Bound to a Query Coordinator
//!
//! The shape every list screen shares: one [`RequestStore`] over
//! [`QueryParameters`], fed by one [`QueryCoordinator`]. Features wrap it
//! and add their own derived views.

use crate::domain::config::QueryConfig;
use crate::services::RemoteOperation;
use crate::state::{QueryCoordinator, QueryParameters, RequestStore};

/// A list store and the coordinator that drives it
pub struct ListController<T> {
    store: RequestStore<QueryParameters, T>,
    query: QueryCoordinator,
}

impl<T> ListController<T>
where
    T: Send + Sync + 'static,
{
    /// Create a list controller; nothing is requested until [`load`](Self::load)
    pub fn new(
        name: &str,
        operation: impl RemoteOperation<QueryParameters, T>,
        config: &QueryConfig,
    ) -> Self {
        let store = RequestStore::new(name, operation);
        let query = QueryCoordinator::new(
            QueryParameters::with_page_size(config.page_size),
            config.debounce(),
        );
        Self { store, query }
    }

    /// Start loading and keep reloading on every parameter change
    pub fn load(&self) {
        tracing::info!(store = self.store.name(), "Loading list");
        self.store.follow(self.query.subscribe());
    }

    pub fn store(&self) -> &RequestStore<QueryParameters, T> {
        &self.store
    }

    pub fn query(&self) -> &QueryCoordinator {
        &self.query
    }
}

impl<T> std::fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("store", &self.store)
            .field("query", &self.query)
            .finish()
    }
}

//! Query Parameters and the Filter/Sort/Pagination Coordinator
//!
//! The coordinator owns a [`QueryParameters`] snapshot and republishes it
//! whenever a field changes. Free-text search is debounced; sort, page and
//! filter changes publish immediately. Stores consume the published
//! snapshots through [`RequestStore::follow`](crate::state::RequestStore::follow).

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SEARCH_DEBOUNCE_MS};
use crate::error::{Error, Result};
use crate::services::spawn_named_in_tokio;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Query-string keys owned by search, sort and pagination
pub const RESERVED_QUERY_KEYS: [&str; 5] =
    ["search", "sortColumn", "sortDirection", "offset", "size"];

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub column: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    /// Index of the first record
    pub offset: usize,
    /// Number of records per page
    pub size: usize,
}

impl Page {
    /// First page of the given size
    pub fn first(size: usize) -> Self {
        Self { offset: 0, size }
    }

    /// Create a validated page
    pub fn new(offset: usize, size: usize) -> Result<Self> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(Error::Invalid {
                message: format!("Page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
            });
        }
        Ok(Self { offset, size })
    }

    /// Zero-based page number
    pub fn index(&self) -> usize {
        self.offset / self.size.max(1)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Immutable set of parameters for a list request
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryParameters {
    /// Free-text search, `None` when blank
    pub search: Option<String>,
    /// Sort column and direction
    pub sort: Option<Sort>,
    /// Pagination window
    pub page: Page,
    /// Filter values by field name
    pub filters: BTreeMap<String, String>,
}

impl QueryParameters {
    /// Parameters with an explicit page size
    pub fn with_page_size(size: usize) -> Self {
        Self {
            page: Page::first(size),
            ..Default::default()
        }
    }

    /// Flatten into query-string pairs (stable order)
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sortColumn".to_string(), sort.column.clone()));
            pairs.push(("sortDirection".to_string(), sort.direction.as_str().to_string()));
        }
        pairs.push(("offset".to_string(), self.page.offset.to_string()));
        pairs.push(("size".to_string(), self.page.size.to_string()));
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }

    fn apply_search(&mut self, text: String) {
        let trimmed = text.trim();
        let search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        if self.search != search {
            self.search = search;
            self.page.offset = 0;
        }
    }
}

/// A single setter action
#[derive(Debug, Clone)]
enum QueryChange {
    Search(String),
    Sort(Option<Sort>),
    Page(Page),
    Filter { key: String, value: Option<String> },
    ClearFilters,
}

impl QueryChange {
    fn apply(self, params: &mut QueryParameters) {
        match self {
            QueryChange::Search(text) => params.apply_search(text),
            QueryChange::Sort(sort) => {
                if params.sort != sort {
                    params.sort = sort;
                    params.page.offset = 0;
                }
            }
            QueryChange::Page(page) => params.page = page,
            QueryChange::Filter { key, value } => {
                let changed = match value {
                    Some(value) => params.filters.insert(key, value.clone()).as_ref() != Some(&value),
                    None => params.filters.remove(&key).is_some(),
                };
                if changed {
                    params.page.offset = 0;
                }
            }
            QueryChange::ClearFilters => {
                if !params.filters.is_empty() {
                    params.filters.clear();
                    params.page.offset = 0;
                }
            }
        }
    }
}

/// Publishes a canonical [`QueryParameters`] snapshot as setters are called
pub struct QueryCoordinator {
    changes: mpsc::UnboundedSender<QueryChange>,
    params: watch::Receiver<QueryParameters>,
    task: JoinHandle<()>,
}

impl QueryCoordinator {
    /// Create a coordinator with an explicit debounce window
    pub fn new(initial: QueryParameters, debounce: Duration) -> Self {
        let (changes, rx) = mpsc::unbounded_channel();
        let (tx, params) = watch::channel(initial);
        let task = spawn_named_in_tokio("query-coordinator", run(rx, tx, debounce));

        Self {
            changes,
            params,
            task,
        }
    }

    /// Create a coordinator with the default page size and debounce window
    pub fn with_defaults() -> Self {
        Self::new(
            QueryParameters::default(),
            Duration::from_millis(SEARCH_DEBOUNCE_MS),
        )
    }

    // ==================== Setters ====================

    /// Change the free-text search (debounced)
    pub fn set_search(&self, text: impl Into<String>) {
        self.send(QueryChange::Search(text.into()));
    }

    /// Sort by a column
    pub fn set_sort(&self, column: impl Into<String>, direction: SortDirection) {
        self.send(QueryChange::Sort(Some(Sort::new(column, direction))));
    }

    /// Remove sorting
    pub fn clear_sort(&self) {
        self.send(QueryChange::Sort(None));
    }

    /// Move to another page
    pub fn set_page(&self, offset: usize, size: usize) -> Result<()> {
        let page = Page::new(offset, size)?;
        self.send(QueryChange::Page(page));
        Ok(())
    }

    /// Set a filter value
    ///
    /// Blank keys and the keys used by search, sort and pagination are rejected.
    pub fn set_filter(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if key.trim().is_empty() || RESERVED_QUERY_KEYS.contains(&key.as_str()) {
            return Err(Error::Invalid {
                message: format!("'{key}' cannot be used as a filter key"),
            });
        }
        self.send(QueryChange::Filter {
            key,
            value: Some(value.into()),
        });
        Ok(())
    }

    /// Remove a filter
    pub fn clear_filter(&self, key: impl Into<String>) {
        self.send(QueryChange::Filter {
            key: key.into(),
            value: None,
        });
    }

    /// Remove all filters
    pub fn clear_filters(&self) {
        self.send(QueryChange::ClearFilters);
    }

    // ==================== Selectors ====================

    /// Latest published parameters
    pub fn current(&self) -> QueryParameters {
        self.params.borrow().clone()
    }

    /// Subscribe to published parameters
    pub fn subscribe(&self) -> watch::Receiver<QueryParameters> {
        self.params.clone()
    }

    fn send(&self, change: QueryChange) {
        if self.changes.send(change).is_err() {
            tracing::warn!("Query coordinator stopped; change dropped");
        }
    }
}

impl Drop for QueryCoordinator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for QueryCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCoordinator")
            .field("params", &*self.params.borrow())
            .finish()
    }
}

/// Coordinator loop: debounce search, publish everything else immediately
async fn run(
    mut changes: mpsc::UnboundedReceiver<QueryChange>,
    tx: watch::Sender<QueryParameters>,
    debounce: Duration,
) {
    let mut current = tx.borrow().clone();
    let mut pending_search: Option<String> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        let change = match deadline {
            Some(at) => tokio::select! {
                change = changes.recv() => change,
                _ = tokio::time::sleep_until(at) => {
                    deadline = None;
                    if let Some(text) = pending_search.take() {
                        current.apply_search(text);
                        publish(&tx, &current);
                    }
                    continue;
                }
            },
            None => changes.recv().await,
        };

        let Some(change) = change else {
            break;
        };

        match change {
            QueryChange::Search(text) => {
                pending_search = Some(text);
                deadline = Some(Instant::now() + debounce);
            }
            immediate => {
                // An immediate change carries any pending search with it
                if let Some(text) = pending_search.take() {
                    current.apply_search(text);
                }
                deadline = None;
                immediate.apply(&mut current);
                publish(&tx, &current);
            }
        }
    }

    tracing::debug!("Query coordinator stopped");
}

fn publish(tx: &watch::Sender<QueryParameters>, current: &QueryParameters) {
    let published = tx.send_if_modified(|params| {
        if params == current {
            return false;
        }
        *params = current.clone();
        true
    });
    if published {
        tracing::debug!(?current, "Query parameters published");
    }
}

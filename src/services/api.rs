//! HTTP API Client
//!
//! reqwest-backed client for the DataHub REST endpoints. List endpoints
//! return either a bare JSON array or a `{ "items": [...] }` page envelope.
//! Failures are classified into [`RemoteError`] so stores can turn them into
//! a request state.

use crate::domain::config::ApiConfig;
use crate::error::{Error, RemoteError, Result};
use crate::services::remote::{RemoteOperation, RemoteResult};
use crate::services::session::Session;
use crate::state::QueryParameters;
use futures::future::BoxFuture;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// Longest error body excerpt kept in a [`RemoteError::Status`]
const ERROR_BODY_LIMIT: usize = 200;

/// Accepted shapes of a list response
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Items(Vec<T>),
    Page { items: Vec<T> },
}

impl<T> ListResponse<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Items(items) | ListResponse::Page { items } => items,
        }
    }
}

/// Client for the remote API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a client from configuration and the current session
    pub fn new(config: &ApiConfig, session: Arc<Session>) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| Error::Invalid {
            message: format!("Invalid api.base_url {base}: {e}"),
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        tracing::info!("API client targeting {}", base_url);
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// URL of the endpoint made of `segments` below the base URL
    ///
    /// Each segment is percent-encoded, so ids cannot escape their segment.
    pub fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::Transport {
                message: format!("Base URL {} cannot hold a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a list endpoint
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(String, String)],
    ) -> RemoteResult<T> {
        let url = self.endpoint(segments)?;
        let path = segments.join("/");
        let path = path.as_str();

        let mut request = self.http.get(url).query(query);
        if let Some(token) = self.session.bearer() {
            request = request.bearer_auth(token);
        }

        tracing::debug!(path, "GET");
        let response = request.send().await.map_err(|e| RemoteError::Transport {
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| RemoteError::Transport {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(classify_status(status, path, &body));
        }

        let list: ListResponse<T> =
            serde_json::from_slice(&body).map_err(|e| RemoteError::Decode {
                message: e.to_string(),
            })?;
        Ok(list.into_items())
    }

    /// Remote operation listing `path` with query parameters
    pub fn resource<T>(&self, path: impl Into<Arc<str>>) -> HttpResource<T> {
        HttpResource {
            client: self.clone(),
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session.id())
            .finish()
    }
}

/// Map a non-success status to a remote failure
pub fn classify_status(status: StatusCode, path: &str, body: &[u8]) -> RemoteError {
    if status == StatusCode::NOT_FOUND {
        return RemoteError::NotFound {
            resource: path.to_string(),
        };
    }
    let mut message: String = String::from_utf8_lossy(body).into_owned();
    if message.len() > ERROR_BODY_LIMIT {
        let cut = (0..=ERROR_BODY_LIMIT)
            .rev()
            .find(|i| message.is_char_boundary(*i))
            .unwrap_or(0);
        message.truncate(cut);
    }
    RemoteError::Status {
        status: status.as_u16(),
        message,
    }
}

/// List endpoint driven by [`QueryParameters`]
pub struct HttpResource<T> {
    client: ApiClient,
    path: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RemoteOperation<QueryParameters, T> for HttpResource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    fn call(&self, params: QueryParameters) -> BoxFuture<'static, RemoteResult<T>> {
        let client = self.client.clone();
        let path = self.path.clone();
        Box::pin(async move { client.get_list(&[&*path], &params.to_query_pairs()).await })
    }
}

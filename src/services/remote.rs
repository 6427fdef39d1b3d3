//! Remote Operation Seam
//!
//! Every store talks to the outside world through a [`RemoteOperation`]:
//! "(params) eventually yields either records or a classifiable failure".
//! Transport, wire format and authentication live behind it.

use crate::error::RemoteError;
use futures::future::BoxFuture;
use std::future::Future;
use std::marker::PhantomData;

/// Result of a single remote call
pub type RemoteResult<T> = std::result::Result<Vec<T>, RemoteError>;

/// A remote read operation returning an ordered list of records
pub trait RemoteOperation<P, T>: Send + Sync + 'static {
    /// Issue one call with the given parameters
    fn call(&self, params: P) -> BoxFuture<'static, RemoteResult<T>>;
}

/// Adapter turning an async closure into a [`RemoteOperation`]
pub struct FnOperation<F, P, T> {
    f: F,
    _marker: PhantomData<fn(P) -> T>,
}

/// Wrap an async closure as a remote operation
///
/// ```ignore
/// let op = operation_fn(|id: String| async move { client.fetch_actors(&id).await });
/// ```
pub fn operation_fn<F, Fut, P, T>(f: F) -> FnOperation<F, P, T>
where
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RemoteResult<T>> + Send + 'static,
{
    FnOperation {
        f,
        _marker: PhantomData,
    }
}

impl<F, Fut, P, T> RemoteOperation<P, T> for FnOperation<F, P, T>
where
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RemoteResult<T>> + Send + 'static,
    P: 'static,
    T: 'static,
{
    fn call(&self, params: P) -> BoxFuture<'static, RemoteResult<T>> {
        Box::pin((self.f)(params))
    }
}

//! Tokio Runtime Bridge
//!
//! Stores spawn their remote calls onto the ambient tokio runtime when one
//! exists (application `main`, `#[tokio::test]`), and fall back to a lazily
//! created global runtime when called from plain synchronous code.
//!
//! ## Pattern
//!
//! ```text
//! store.trigger(params)
//!       │
//!       ▼
//! spawn_in_tokio(async { operation.call(params).await })
//!       │
//!       ▼
//! Handle::try_current() ──or── global Runtime
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create tokio runtime"))
}

/// Handle to the runtime tasks should be spawned on
pub fn runtime_handle() -> Handle {
    Handle::try_current().unwrap_or_else(|_| get_runtime().handle().clone())
}

/// Spawn a task and keep its handle (stores abort these on teardown)
pub fn spawn_in_tokio<F>(future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime_handle().spawn(future)
}

/// Spawn a task with a name (for debugging)
pub fn spawn_named_in_tokio<F>(name: &'static str, future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    runtime_handle().spawn(async move {
        future.await;
        tracing::debug!("Tokio task completed: {}", name);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_without_ambient_runtime() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        spawn_in_tokio(async move {
            flag_clone.store(true, Ordering::SeqCst);
        });

        // Give the task time to complete
        std::thread::sleep(std::time::Duration::from_millis(100));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_spawn_on_ambient_runtime() {
        let handle = spawn_named_in_tokio("noop", async {});
        assert!(handle.await.is_ok());
    }
}

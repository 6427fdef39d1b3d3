//! Service Layer
//!
//! Everything a store needs to reach the outside world: the remote
//! operation seam, the HTTP client implementing it, the session context the
//! client authenticates with, and the runtime bridge tasks are spawned on.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ApiClient                              │
//! │  ┌──────────────┐  ┌───────────────┐  ┌─────────────────┐   │
//! │  │ HttpResource │  │    Session    │  │ classify_status │   │
//! │  │  (list GET)  │  │ (bearer token)│  │ (404 vs other)  │   │
//! │  └──────────────┘  └───────────────┘  └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ RemoteOperation
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      State Layer                             │
//! │                (RequestStore, QueryCoordinator)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod api;
mod remote;
mod runtime;
mod session;

pub use api::*;
pub use remote::*;
pub use runtime::*;
pub use session::*;

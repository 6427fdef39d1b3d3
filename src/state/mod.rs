//! State - Request-State Stores and Query Coordination
//!
//! Each feature owns one or more stores. A store tracks a single remote
//! operation; a coordinator feeds it query parameters.

mod feedback;
mod query;
mod request_state;
mod store;

pub use feedback::*;
pub use query::*;
pub use request_state::*;
pub use store::*;

//! DataHub Store Library
//!
//! Request-state stores for the DataHub market portals: per-feature
//! containers that issue a remote call, track its loading/loaded/error
//! state, and expose derived read-only views of the result.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod helpers;
pub mod services;
pub mod state;
pub mod utils;
pub mod view;

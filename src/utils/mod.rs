//! Utilities
//!
//! Configuration persistence and logging setup.

pub mod config_store;
pub mod logging;

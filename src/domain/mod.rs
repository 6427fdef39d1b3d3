//! Domain - Pure Data Structures
//!
//! Types shared by several features; feature-specific records live with
//! their feature.

pub mod config;
pub mod market_role;

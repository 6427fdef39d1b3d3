//! Application Layer
//!
//! Composition root: configuration in, wired controllers out.

pub mod application;

//! Features - Vertical Feature Slices
//!
//! Each feature contains its records (`model`) and a controller that wires
//! request-state stores to the API and derives the feature's views.

pub mod actors;
pub mod grid_areas;
pub mod list_controller;
pub mod roles;
pub mod users;

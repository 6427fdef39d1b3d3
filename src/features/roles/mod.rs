//! Roles feature

pub mod controller;
pub mod model;

pub use controller::RolesController;
pub use model::{RoleStatus, UserRole};

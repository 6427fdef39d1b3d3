//! Users feature

pub mod controller;
pub mod model;

pub use controller::UsersController;
pub use model::{UserActor, UserOverviewItem, UserStatus};

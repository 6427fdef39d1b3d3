//! Actors feature

pub mod controller;
pub mod model;

pub use controller::ActorsController;
pub use model::{Actor, ActorStatus};

//! Grid areas feature

pub mod controller;
pub mod model;

pub use controller::GridAreasController;
pub use model::{GridArea, PriceAreaCode};

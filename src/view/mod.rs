//! View Layer Projections
//!
//! Selectors and pure derived views that turn store snapshots into
//! display-ready shapes. Nothing here performs I/O.

mod dropdown;
mod selector;

pub use dropdown::*;
pub use selector::*;

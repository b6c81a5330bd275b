pub mod commands;
pub mod controller;
mod loop_worker;
pub mod state;

pub use controller::TrackingController;
pub use state::{Target, TrackingState};

mod config;
mod controller;
mod point;

pub use config::ControllerConfig;
pub use controller::{TouchController, TouchOutcome};
pub use point::{PointInfo, TouchAction};

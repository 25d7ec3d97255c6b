//! Player controller module
//!
//! Provides first-person movement with gravity, jumping, ground clamping and
//! wall collision.

mod config;
mod controller;
mod motion;

pub use config::PlayerConfig;
pub use controller::PlayerController;
pub use motion::{MotionState, VerticalState};

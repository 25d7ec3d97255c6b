//! Roam Game - Player input and movement
//!
//! Provides input capture and the first-person player controller.

pub mod input;
pub mod player;

pub use input::{InputAction, InputBindings, InputHandler, InputState};
pub use player::{MotionState, PlayerConfig, PlayerController, VerticalState};

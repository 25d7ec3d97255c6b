//! Vertical motion state

use glam::Vec3;

/// Vertical kinematic state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalState {
    /// Standing on the ground; vertical velocity is held at zero
    #[default]
    Grounded,
    /// Jumping or falling under gravity
    Airborne,
}

/// Velocity and grounded state of the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    /// Velocity in units per second. X/Z hold the last accepted horizontal
    /// velocity, Y the vertical one.
    pub velocity: Vec3,
    pub vertical: VerticalState,
}

impl MotionState {
    pub fn is_grounded(&self) -> bool {
        self.vertical == VerticalState::Grounded
    }

    /// Enter the air with the given upward speed
    pub(crate) fn launch(&mut self, speed: f32) {
        self.velocity.y = speed;
        self.vertical = VerticalState::Airborne;
    }

    /// Stop vertical motion and stand
    pub(crate) fn land(&mut self) {
        self.velocity.y = 0.0;
        self.vertical = VerticalState::Grounded;
    }
}

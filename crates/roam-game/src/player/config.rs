//! Player movement configuration

use serde::{Deserialize, Serialize};

/// Tunables for the first-person controller.
///
/// Values are taken as given: negative speeds or a positive gravity are the
/// caller's business and are not corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed in units per second
    pub move_speed: f32,
    /// Radians of rotation per unit of pointer movement
    pub mouse_sensitivity: f32,
    /// Initial upward velocity of a jump in units per second
    pub jump_speed: f32,
    /// Vertical acceleration in units per second squared (negative pulls down)
    pub gravity: f32,
    /// Radius by which wall volumes are inflated for collision
    pub collision_radius: f32,
    /// Camera height above the ground
    pub eye_height: f32,
    /// Maximum |x| and |z| of the camera position
    pub world_bound: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            mouse_sensitivity: 0.002,
            jump_speed: 10.0,
            gravity: -35.0,
            collision_radius: 1.0,
            eye_height: 2.0,
            world_bound: 100.0,
        }
    }
}

impl PlayerConfig {
    /// Floaty jumps and quick strides for open terrain
    pub fn open_field() -> Self {
        Self {
            move_speed: 16.0,
            jump_speed: 20.0,
            ..Self::default()
        }
    }

    /// Slim collision radius so door gaps narrower than two units pass
    pub fn houses() -> Self {
        Self {
            collision_radius: 0.5,
            ..Self::default()
        }
    }

    /// Short hops and a slower walk for tight corridors
    pub fn maze() -> Self {
        Self {
            move_speed: 8.0,
            jump_speed: 10.0,
            collision_radius: 1.0,
            ..Self::default()
        }
    }
}

//! Core types shared between the simulation and its consumers

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Yaw/pitch orientation of a first-person viewpoint.
///
/// Yaw rotates about world up and is unbounded. Pitch is relative to the
/// yaw-rotated frame and always stays within `[-PI/2, PI/2]`. There is no roll.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "OrientationData")]
pub struct Orientation {
    /// Rotation about world Y in radians
    pub yaw: f32,
    /// Rotation about the local X axis in radians
    pitch: f32,
}

/// Serialized form of [`Orientation`], clamped on the way in
#[derive(Deserialize)]
struct OrientationData {
    yaw: f32,
    pitch: f32,
}

impl From<OrientationData> for Orientation {
    fn from(data: OrientationData) -> Self {
        Self::new(data.yaw, data.pitch)
    }
}

impl Orientation {
    /// Lowest allowed pitch (looking straight down)
    pub const PITCH_MIN: f32 = -FRAC_PI_2;
    /// Highest allowed pitch (looking straight up)
    pub const PITCH_MAX: f32 = FRAC_PI_2;

    /// Create an orientation, clamping pitch into range
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(Self::PITCH_MIN, Self::PITCH_MAX),
        }
    }

    /// Decompose a rotation into yaw then pitch, discarding any roll
    pub fn from_rotation(rotation: Quat) -> Self {
        let (yaw, pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
        Self::new(yaw, pitch)
    }

    /// Current pitch in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set pitch, clamped into range
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(Self::PITCH_MIN, Self::PITCH_MAX);
    }

    /// Turn by the given yaw/pitch deltas (yaw first, then pitch)
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.set_pitch(self.pitch + pitch_delta);
    }

    /// Recompose into a quaternion (yaw about Y, then pitch about local X)
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Full view direction including pitch
    pub fn look_direction(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Horizontal forward direction, ignoring pitch
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal right direction (`forward x up`)
    pub fn flat_right(&self) -> Vec3 {
        self.flat_forward().cross(Vec3::Y)
    }
}

/// Position and orientation of the controlled viewpoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Orientation,
}

impl Pose {
    /// Create a pose at a position facing -Z
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Orientation::default(),
        }
    }

    /// Create a pose with position and orientation
    pub fn new(position: Vec3, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Camera-to-world matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation.rotation(), self.position)
    }

    /// World-to-camera matrix for the rendering collaborator
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.orientation.look_direction(), Vec3::Y)
    }
}

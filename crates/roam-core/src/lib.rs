//! Roam Core - Shared types and utilities
//!
//! This crate provides the foundational types used by every other crate:
//! - Mathematical primitives (re-exported from glam)
//! - Viewpoint pose and yaw/pitch orientation
//! - Frame clock with fixed timestep accumulation

pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use time::{GameTime, TimeConfig};
pub use types::{Orientation, Pose};

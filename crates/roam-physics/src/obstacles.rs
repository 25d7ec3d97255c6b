//! Axis-aligned obstacle volumes
//!
//! Walls are tested by point containment against boxes inflated by the
//! player's collision radius. This is not a swept test: a fast mover can
//! step over a wall thinner than its per-tick displacement.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from its center and half extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Grow the box by `amount` on every side
    pub fn inflated(&self, amount: f32) -> Self {
        let grow = Vec3::splat(amount);
        Self {
            min: self.min - grow,
            max: self.max + grow,
        }
    }

    /// Inclusive point containment
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Check overlap with another box
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

/// Collection of obstacle volumes the player may not enter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSet {
    volumes: Vec<Aabb>,
}

impl ObstacleSet {
    /// Create an empty set (collision checks always pass)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, volume: Aabb) {
        self.volumes.push(volume);
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Aabb> {
        self.volumes.iter()
    }

    pub fn clear(&mut self) {
        self.volumes.clear();
    }

    /// First volume that contains `point` once inflated by `radius`
    pub fn blocking(&self, point: Vec3, radius: f32) -> Option<&Aabb> {
        self.volumes
            .iter()
            .find(|volume| volume.inflated(radius).contains(point))
    }

    /// Whether a body of `radius` centered at `point` overlaps any volume
    pub fn blocks(&self, point: Vec3, radius: f32) -> bool {
        self.blocking(point, radius).is_some()
    }

    /// Bounding box of every volume, if any
    pub fn bounds(&self) -> Option<Aabb> {
        let mut volumes = self.volumes.iter();
        let first = *volumes.next()?;
        Some(volumes.fold(first, |acc, v| Aabb {
            min: acc.min.min(v.min),
            max: acc.max.max(v.max),
        }))
    }
}

impl FromIterator<Aabb> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Aabb>>(iter: I) -> Self {
        Self {
            volumes: iter.into_iter().collect(),
        }
    }
}

impl Extend<Aabb> for ObstacleSet {
    fn extend<I: IntoIterator<Item = Aabb>>(&mut self, iter: I) {
        self.volumes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Aabb;
    type IntoIter = std::slice::Iter<'a, Aabb>;

    fn into_iter(self) -> Self::IntoIter {
        self.volumes.iter()
    }
}

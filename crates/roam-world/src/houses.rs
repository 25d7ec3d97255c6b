//! Village of hollow houses
//!
//! Each house is four walls around an open interior with no roof volume. The
//! front wall (facing -Z) is split by a door gap.

use glam::Vec3;
use roam_physics::{Aabb, ObstacleSet, PhysicsWorld};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::WorldError;

/// Village layout configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HousesConfig {
    /// Ground-level center of every house
    pub centers: Vec<Vec3>,
    /// Outer size along X
    pub width: f32,
    /// Outer size along Z
    pub depth: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    /// Width of the opening in the front wall
    pub door_width: f32,
    /// Side length of the square ground the village stands on
    pub ground_size: f32,
    /// Ground-level spawn point, outside every house
    pub spawn: Vec3,
}

impl Default for HousesConfig {
    fn default() -> Self {
        Self {
            centers: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(40.0, 0.0, 30.0),
                Vec3::new(-45.0, 0.0, -20.0),
                Vec3::new(25.0, 0.0, -40.0),
                Vec3::new(-30.0, 0.0, 35.0),
                Vec3::new(60.0, 0.0, -10.0),
                Vec3::new(-60.0, 0.0, 5.0),
            ],
            width: 20.0,
            depth: 15.0,
            wall_height: 3.0,
            wall_thickness: 1.0,
            door_width: 2.0,
            ground_size: 200.0,
            spawn: Vec3::new(-30.0, 0.0, 0.0),
        }
    }
}

/// Validated village layout
#[derive(Clone, Debug)]
pub struct Houses {
    pub config: HousesConfig,
}

impl Houses {
    pub fn new(config: HousesConfig) -> Result<Self, WorldError> {
        let invalid = config.width <= 0.0
            || config.depth <= 0.0
            || config.wall_height <= 0.0
            || config.wall_thickness <= 0.0
            || config.door_width <= 0.0
            || config.door_width >= config.width
            || config.ground_size <= 0.0;
        if invalid {
            return Err(WorldError::InvalidHouse {
                width: config.width,
                depth: config.depth,
                door_width: config.door_width,
            });
        }
        Ok(Self { config })
    }

    pub fn len(&self) -> usize {
        self.config.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.centers.is_empty()
    }

    /// The five wall slabs of the house at `center`
    fn house_walls(&self, center: Vec3, floor_height: f32) -> [Aabb; 5] {
        let HousesConfig {
            width,
            depth,
            wall_height,
            wall_thickness,
            door_width,
            ..
        } = self.config;
        let half_w = width / 2.0;
        let half_d = depth / 2.0;
        let half_t = wall_thickness / 2.0;
        let half_h = wall_height / 2.0;
        let y = floor_height + half_h;

        // Each front piece spans from the corner to the door jamb
        let piece = (half_w - door_width / 2.0) / 2.0;
        let piece_x = half_w - piece;

        let slab = |offset: Vec3, half: Vec3| {
            Aabb::from_center_half_extents(Vec3::new(center.x, y, center.z) + offset, half)
        };
        [
            slab(Vec3::new(-piece_x, 0.0, -half_d), Vec3::new(piece, half_h, half_t)),
            slab(Vec3::new(piece_x, 0.0, -half_d), Vec3::new(piece, half_h, half_t)),
            slab(Vec3::new(0.0, 0.0, half_d), Vec3::new(half_w, half_h, half_t)),
            slab(Vec3::new(-half_w, 0.0, 0.0), Vec3::new(half_t, half_h, half_d)),
            slab(Vec3::new(half_w, 0.0, 0.0), Vec3::new(half_t, half_h, half_d)),
        ]
    }

    /// Wall volumes of every house resting on a floor at `floor_height`
    pub fn walls(&self, floor_height: f32) -> ObstacleSet {
        let walls: ObstacleSet = self
            .config
            .centers
            .iter()
            .flat_map(|center| self.house_walls(*center, floor_height))
            .collect();
        debug!(houses = self.len(), walls = walls.len(), "Laid out houses");
        walls
    }

    /// Register every wall as a static box collider
    pub fn add_to_physics(&self, physics: &mut PhysicsWorld, floor_height: f32) {
        for wall in self.walls(floor_height).iter() {
            physics.create_static_box(wall.half_extents(), wall.center());
        }
    }

    /// Ground-level point in the middle of a house's door gap
    pub fn door(&self, index: usize) -> Option<Vec3> {
        let center = self.config.centers.get(index)?;
        Some(*center - Vec3::Z * (self.config.depth / 2.0))
    }
}

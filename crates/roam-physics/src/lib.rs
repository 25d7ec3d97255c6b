//! Roam Physics - Terrain queries and collision volumes
//!
//! Provides the two read-only interfaces the player controller consumes
//! ([`TerrainQuery`] and [`ObstacleSet`]) plus a rapier3d-backed world whose
//! ground is sampled by casting rays straight down.

mod obstacles;
mod terrain;

pub use obstacles::{Aabb, ObstacleSet};
pub use terrain::{FlatGround, TerrainQuery};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use tracing::debug;

/// Ground ray configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Height the downward ground ray starts from
    pub ray_origin_height: f32,
    /// Maximum length of the downward ground ray
    pub ray_length: f32,
    /// Height reported when the ray hits no ground
    pub fallback_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            ray_origin_height: 500.0,
            ray_length: 1000.0,
            fallback_height: 0.0,
        }
    }
}

/// Static collision world: ground surfaces plus solid boxes
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage (unused by static colliders, required by queries)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    /// Colliders that count as walkable ground
    ground_colliders: Vec<ColliderHandle>,
    /// Island manager (needed for collider removal)
    island_manager: IslandManager,
    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            ground_colliders: Vec::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Rebuild the query acceleration structure after collider changes
    fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (walls, props, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.refresh_queries();
        handle
    }

    /// Add a static collider that ground rays may land on
    pub fn add_ground_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.add_static_collider(collider);
        self.ground_colliders.push(handle);
        handle
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
        self.ground_colliders.retain(|h| *h != handle);
        self.refresh_queries();
    }

    /// Whether the collider is registered as ground
    pub fn is_ground(&self, handle: ColliderHandle) -> bool {
        self.ground_colliders.contains(&handle)
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
        )
    }

    /// Height of the highest ground surface under `(x, z)`, if any
    pub fn ground_height(&self, x: f32, z: f32) -> Option<f32> {
        let top = self.config.ray_origin_height;
        let is_ground = |handle: ColliderHandle, _: &Collider| self.is_ground(handle);
        let filter = QueryFilter::default().predicate(&is_ground);

        self.raycast(
            Vec3::new(x, top, z),
            Vec3::NEG_Y,
            self.config.ray_length,
            filter,
        )
        .map(|(_, toi)| top - toi)
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        debug!(y, "Created ground plane");
        self.add_ground_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }

    /// World-space bounds of every non-ground box collider
    pub fn box_obstacles(&self) -> ObstacleSet {
        self.collider_set
            .iter()
            .filter(|(handle, collider)| {
                !self.is_ground(*handle) && collider.shape().as_cuboid().is_some()
            })
            .map(|(_, collider)| {
                let aabb = collider.compute_aabb();
                Aabb::new(
                    Vec3::new(aabb.mins.x, aabb.mins.y, aabb.mins.z),
                    Vec3::new(aabb.maxs.x, aabb.maxs.y, aabb.maxs.z),
                )
            })
            .collect()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainQuery for PhysicsWorld {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.ground_height(x, z)
            .unwrap_or(self.config.fallback_height)
    }
}

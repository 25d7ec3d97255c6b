//! Level assembly
//!
//! Builds the two collaborators the player controller consumes (ground height
//! and wall volumes) plus a spawn pose, for each kind of level.

use std::f32::consts::{FRAC_PI_2, PI};
use std::str::FromStr;

use glam::Vec3;
use roam_core::{Orientation, Pose};
use roam_physics::{FlatGround, ObstacleSet, PhysicsWorld, TerrainQuery};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Houses, HousesConfig, Maze, MazeConfig, Side, Terrain, TerrainConfig, WorldError};

/// Which kind of level to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelKind {
    /// Flat ground plane, no walls
    Flat,
    /// Rolling noise terrain, no walls
    #[default]
    OpenField,
    /// Walled maze on a ground plane sampled by ray casts
    Maze,
    /// Hollow houses with door gaps on a ground plane sampled by ray casts
    Houses,
}

impl FromStr for LevelKind {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "open-field" => Ok(Self::OpenField),
            "maze" => Ok(Self::Maze),
            "houses" => Ok(Self::Houses),
            other => Err(WorldError::UnknownLevel(other.to_string())),
        }
    }
}

/// Level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub kind: LevelKind,
    pub terrain: TerrainConfig,
    pub maze: MazeConfig,
    pub houses: HousesConfig,
}

/// Built level content
pub struct Level {
    pub kind: LevelKind,
    /// Ground height source
    pub terrain: Box<dyn TerrainQuery>,
    /// Solid wall volumes
    pub obstacles: ObstacleSet,
    /// Where the player starts (ground level, eye height not applied)
    pub spawn: Pose,
    /// Half extent of the playable area
    pub world_bound: f32,
}

impl Level {
    /// Build a level from configuration
    pub fn build(config: &LevelConfig) -> Result<Self, WorldError> {
        let level = match config.kind {
            LevelKind::Flat => Self::flat(config.terrain.size / 2.0),
            LevelKind::OpenField => Self::open_field(config.terrain.clone())?,
            LevelKind::Maze => Self::maze(config.maze.clone())?,
            LevelKind::Houses => Self::houses(config.houses.clone())?,
        };

        info!(
            kind = ?level.kind,
            obstacles = level.obstacles.len(),
            world_bound = level.world_bound,
            "Level built"
        );
        Ok(level)
    }

    /// Flat ground at height zero
    pub fn flat(world_bound: f32) -> Self {
        Self {
            kind: LevelKind::Flat,
            terrain: Box::new(FlatGround::default()),
            obstacles: ObstacleSet::new(),
            spawn: Pose::default(),
            world_bound,
        }
    }

    /// Noise terrain spanning the configured size
    pub fn open_field(config: TerrainConfig) -> Result<Self, WorldError> {
        let terrain = Terrain::generate(config)?;
        let world_bound = terrain.config.size / 2.0;
        let spawn = Pose::from_position(Vec3::new(0.0, terrain.height_at(0.0, 0.0), 0.0));

        Ok(Self {
            kind: LevelKind::OpenField,
            terrain: Box::new(terrain),
            obstacles: ObstacleSet::new(),
            spawn,
            world_bound,
        })
    }

    /// Maze on a physics ground plane; walls come from the box colliders
    pub fn maze(config: MazeConfig) -> Result<Self, WorldError> {
        let maze = Maze::generate(config)?;

        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        maze.add_to_physics(&mut physics, 0.0);
        let obstacles = physics.box_obstacles();

        let (half_x, half_z) = maze.half_extents();
        // Start in the first cell facing its opening
        let yaw = [
            (Side::East, -FRAC_PI_2),
            (Side::South, PI),
            (Side::West, FRAC_PI_2),
            (Side::North, 0.0),
        ]
        .into_iter()
        .find(|(side, _)| !maze.has_wall(0, 0, *side))
        .map_or(0.0, |(_, yaw)| yaw);
        let spawn = Pose::new(maze.cell_center(0, 0), Orientation::new(yaw, 0.0));

        Ok(Self {
            kind: LevelKind::Maze,
            terrain: Box::new(physics),
            obstacles,
            spawn,
            world_bound: half_x.max(half_z),
        })
    }

    /// Village on a physics ground plane, spawning outside the houses
    /// facing +X
    pub fn houses(config: HousesConfig) -> Result<Self, WorldError> {
        let houses = Houses::new(config)?;

        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        houses.add_to_physics(&mut physics, 0.0);
        let obstacles = physics.box_obstacles();

        let spawn = houses.config.spawn;
        let spawn = Pose::new(
            Vec3::new(spawn.x, physics.height_at(spawn.x, spawn.z), spawn.z),
            Orientation::new(-FRAC_PI_2, 0.0),
        );

        Ok(Self {
            kind: LevelKind::Houses,
            terrain: Box::new(physics),
            obstacles,
            spawn,
            world_bound: houses.config.ground_size / 2.0,
        })
    }
}

//! Grid maze layouts
//!
//! A perfect maze (exactly one path between any two cells) carved with a
//! randomized depth-first search, exported as axis-aligned wall volumes.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use roam_physics::{Aabb, ObstacleSet, PhysicsWorld};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::WorldError;

/// Maze layout configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Number of cells along X
    pub columns: u32,
    /// Number of cells along Z
    pub rows: u32,
    /// Width of a square cell in meters
    pub cell_size: f32,
    /// Height of the walls
    pub wall_height: f32,
    /// Thickness of the walls
    pub wall_thickness: f32,
    /// Random seed for carving
    pub seed: u64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 12,
            cell_size: 8.0,
            wall_height: 5.0,
            wall_thickness: 0.5,
            seed: 7,
        }
    }
}

/// Side of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Toward -Z
    North,
    /// Toward +Z
    South,
    /// Toward +X
    East,
    /// Toward -X
    West,
}

/// Carved maze with wall flags for every cell edge
#[derive(Clone, Debug)]
pub struct Maze {
    pub config: MazeConfig,
    /// Edges running along X, `(rows + 1) * columns`, row-major
    horizontal: Vec<bool>,
    /// Edges running along Z, `rows * (columns + 1)`, row-major
    vertical: Vec<bool>,
}

impl Maze {
    /// Carve a new maze from configuration
    pub fn generate(config: MazeConfig) -> Result<Self, WorldError> {
        if config.columns == 0 || config.rows == 0 {
            return Err(WorldError::EmptyMaze {
                columns: config.columns,
                rows: config.rows,
            });
        }
        if config.wall_thickness <= 0.0 || config.wall_thickness >= config.cell_size {
            return Err(WorldError::InvalidMazeWalls {
                cell_size: config.cell_size,
                wall_thickness: config.wall_thickness,
            });
        }

        let columns = config.columns as usize;
        let rows = config.rows as usize;
        let mut maze = Self {
            horizontal: vec![true; (rows + 1) * columns],
            vertical: vec![true; rows * (columns + 1)],
            config,
        };

        let mut rng = StdRng::seed_from_u64(maze.config.seed);
        let mut visited = vec![false; columns * rows];
        let mut stack = vec![(0usize, 0usize)];
        visited[0] = true;

        while let Some(&(col, row)) = stack.last() {
            let mut options: Vec<(Side, usize, usize)> = Vec::with_capacity(4);
            if row > 0 && !visited[(row - 1) * columns + col] {
                options.push((Side::North, col, row - 1));
            }
            if row + 1 < rows && !visited[(row + 1) * columns + col] {
                options.push((Side::South, col, row + 1));
            }
            if col + 1 < columns && !visited[row * columns + col + 1] {
                options.push((Side::East, col + 1, row));
            }
            if col > 0 && !visited[row * columns + col - 1] {
                options.push((Side::West, col - 1, row));
            }

            match options.choose(&mut rng) {
                Some(&(side, next_col, next_row)) => {
                    maze.open(col, row, side);
                    visited[next_row * columns + next_col] = true;
                    stack.push((next_col, next_row));
                }
                None => {
                    stack.pop();
                }
            }
        }

        debug!(
            columns,
            rows,
            walls = maze.wall_count(),
            "Carved maze"
        );
        Ok(maze)
    }

    fn edge_index(&self, col: usize, row: usize, side: Side) -> (bool, usize) {
        let columns = self.config.columns as usize;
        match side {
            Side::North => (true, row * columns + col),
            Side::South => (true, (row + 1) * columns + col),
            Side::West => (false, row * (columns + 1) + col),
            Side::East => (false, row * (columns + 1) + col + 1),
        }
    }

    fn open(&mut self, col: usize, row: usize, side: Side) {
        match self.edge_index(col, row, side) {
            (true, index) => self.horizontal[index] = false,
            (false, index) => self.vertical[index] = false,
        }
    }

    /// Whether a wall stands on the given side of a cell
    pub fn has_wall(&self, col: u32, row: u32, side: Side) -> bool {
        if col >= self.config.columns || row >= self.config.rows {
            return true;
        }
        match self.edge_index(col as usize, row as usize, side) {
            (true, index) => self.horizontal[index],
            (false, index) => self.vertical[index],
        }
    }

    /// Number of standing wall segments
    pub fn wall_count(&self) -> usize {
        self.horizontal.iter().chain(&self.vertical).filter(|w| **w).count()
    }

    /// Half the maze extent along X and Z
    pub fn half_extents(&self) -> (f32, f32) {
        (
            self.config.columns as f32 * self.config.cell_size / 2.0,
            self.config.rows as f32 * self.config.cell_size / 2.0,
        )
    }

    /// Ground-level center of a cell; the maze is centered on the origin
    pub fn cell_center(&self, col: u32, row: u32) -> Vec3 {
        let (half_x, half_z) = self.half_extents();
        let size = self.config.cell_size;
        Vec3::new(
            -half_x + (col as f32 + 0.5) * size,
            0.0,
            -half_z + (row as f32 + 0.5) * size,
        )
    }

    /// Wall volumes resting on a floor at `floor_height`
    pub fn walls(&self, floor_height: f32) -> ObstacleSet {
        let columns = self.config.columns as usize;
        let rows = self.config.rows as usize;
        let (half_x, half_z) = self.half_extents();
        let size = self.config.cell_size;
        let half_thickness = self.config.wall_thickness / 2.0;
        let bottom = floor_height;
        let top = floor_height + self.config.wall_height;

        let mut walls = ObstacleSet::new();
        for row in 0..=rows {
            for col in 0..columns {
                if !self.horizontal[row * columns + col] {
                    continue;
                }
                let z = -half_z + row as f32 * size;
                let x0 = -half_x + col as f32 * size;
                walls.push(Aabb::new(
                    Vec3::new(x0 - half_thickness, bottom, z - half_thickness),
                    Vec3::new(x0 + size + half_thickness, top, z + half_thickness),
                ));
            }
        }
        for row in 0..rows {
            for col in 0..=columns {
                if !self.vertical[row * (columns + 1) + col] {
                    continue;
                }
                let x = -half_x + col as f32 * size;
                let z0 = -half_z + row as f32 * size;
                walls.push(Aabb::new(
                    Vec3::new(x - half_thickness, bottom, z0 - half_thickness),
                    Vec3::new(x + half_thickness, top, z0 + size + half_thickness),
                ));
            }
        }
        walls
    }

    /// Register every wall as a static box collider
    pub fn add_to_physics(&self, physics: &mut PhysicsWorld, floor_height: f32) {
        for wall in self.walls(floor_height).iter() {
            physics.create_static_box(wall.half_extents(), wall.center());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn config() -> MazeConfig {
        MazeConfig {
            columns: 6,
            rows: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_every_cell_reachable() {
        let maze = Maze::generate(config()).unwrap();
        let (columns, rows) = (6u32, 4u32);

        let mut seen = vec![false; (columns * rows) as usize];
        let mut queue = VecDeque::from([(0u32, 0u32)]);
        seen[0] = true;
        while let Some((col, row)) = queue.pop_front() {
            let neighbours = [
                (Side::North, col as i64, row as i64 - 1),
                (Side::South, col as i64, row as i64 + 1),
                (Side::East, col as i64 + 1, row as i64),
                (Side::West, col as i64 - 1, row as i64),
            ];
            for (side, c, r) in neighbours {
                if maze.has_wall(col, row, side) {
                    continue;
                }
                let index = (r as u32 * columns + c as u32) as usize;
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back((c as u32, r as u32));
                }
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_perfect_maze_wall_count() {
        let maze = Maze::generate(config()).unwrap();
        // All edges minus one opening per spanning-tree link
        let edges = 5 * 6 + 4 * 7;
        let cells = 6 * 4;
        assert_eq!(maze.wall_count(), edges - (cells - 1));
    }

    #[test]
    fn test_border_is_closed() {
        let maze = Maze::generate(config()).unwrap();
        for col in 0..6 {
            assert!(maze.has_wall(col, 0, Side::North));
            assert!(maze.has_wall(col, 3, Side::South));
        }
        for row in 0..4 {
            assert!(maze.has_wall(0, row, Side::West));
            assert!(maze.has_wall(5, row, Side::East));
        }
    }

    #[test]
    fn test_cell_centers_are_clear() {
        let maze = Maze::generate(config()).unwrap();
        let walls = maze.walls(0.0);
        assert_eq!(walls.len(), maze.wall_count());

        let eye = Vec3::new(0.0, 2.0, 0.0);
        for row in 0..4 {
            for col in 0..6 {
                assert!(!walls.blocks(maze.cell_center(col, row) + eye, 1.0));
            }
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = Maze::generate(config()).unwrap();
        let b = Maze::generate(config()).unwrap();
        assert_eq!(a.walls(0.0), b.walls(0.0));
    }

    #[test]
    fn test_physics_walls_match() {
        let maze = Maze::generate(config()).unwrap();
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        maze.add_to_physics(&mut physics, 0.0);

        assert_eq!(physics.box_obstacles().len(), maze.wall_count());
    }

    #[test]
    fn test_degenerate_configs_rejected() {
        let empty = Maze::generate(MazeConfig {
            columns: 0,
            ..Default::default()
        });
        assert!(matches!(empty, Err(WorldError::EmptyMaze { .. })));

        let thick = Maze::generate(MazeConfig {
            wall_thickness: 10.0,
            ..Default::default()
        });
        assert!(matches!(thick, Err(WorldError::InvalidMazeWalls { .. })));
    }
}

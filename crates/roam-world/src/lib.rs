//! Roam World - Level content
//!
//! Provides noise terrain, maze and village layouts and the level assembly
//! that turns them into ground queries and wall volumes for the player
//! controller.

mod error;
pub mod houses;
pub mod level;
pub mod maze;
pub mod terrain;

pub use error::WorldError;
pub use houses::{Houses, HousesConfig};
pub use level::{Level, LevelConfig, LevelKind};
pub use maze::{Maze, MazeConfig, Side};
pub use terrain::{Terrain, TerrainConfig};

//! Terrain generation using Perlin noise

use noise::{NoiseFn, Perlin};
use roam_physics::TerrainQuery;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::WorldError;

/// Terrain generation configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Total size of the terrain in meters
    pub size: f32,
    /// Number of subdivisions (vertices = subdivisions + 1)
    pub subdivisions: u32,
    /// Maximum height of terrain features
    pub max_height: f32,
    /// Noise scale (smaller = larger features)
    pub noise_scale: f32,
    /// Random seed for generation
    pub seed: u32,
    /// Number of octaves for fractal noise
    pub octaves: u32,
    /// Persistence for fractal noise (amplitude decrease per octave)
    pub persistence: f32,
    /// Lacunarity for fractal noise (frequency increase per octave)
    pub lacunarity: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            subdivisions: 128,
            max_height: 4.0,
            noise_scale: 0.02,
            seed: 42,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Sampled height field
#[derive(Clone, Debug)]
pub struct Terrain {
    /// Configuration used to generate this terrain
    pub config: TerrainConfig,
    /// Height values for each vertex (row-major, size = (subdivisions+1)^2)
    pub heights: Vec<f32>,
    /// Minimum height in the terrain
    pub min_height: f32,
    /// Maximum height in the terrain
    pub max_height: f32,
}

impl Terrain {
    /// Generate terrain from configuration
    pub fn generate(config: TerrainConfig) -> Result<Self, WorldError> {
        if config.subdivisions == 0 || config.size <= 0.0 {
            return Err(WorldError::InvalidTerrain {
                subdivisions: config.subdivisions,
                size: config.size,
            });
        }

        let perlin = Perlin::new(config.seed);
        let vertex_count = config.subdivisions + 1;
        let total_vertices = (vertex_count * vertex_count) as usize;

        let mut heights = Vec::with_capacity(total_vertices);
        let mut min_height = f32::MAX;
        let mut max_height = f32::MIN;

        let half_size = config.size / 2.0;
        let step = config.size / config.subdivisions as f32;

        for z in 0..vertex_count {
            for x in 0..vertex_count {
                let world_x = -half_size + x as f32 * step;
                let world_z = -half_size + z as f32 * step;

                let height = fractal_noise(
                    &perlin,
                    (world_x * config.noise_scale) as f64,
                    (world_z * config.noise_scale) as f64,
                    config.octaves,
                    config.persistence,
                    config.lacunarity,
                ) * config.max_height;

                min_height = min_height.min(height);
                max_height = max_height.max(height);
                heights.push(height);
            }
        }

        debug!(
            vertices = heights.len(),
            min_height, max_height, "Generated terrain"
        );

        Ok(Self {
            config,
            heights,
            min_height,
            max_height,
        })
    }

    /// Get the height at world coordinates (bilinear interpolation).
    ///
    /// Coordinates outside the terrain are clamped to its edge.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let subdivisions = self.config.subdivisions;
        let half_size = self.config.size / 2.0;
        let step = self.config.size / subdivisions as f32;
        let vertex_count = subdivisions + 1;

        let grid_x = ((x + half_size) / step).clamp(0.0, subdivisions as f32);
        let grid_z = ((z + half_size) / step).clamp(0.0, subdivisions as f32);
        if !grid_x.is_finite() || !grid_z.is_finite() {
            return self.min_height;
        }

        let x0 = (grid_x.floor() as u32).min(subdivisions - 1);
        let z0 = (grid_z.floor() as u32).min(subdivisions - 1);
        let x1 = x0 + 1;
        let z1 = z0 + 1;

        let fx = grid_x - x0 as f32;
        let fz = grid_z - z0 as f32;

        let h00 = self.heights[(z0 * vertex_count + x0) as usize];
        let h10 = self.heights[(z0 * vertex_count + x1) as usize];
        let h01 = self.heights[(z1 * vertex_count + x0) as usize];
        let h11 = self.heights[(z1 * vertex_count + x1) as usize];

        let h0 = h00 + (h10 - h00) * fx;
        let h1 = h01 + (h11 - h01) * fx;
        h0 + (h1 - h0) * fz
    }

    /// Check if a point is within the terrain bounds
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let half_size = self.config.size / 2.0;
        x >= -half_size && x <= half_size && z >= -half_size && z <= half_size
    }
}

impl TerrainQuery for Terrain {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        Terrain::height_at(self, x, z)
    }
}

/// Generate fractal (multi-octave) Perlin noise in the 0..1 range
fn fractal_noise(
    perlin: &Perlin,
    x: f64,
    z: f64,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = 1.0f32;
    let mut max_value = 0.0f32;

    for _ in 0..octaves.max(1) {
        let value = perlin.get([x * frequency as f64, z * frequency as f64]) as f32;
        total += value * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value <= 0.0 {
        return 0.5;
    }
    (total / max_value + 1.0) / 2.0
}

//! Ground elevation queries

use std::sync::Arc;

/// Source of ground elevation under a horizontal position.
///
/// Implementations must be cheap and never fail: positions outside the known
/// ground return a fallback height instead.
pub trait TerrainQuery {
    /// Ground height at world coordinates `(x, z)`
    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// Infinite flat ground at a fixed height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatGround {
    pub height: f32,
}

impl FlatGround {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl TerrainQuery for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for Box<T> {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        (**self).height_at(x, z)
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for Arc<T> {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        (**self).height_at(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_ground_everywhere() {
        let ground = FlatGround::new(3.5);
        assert_eq!(ground.height_at(0.0, 0.0), 3.5);
        assert_eq!(ground.height_at(-1.0e9, 1.0e9), 3.5);
    }

    #[test]
    fn test_shared_terrain() {
        let shared: Arc<dyn TerrainQuery> = Arc::new(FlatGround::new(1.0));
        assert_eq!(shared.height_at(4.0, 2.0), 1.0);
    }
}

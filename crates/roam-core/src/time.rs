//! Frame clock for the simulation loop
//!
//! Turns raw per-frame deltas into scaled, clamped game time and hands out
//! fixed simulation steps.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for the player simulation (in seconds)
    pub fixed_timestep: f32,
    /// Longest frame delta accepted before clamping
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Fixed-step clock fed with frame deltas
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    pub config: TimeConfig,
    /// Frames seen so far
    pub frame_count: u64,
    /// Scaled time not yet consumed by fixed steps
    accumulator: f32,
}

impl GameTime {
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Record one frame and return its scaled delta.
    ///
    /// The raw delta is clamped to `[0, max_delta_time]` before scaling, so a
    /// clock that goes backwards contributes nothing.
    pub fn update(&mut self, raw_delta: f32) -> f32 {
        let clamped = raw_delta.max(0.0).min(self.config.max_delta_time);
        let delta = clamped * self.config.time_scale.max(0.0);
        self.frame_count += 1;
        self.accumulator += delta;
        delta
    }

    /// Drain the accumulator into whole fixed steps
    pub fn fixed_steps(&mut self) -> u32 {
        let step = self.config.fixed_timestep;
        if step <= 0.0 {
            return 0;
        }
        let mut steps = 0;
        while self.accumulator >= step {
            self.accumulator -= step;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_counts_frames() {
        let mut time = GameTime::default();
        assert!((time.update(0.016) - 0.016).abs() < 1e-6);
        assert_eq!(time.frame_count, 1);
    }

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.1,
            ..Default::default()
        });

        time.update(0.05);
        assert_eq!(time.fixed_steps(), 0);

        time.update(0.2);
        assert_eq!(time.fixed_steps(), 2);
        assert_eq!(time.fixed_steps(), 0);
    }

    #[test]
    fn test_delta_clamped() {
        let mut time = GameTime::default();
        assert_eq!(time.update(10.0), time.config.max_delta_time);
        assert_eq!(time.update(-1.0), 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut time = GameTime::new(TimeConfig {
            time_scale: 2.0,
            fixed_timestep: 0.1,
            ..Default::default()
        });
        assert!((time.update(0.1) - 0.2).abs() < 1e-6);
        assert_eq!(time.fixed_steps(), 2);
    }

    #[test]
    fn test_zero_timestep_yields_no_steps() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.0,
            ..Default::default()
        });
        time.update(0.1);
        assert_eq!(time.fixed_steps(), 0);
    }
}

//! Headless play session
//!
//! Replays an input script against a player controller on a fixed timestep.

use glam::Vec3;
use roam_core::{GameTime, Pose};
use roam_game::{PlayerConfig, PlayerController};
use roam_world::Level;
use tracing::{debug, info};

use crate::script::{InputScript, ScriptEvent};
use crate::settings::GameSettings;

/// Result of a finished session
#[derive(Debug, Clone, Copy)]
pub struct SessionSummary {
    pub final_pose: Pose,
    /// Simulation ticks run
    pub ticks: u64,
    /// Horizontal distance covered by the camera
    pub distance: f32,
    pub grounded: bool,
}

pub struct Session {
    time: GameTime,
    player: PlayerController,
    script: InputScript,
    /// Index of the next script event to deliver
    cursor: usize,
    /// Simulated seconds elapsed
    sim_time: f32,
    /// Playable half extent of the level, kept across config changes
    world_bound: f32,
}

impl Session {
    pub fn new(settings: &GameSettings, level: Level, script: InputScript) -> Self {
        let config = PlayerConfig {
            world_bound: level.world_bound,
            ..settings.player_config()
        };

        let eye = level.spawn.position + Vec3::Y * config.eye_height;
        let mut player = PlayerController::new(Pose::new(eye, level.spawn.orientation), config);
        player.input_mut().invert_y = settings.controls.invert_y;
        player.set_terrain_source(level.terrain);
        player.set_obstacles(level.obstacles);

        info!(
            kind = ?level.kind,
            spawn = ?eye,
            duration = script.duration,
            events = script.events.len(),
            "Session ready"
        );

        Self {
            time: GameTime::new(settings.time.clone()),
            player,
            script,
            cursor: 0,
            sim_time: 0.0,
            world_bound: level.world_bound,
        }
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    /// Run the script to completion
    pub fn run(&mut self) -> SessionSummary {
        let frame_time = self.script.frame_time.max(f32::EPSILON);
        let frames = (self.script.duration.max(0.0) / frame_time).ceil() as u64;
        let step = self.time.config.fixed_timestep;

        let mut ticks = 0;
        let mut distance = 0.0;
        let mut last = self.player.pose().position;

        for _ in 0..frames {
            self.time.update(frame_time);

            for _ in 0..self.time.fixed_steps() {
                self.deliver_due_events();
                self.player.tick(step);
                self.sim_time += step;
                ticks += 1;

                let position = self.player.pose().position;
                distance += (position - last).with_y(0.0).length();
                last = position;
            }

            let pose = self.player.pose();
            debug!(
                frame = self.time.frame_count,
                position = ?pose.position,
                yaw = pose.orientation.yaw,
                pitch = pose.orientation.pitch(),
                grounded = self.player.is_grounded(),
                "Frame"
            );
        }

        SessionSummary {
            final_pose: self.player.pose(),
            ticks,
            distance,
            grounded: self.player.is_grounded(),
        }
    }

    /// Hand every event scheduled up to now to the controller
    fn deliver_due_events(&mut self) {
        while let Some(timed) = self.script.events.get(self.cursor) {
            if timed.at > self.sim_time {
                break;
            }
            let event = timed.event.clone();
            self.cursor += 1;
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ScriptEvent) {
        debug!(at = self.sim_time, ?event, "Input event");
        let input = self.player.input_mut();
        match event {
            ScriptEvent::KeyDown { key } => {
                input.handle_key(key, true);
            }
            ScriptEvent::KeyUp { key } => {
                input.handle_key(key, false);
            }
            ScriptEvent::PointerMotion { dx, dy } => input.handle_pointer_motion((dx, dy)),
            ScriptEvent::Click => input.handle_click(),
            ScriptEvent::PointerLock { locked } => input.handle_pointer_lock_change(locked),
            ScriptEvent::FocusLost => input.handle_focus_lost(),
            ScriptEvent::SetConfig { config } => {
                self.player.update_config(PlayerConfig {
                    world_bound: self.world_bound,
                    ..config
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use roam_core::TimeConfig;
    use roam_world::{LevelConfig, LevelKind};
    use winit::keyboard::KeyCode;

    use super::*;
    use crate::script::TimedEvent;

    const EPSILON: f32 = 1e-3;

    fn flat_settings() -> GameSettings {
        GameSettings {
            world: LevelConfig {
                kind: LevelKind::Flat,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn script(duration: f32, events: Vec<(f32, ScriptEvent)>) -> InputScript {
        InputScript {
            duration,
            frame_time: 1.0 / 60.0,
            events: events
                .into_iter()
                .map(|(at, event)| TimedEvent { at, event })
                .collect(),
        }
    }

    #[test]
    fn test_idle_session_stays_put() {
        let settings = flat_settings();
        let level = Level::build(&settings.world).unwrap();
        let mut session = Session::new(&settings, level, script(1.0, Vec::new()));

        let summary = session.run();
        assert_eq!(summary.ticks, 60);
        assert!(summary.grounded);
        assert!(summary.distance < EPSILON);
        assert!((summary.final_pose.position.y - settings.player.eye_height).abs() < EPSILON);
    }

    #[test]
    fn test_walk_forward() {
        let settings = flat_settings();
        let level = Level::build(&settings.world).unwrap();
        let events = vec![
            (0.0, ScriptEvent::KeyDown { key: KeyCode::KeyW }),
            (0.5, ScriptEvent::KeyUp { key: KeyCode::KeyW }),
        ];
        let mut session = Session::new(&settings, level, script(1.0, events));

        let summary = session.run();
        let expected = settings.player.move_speed * 0.5;
        assert!((summary.distance - expected).abs() < 0.25);
        assert!(summary.final_pose.position.z < 0.0);
        assert!(summary.final_pose.position.x.abs() < EPSILON);
    }

    #[test]
    fn test_pointer_needs_capture() {
        let settings = flat_settings();
        let level = Level::build(&settings.world).unwrap();
        let events = vec![
            (0.0, ScriptEvent::PointerMotion { dx: 100.0, dy: 0.0 }),
            (0.1, ScriptEvent::Click),
            (0.2, ScriptEvent::PointerMotion { dx: 100.0, dy: 0.0 }),
        ];
        let mut session = Session::new(&settings, level, script(0.5, events));

        let summary = session.run();
        let expected = -100.0 * settings.controls.mouse_sensitivity;
        assert!((summary.final_pose.orientation.yaw - expected).abs() < EPSILON);
    }

    #[test]
    fn test_set_config_keeps_level_bound() {
        let settings = flat_settings();
        let level = Level::build(&settings.world).unwrap();
        let bound = level.world_bound;
        let config = PlayerConfig {
            move_speed: 2.0,
            world_bound: 5.0,
            ..Default::default()
        };
        let events = vec![(0.0, ScriptEvent::SetConfig { config })];
        let mut session = Session::new(&settings, level, script(0.1, events));

        session.run();
        assert_eq!(session.player().config().move_speed, 2.0);
        assert_eq!(session.player().config().world_bound, bound);
    }

    #[test]
    fn test_fixed_steps_follow_time_config() {
        let settings = GameSettings {
            time: TimeConfig {
                fixed_timestep: 1.0 / 30.0,
                ..Default::default()
            },
            ..flat_settings()
        };
        let level = Level::build(&settings.world).unwrap();
        let mut session = Session::new(&settings, level, script(1.0, Vec::new()));

        let summary = session.run();
        assert!((29..=30).contains(&summary.ticks));
    }

    #[test]
    fn test_maze_demo_stays_out_of_walls() {
        let settings = GameSettings {
            world: LevelConfig {
                kind: LevelKind::Maze,
                ..Default::default()
            },
            ..Default::default()
        };
        let level = Level::build(&settings.world).unwrap();
        let mut session = Session::new(&settings, level, InputScript::demo());

        let summary = session.run();
        let radius = session.player().config().collision_radius;
        let position = summary.final_pose.position;
        assert!(!session.player().obstacles().blocks(position, radius));
        assert!(position.x.abs() <= session.player().config().world_bound);
    }
}

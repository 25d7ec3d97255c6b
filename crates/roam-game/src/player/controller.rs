//! First-person player controller with gravity and wall collision

use glam::{Vec2, Vec3};
use roam_core::Pose;
use roam_physics::{ObstacleSet, TerrainQuery};
use tracing::{debug, trace};

use crate::input::{InputAction, InputHandler};

use super::{MotionState, PlayerConfig, VerticalState};

/// Player controller turning sampled input into a validated camera pose.
///
/// Input events only touch the [`InputHandler`]; the pose and motion state
/// change exclusively inside [`PlayerController::tick`].
pub struct PlayerController {
    /// Movement configuration
    config: PlayerConfig,
    /// Input capture
    input: InputHandler,
    /// Camera pose (position is the eye)
    pose: Pose,
    /// Velocity and grounded state
    motion: MotionState,
    /// Ground height source; flat ground at zero when absent
    terrain: Option<Box<dyn TerrainQuery>>,
    /// Wall volumes
    obstacles: ObstacleSet,
}

impl PlayerController {
    /// Create a grounded controller at the given camera pose
    pub fn new(pose: Pose, config: PlayerConfig) -> Self {
        Self {
            input: InputHandler::new(config.mouse_sensitivity),
            config,
            pose,
            motion: MotionState::default(),
            terrain: None,
            obstacles: ObstacleSet::new(),
        }
    }

    /// Create a controller standing on the ground at `position`
    pub fn spawn_at(position: Vec3, config: PlayerConfig) -> Self {
        let eye = position + Vec3::Y * config.eye_height;
        Self::new(Pose::from_position(eye), config)
    }

    /// Snapshot of the camera pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Snapshot of the motion state
    pub fn motion(&self) -> MotionState {
        self.motion
    }

    pub fn is_grounded(&self) -> bool {
        self.motion.is_grounded()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    /// Input capture surface for the host's event handlers
    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Replace the movement configuration without touching pose or motion
    pub fn update_config(&mut self, config: PlayerConfig) {
        debug!(
            move_speed = config.move_speed,
            mouse_sensitivity = config.mouse_sensitivity,
            "Player config updated"
        );
        self.input.mouse_sensitivity = config.mouse_sensitivity;
        self.config = config;
    }

    /// Replace the ground height source
    pub fn set_terrain_source(&mut self, terrain: impl TerrainQuery + 'static) {
        debug!("Terrain source replaced");
        self.terrain = Some(Box::new(terrain));
    }

    /// Fall back to flat ground at height zero
    pub fn clear_terrain_source(&mut self) {
        self.terrain = None;
    }

    /// Replace the wall volumes
    pub fn set_obstacles(&mut self, obstacles: ObstacleSet) {
        debug!(count = obstacles.len(), "Obstacles replaced");
        self.obstacles = obstacles;
    }

    /// Move the camera to a new pose, standing still on the ground
    pub fn teleport(&mut self, pose: Pose) {
        self.pose = pose;
        self.motion = MotionState::default();
        self.input.state.pointer_delta = Vec2::ZERO;
        self.snap_to_ground();
    }

    /// Ground height under `(x, z)`
    pub fn ground_height(&self, x: f32, z: f32) -> f32 {
        self.terrain
            .as_ref()
            .map_or(0.0, |terrain| terrain.height_at(x, z))
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Steps run in a fixed order: look, movement direction, horizontal
    /// move with collision, jump, gravity, vertical move, ground clamp and
    /// finally the world bound clamp. Negative or non-finite `dt` counts as 0.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.update_orientation();
        let direction = self.movement_direction();
        self.move_horizontal(direction, dt);
        let launched = self.try_jump();
        if !launched {
            self.apply_gravity(dt);
        }
        self.pose.position.y += self.motion.velocity.y * dt;
        self.resolve_ground();
        self.clamp_to_bounds();

        trace!(
            position = ?self.pose.position,
            velocity = ?self.motion.velocity,
            grounded = self.is_grounded(),
            "Player tick"
        );
    }

    /// Apply the pointer movement buffered since the last tick
    fn update_orientation(&mut self) {
        let delta = self.input.take_pointer_delta();
        if delta != Vec2::ZERO && delta.is_finite() {
            self.pose.orientation.rotate(-delta.x, -delta.y);
        }
    }

    /// World-space unit direction of the held movement keys, or zero.
    ///
    /// Only yaw is used: the forward vector is the view direction flattened
    /// onto the ground plane, so looking up or down never changes it.
    pub fn movement_direction(&self) -> Vec3 {
        let state = &self.input.state;
        let intent = Vec3::new(
            state.axis(InputAction::MoveLeft, InputAction::MoveRight),
            0.0,
            state.axis(InputAction::MoveForward, InputAction::MoveBackward),
        );
        if intent == Vec3::ZERO {
            return Vec3::ZERO;
        }
        let intent = intent.normalize();

        let forward = self.pose.orientation.flat_forward();
        let right = forward.cross(Vec3::Y);
        forward * -intent.z + right * intent.x
    }

    /// Move along X then Z, rejecting each axis that would enter a wall
    fn move_horizontal(&mut self, direction: Vec3, dt: f32) {
        let velocity = direction * self.config.move_speed;
        self.motion.velocity.x = velocity.x;
        self.motion.velocity.z = velocity.z;

        let step = velocity * dt;
        let radius = self.config.collision_radius;

        if step.x != 0.0 {
            let candidate = self.pose.position + Vec3::new(step.x, 0.0, 0.0);
            if self.obstacles.blocks(candidate, radius) {
                trace!(x = candidate.x, "X movement blocked");
                self.motion.velocity.x = 0.0;
            } else {
                self.pose.position.x = candidate.x;
            }
        }

        if step.z != 0.0 {
            let candidate = self.pose.position + Vec3::new(0.0, 0.0, step.z);
            if self.obstacles.blocks(candidate, radius) {
                trace!(z = candidate.z, "Z movement blocked");
                self.motion.velocity.z = 0.0;
            } else {
                self.pose.position.z = candidate.z;
            }
        }
    }

    /// Leave the ground if jump is held while standing
    fn try_jump(&mut self) -> bool {
        if self.motion.is_grounded() && self.input.state.is_held(InputAction::Jump) {
            debug!(speed = self.config.jump_speed, "Jump");
            self.motion.launch(self.config.jump_speed);
            return true;
        }
        false
    }

    fn apply_gravity(&mut self, dt: f32) {
        if self.motion.vertical == VerticalState::Airborne {
            self.motion.velocity.y += self.config.gravity * dt;
        }
    }

    /// Clamp to the ground while standing, or land once at or below it
    fn resolve_ground(&mut self) {
        let floor = self.floor_height();
        match self.motion.vertical {
            VerticalState::Grounded => self.snap_to_ground(),
            VerticalState::Airborne if self.pose.position.y <= floor => {
                debug!(y = floor, "Landed");
                self.pose.position.y = floor;
                self.motion.land();
            }
            VerticalState::Airborne => {}
        }
    }

    /// Eye height above the ground under the current position
    fn floor_height(&self) -> f32 {
        let position = self.pose.position;
        self.ground_height(position.x, position.z) + self.config.eye_height
    }

    fn snap_to_ground(&mut self) {
        self.pose.position.y = self.floor_height();
        self.motion.velocity.y = 0.0;
    }

    /// Truncate X and Z into the world bound
    fn clamp_to_bounds(&mut self) {
        let bound = self.config.world_bound;
        let position = &mut self.pose.position;
        let mut clamped = false;

        if position.x.abs() > bound {
            position.x = bound.copysign(position.x);
            clamped = true;
        }
        if position.z.abs() > bound {
            position.z = bound.copysign(position.z);
            clamped = true;
        }

        // Keep standing on the ground under the clamped position
        if clamped && self.motion.is_grounded() {
            self.snap_to_ground();
        }
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::spawn_at(Vec3::ZERO, PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

    use roam_core::Orientation;
    use roam_physics::{Aabb, FlatGround};
    use winit::keyboard::KeyCode;

    use super::*;

    const EPSILON: f32 = 1e-4;

    /// Ground rising half a unit per unit of X
    struct Ramp;

    impl TerrainQuery for Ramp {
        fn height_at(&self, x: f32, _z: f32) -> f32 {
            x * 0.5
        }
    }

    fn player_at(position: Vec3, config: PlayerConfig) -> PlayerController {
        let mut player = PlayerController::spawn_at(position, config);
        player.set_terrain_source(FlatGround::default());
        player
    }

    #[test]
    fn test_spawn_grounded() {
        let player = PlayerController::default();
        assert!(player.is_grounded());
        assert_eq!(player.pose().position, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(player.motion().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_pitch_always_clamped() {
        let mut player = PlayerController::default();
        player.input_mut().handle_click();

        let deltas = [
            (0.0, 5000.0),
            (120.0, -9000.0),
            (-40.0, 2.0),
            (0.0, -1.0e6),
            (3.0, 1.0e6),
        ];
        for delta in deltas {
            player.input_mut().handle_pointer_motion(delta);
            player.tick(1.0 / 60.0);
            let pitch = player.pose().orientation.pitch();
            assert!(pitch >= -FRAC_PI_2 && pitch <= FRAC_PI_2);
        }
    }

    #[test]
    fn test_non_finite_pointer_keeps_pose_valid() {
        let mut player = PlayerController::default();
        player.input_mut().handle_click();
        player.input_mut().handle_pointer_motion((f64::NAN, f64::NAN));
        player.input_mut().handle_key(KeyCode::KeyW, true);
        player.tick(0.1);

        // A delta written straight into the buffer is skipped too
        player.input_mut().state.pointer_delta = Vec2::new(f32::INFINITY, f32::NAN);
        player.tick(0.1);

        let pose = player.pose();
        let pitch = pose.orientation.pitch();
        assert!(pitch >= -FRAC_PI_2 && pitch <= FRAC_PI_2);
        assert_eq!(pose.orientation.yaw, 0.0);
        assert!(pose.position.is_finite());
        assert!(pose.position.z < 0.0);
        assert!(pose.position.z.abs() <= player.config().world_bound);
    }

    #[test]
    fn test_pointer_delta_applied_once() {
        let mut player = player_at(Vec3::ZERO, PlayerConfig {
            mouse_sensitivity: 0.01,
            ..Default::default()
        });
        player.input_mut().handle_click();
        player.input_mut().handle_pointer_motion((10.0, -5.0));
        player.input_mut().handle_pointer_motion((10.0, 0.0));

        player.tick(1.0 / 60.0);
        let orientation = player.pose().orientation;
        assert!((orientation.yaw + 0.2).abs() < EPSILON);
        assert!((orientation.pitch() - 0.05).abs() < EPSILON);

        player.tick(1.0 / 60.0);
        assert_eq!(player.pose().orientation, orientation);
    }

    #[test]
    fn test_forward_ignores_pitch() {
        for pitch in [0.0, FRAC_PI_4, -FRAC_PI_4, FRAC_PI_2] {
            let mut player = player_at(Vec3::ZERO, PlayerConfig {
                move_speed: 1.0,
                ..Default::default()
            });
            player.teleport(Pose::new(Vec3::ZERO, Orientation::new(0.0, pitch)));
            player.input_mut().handle_key(KeyCode::KeyW, true);

            assert!((player.movement_direction() - Vec3::NEG_Z).length() < EPSILON);

            player.tick(1.0);
            let position = player.pose().position;
            assert!(position.x.abs() < EPSILON);
            assert!((position.z + 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_strafe_and_backward_directions() {
        let mut player = PlayerController::default();
        player.input_mut().handle_key(KeyCode::KeyD, true);
        assert!((player.movement_direction() - Vec3::X).length() < EPSILON);

        player.input_mut().handle_key(KeyCode::KeyD, false);
        player.input_mut().handle_key(KeyCode::KeyS, true);
        assert!((player.movement_direction() - Vec3::Z).length() < EPSILON);

        // Facing +X, forward moves along +X
        player.input_mut().handle_key(KeyCode::KeyS, false);
        player.input_mut().handle_key(KeyCode::KeyW, true);
        player.teleport(Pose::new(Vec3::ZERO, Orientation::new(-FRAC_PI_2, 0.0)));
        assert!((player.movement_direction() - Vec3::X).length() < EPSILON);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut player = PlayerController::default();
        player.input_mut().handle_key(KeyCode::KeyW, true);
        player.input_mut().handle_key(KeyCode::KeyA, true);
        assert!((player.movement_direction().length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut player = player_at(Vec3::ZERO, PlayerConfig::default());
        player.input_mut().handle_key(KeyCode::KeyW, true);
        player.input_mut().handle_key(KeyCode::KeyS, true);
        player.input_mut().handle_key(KeyCode::KeyA, true);
        player.input_mut().handle_key(KeyCode::KeyD, true);

        assert_eq!(player.movement_direction(), Vec3::ZERO);
        let before = player.pose();
        player.tick(0.5);
        assert_eq!(player.pose(), before);
    }

    #[test]
    fn test_jump_then_fall() {
        let mut player = player_at(Vec3::ZERO, PlayerConfig {
            jump_speed: 10.0,
            gravity: -35.0,
            eye_height: 2.0,
            ..Default::default()
        });
        let dt = 0.05;

        player.input_mut().handle_key(KeyCode::Space, true);
        player.tick(dt);
        player.input_mut().handle_key(KeyCode::Space, false);

        assert!(!player.is_grounded());
        assert!((player.motion().velocity.y - 10.0).abs() < EPSILON);

        let mut previous = player.motion().velocity.y;
        let mut ticks = 0;
        while !player.is_grounded() {
            player.tick(dt);
            ticks += 1;
            assert!(ticks < 1000, "never landed");

            if player.is_grounded() {
                break;
            }
            let velocity = player.motion().velocity.y;
            assert!((previous - velocity - 35.0 * dt).abs() < EPSILON);
            assert!(player.pose().position.y > 2.0);
            previous = velocity;
        }

        assert_eq!(player.pose().position.y, 2.0);
        assert_eq!(player.motion().velocity.y, 0.0);
        // Roughly 2 * v / g seconds in the air
        assert!((ticks as f32 * dt - 20.0 / 35.0).abs() < 2.0 * dt);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut player = player_at(Vec3::ZERO, PlayerConfig::default());
        player.input_mut().handle_key(KeyCode::Space, true);
        player.tick(0.05);
        player.tick(0.05);

        // Still holding jump in the air does not relaunch
        assert!(player.motion().velocity.y < player.config().jump_speed);
    }

    #[test]
    fn test_axis_sliding_along_wall() {
        let mut player = player_at(Vec3::new(3.0, 0.0, 0.0), PlayerConfig {
            move_speed: 3.0 * std::f32::consts::SQRT_2,
            collision_radius: 1.0,
            ..Default::default()
        });
        let mut walls = ObstacleSet::new();
        walls.push(Aabb::new(Vec3::new(5.0, 0.0, -1.0), Vec3::new(7.0, 4.0, 1.0)));
        player.set_obstacles(walls);

        // Right and back at yaw 0: displacement (+3, 0, +3)
        player.input_mut().handle_key(KeyCode::KeyD, true);
        player.input_mut().handle_key(KeyCode::KeyS, true);
        player.tick(1.0);

        let position = player.pose().position;
        assert!((position.x - 3.0).abs() < EPSILON);
        assert!((position.z - 3.0).abs() < EPSILON);
        assert_eq!(player.motion().velocity.x, 0.0);
        assert!(player.motion().velocity.z > 0.0);
    }

    #[test]
    fn test_empty_obstacles_pass_through() {
        let mut player = player_at(Vec3::new(3.0, 0.0, 0.0), PlayerConfig {
            move_speed: 3.0,
            ..Default::default()
        });
        player.input_mut().handle_key(KeyCode::KeyD, true);
        player.tick(1.0);
        assert!((player.pose().position.x - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_fast_mover_tunnels_thin_wall() {
        let mut player = player_at(Vec3::ZERO, PlayerConfig {
            move_speed: 10.0,
            collision_radius: 0.1,
            ..Default::default()
        });
        let mut walls = ObstacleSet::new();
        walls.push(Aabb::new(Vec3::new(4.9, 0.0, -5.0), Vec3::new(5.1, 4.0, 5.0)));
        player.set_obstacles(walls);

        player.input_mut().handle_key(KeyCode::KeyD, true);
        player.tick(1.0);
        assert!((player.pose().position.x - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_grounded_follows_terrain() {
        let mut player = PlayerController::spawn_at(Vec3::ZERO, PlayerConfig {
            move_speed: 4.0,
            world_bound: 1000.0,
            ..Default::default()
        });
        player.set_terrain_source(Ramp);
        player.input_mut().handle_key(KeyCode::KeyD, true);

        for _ in 0..30 {
            player.tick(0.1);
            let position = player.pose().position;
            assert!(player.is_grounded());
            assert!((position.y - (position.x * 0.5 + 2.0)).abs() < EPSILON);
            assert_eq!(player.motion().velocity.y, 0.0);
        }
    }

    #[test]
    fn test_missing_terrain_is_flat_zero() {
        let mut player = PlayerController::new(
            Pose::from_position(Vec3::new(1.0, 40.0, 1.0)),
            PlayerConfig::default(),
        );
        player.tick(0.1);
        assert_eq!(player.pose().position.y, 2.0);
    }

    #[test]
    fn test_bounds_clamp_and_resnap() {
        let mut player = PlayerController::spawn_at(Vec3::ZERO, PlayerConfig {
            move_speed: 10.0,
            world_bound: 5.0,
            ..Default::default()
        });
        player.set_terrain_source(Ramp);
        player.input_mut().handle_key(KeyCode::KeyD, true);
        player.input_mut().handle_key(KeyCode::KeyW, true);

        for _ in 0..20 {
            player.tick(0.25);
            let position = player.pose().position;
            assert!(position.x.abs() <= 5.0);
            assert!(position.z.abs() <= 5.0);
        }

        let position = player.pose().position;
        assert_eq!(position.x, 5.0);
        assert_eq!(position.z, -5.0);
        assert!((position.y - 4.5).abs() < EPSILON);
    }

    #[test]
    fn test_no_input_is_idempotent() {
        let mut player = player_at(Vec3::new(2.0, 0.0, -7.0), PlayerConfig::default());
        player.tick(1.0 / 60.0);
        let settled = player.pose();

        for _ in 0..120 {
            player.tick(1.0 / 60.0);
            assert_eq!(player.pose(), settled);
            assert!(player.is_grounded());
        }
    }

    #[test]
    fn test_zero_dt_only_clamps() {
        let mut player = player_at(Vec3::ZERO, PlayerConfig::default());
        player.input_mut().handle_key(KeyCode::KeyW, true);
        player.input_mut().handle_key(KeyCode::Space, true);
        let before = player.pose();

        player.tick(0.0);
        assert_eq!(player.pose().position, before.position);
        assert!(player.is_grounded());

        player.tick(-1.0);
        player.tick(f32::NAN);
        assert_eq!(player.pose().position, before.position);
    }

    #[test]
    fn test_config_hot_swap() {
        let mut player = player_at(Vec3::ZERO, PlayerConfig {
            move_speed: 1.0,
            mouse_sensitivity: 0.001,
            ..Default::default()
        });
        player.input_mut().handle_key(KeyCode::KeyW, true);
        player.input_mut().handle_key(KeyCode::Space, true);
        player.tick(0.1);
        player.input_mut().handle_key(KeyCode::Space, false);

        let pose = player.pose();
        let motion = player.motion();
        player.update_config(PlayerConfig {
            move_speed: 4.0,
            mouse_sensitivity: 0.01,
            ..Default::default()
        });
        assert_eq!(player.pose(), pose);
        assert_eq!(player.motion(), motion);
        assert!(!player.is_grounded());

        player.tick(0.1);
        assert!((player.pose().position.z - (pose.position.z - 0.4)).abs() < EPSILON);

        player.input_mut().handle_click();
        player.input_mut().handle_pointer_motion((10.0, 0.0));
        player.tick(0.0);
        assert!((player.pose().orientation.yaw + 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_late_bound_collaborators() {
        let mut player = PlayerController::spawn_at(Vec3::ZERO, PlayerConfig::default());
        player.tick(0.1);
        assert_eq!(player.pose().position.y, 2.0);

        player.set_terrain_source(FlatGround::new(3.0));
        player.tick(0.1);
        assert_eq!(player.pose().position.y, 5.0);

        player.clear_terrain_source();
        player.tick(0.1);
        assert_eq!(player.pose().position.y, 2.0);

        player.set_obstacles(ObstacleSet::new());
        assert!(player.obstacles().is_empty());
    }

    #[test]
    fn test_landing_on_raised_ground() {
        let mut player = player_at(Vec3::ZERO, PlayerConfig::default());
        player.input_mut().handle_key(KeyCode::Space, true);
        player.tick(0.05);
        player.input_mut().handle_key(KeyCode::Space, false);

        // Ground rises under the player mid-air
        player.set_terrain_source(FlatGround::new(10.0));
        player.tick(0.05);
        assert!(player.is_grounded());
        assert_eq!(player.pose().position.y, 12.0);
        assert_eq!(player.motion().velocity.y, 0.0);
    }

    fn village_player(position: Vec3, config: PlayerConfig) -> PlayerController {
        let houses = roam_world::Houses::new(roam_world::HousesConfig::default()).unwrap();
        let mut player = player_at(position, config);
        player.set_obstacles(houses.walls(0.0));
        player
    }

    #[test]
    fn test_walks_through_door_gap() {
        // In front of the center house's door, facing +Z into it
        let mut player = village_player(Vec3::new(0.0, 0.0, -20.0), PlayerConfig::houses());
        player.teleport(Pose::new(player.pose().position, Orientation::new(PI, 0.0)));
        player.input_mut().handle_key(KeyCode::KeyW, true);

        for _ in 0..20 {
            player.tick(0.1);
        }
        // Through the front wall and inside the house
        let position = player.pose().position;
        assert!(position.z > -6.0 && position.z < 6.5);
        assert!(position.x.abs() < 0.01);

        // Stopped by the back wall
        for _ in 0..20 {
            player.tick(0.1);
        }
        let position = player.pose().position;
        assert!(position.z > 5.5 && position.z < 6.5);
        assert_eq!(player.motion().velocity.z, 0.0);
    }

    #[test]
    fn test_door_gap_sealed_for_wide_players() {
        let mut player = village_player(Vec3::new(0.0, 0.0, -20.0), PlayerConfig::default());
        player.teleport(Pose::new(player.pose().position, Orientation::new(PI, 0.0)));
        player.input_mut().handle_key(KeyCode::KeyW, true);

        for _ in 0..30 {
            player.tick(0.1);
        }
        assert!(player.pose().position.z < -9.0);
    }

    #[test]
    fn test_slides_along_house_wall() {
        // West of the center house's left wall (x in [-10.5, -9.5])
        let mut player = village_player(Vec3::new(-13.0, 0.0, 0.0), PlayerConfig::default());
        player.input_mut().handle_key(KeyCode::KeyW, true);
        player.input_mut().handle_key(KeyCode::KeyD, true);

        for _ in 0..5 {
            player.tick(0.1);
        }
        let position = player.pose().position;
        assert!(position.x < -11.5 && position.x > -12.0);
        assert!((position.z + 5.0 * 0.1 * 10.0 * FRAC_1_SQRT_2).abs() < 1e-3);
        assert_eq!(player.motion().velocity.x, 0.0);
    }

    #[test]
    fn test_never_enters_maze_walls() {
        let level = roam_world::Level::maze(roam_world::MazeConfig {
            columns: 4,
            rows: 4,
            ..Default::default()
        })
        .unwrap();

        let mut player = PlayerController::spawn_at(level.spawn.position, PlayerConfig {
            world_bound: level.world_bound,
            ..PlayerConfig::maze()
        });
        player.teleport(Pose::new(player.pose().position, level.spawn.orientation));
        player.set_terrain_source(level.terrain);
        player.set_obstacles(level.obstacles.clone());

        player.input_mut().handle_click();
        player.input_mut().handle_key(KeyCode::KeyW, true);
        for frame in 0..1200 {
            if frame % 90 == 0 {
                player.input_mut().handle_pointer_motion((400.0, 0.0));
            }
            player.tick(1.0 / 60.0);

            let position = player.pose().position;
            assert!(!level.obstacles.blocks(position, 0.0));
            assert!((position.y - 2.0).abs() < 1e-3);
        }
    }
}

//! Input system with action-based mapping
//!
//! Converts raw key and pointer events into an [`InputState`] that the player
//! controller samples once per tick. Nothing here touches the pose.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Logical movement actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
}

/// Input sampled by the controller each tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Scaled pointer movement accumulated since the last tick
    pub pointer_delta: Vec2,
    /// Whether the pointer is locked to the view
    pub pointer_captured: bool,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// -1, 0 or 1 from a pair of opposing actions; both held cancels out
    pub fn axis(&self, negative: InputAction, positive: InputAction) -> f32 {
        let mut value = 0.0;
        if self.is_held(negative) {
            value -= 1.0;
        }
        if self.is_held(positive) {
            value += 1.0;
        }
        value
    }

    /// Drain the accumulated pointer delta
    pub fn take_pointer_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.pointer_delta)
    }

    /// Release every action and drop any pending pointer movement
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.pointer_delta = Vec2::ZERO;
    }
}

/// Maps physical keys to actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
    /// Reverse lookup: action to all keys
    reverse: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);

        bindings
    }
}

impl InputBindings {
    /// Bindings with no keys mapped
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Bind a key to an action, replacing any previous binding of that key
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind(key);
        self.bindings.insert(key, action);
        self.reverse.entry(action).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.reverse.get_mut(&action) {
                keys.retain(|k| *k != key);
            }
        }
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to an action
    pub fn keys_for(&self, action: InputAction) -> &[KeyCode] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Radians of rotation per unit of pointer movement
    pub mouse_sensitivity: f32,
    /// Invert Y axis
    pub invert_y: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(0.002)
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new(mouse_sensitivity: f32) -> Self {
        Self {
            state: InputState::new(),
            bindings: InputBindings::default(),
            mouse_sensitivity,
            invert_y: false,
        }
    }

    /// Handle a keyboard event. Returns whether the key is bound.
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) -> bool {
        match physical_key {
            PhysicalKey::Code(key_code) => {
                self.handle_key(key_code, element_state == ElementState::Pressed)
            }
            PhysicalKey::Unidentified(_) => false,
        }
    }

    /// Press or release a key by code. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let Some(action) = self.bindings.get_key_action(key) else {
            return false;
        };
        if pressed {
            self.state.held.insert(action);
        } else {
            self.state.held.remove(&action);
        }
        true
    }

    /// Handle raw pointer movement; ignored unless the pointer is captured.
    ///
    /// Motion that scales to NaN or infinity is discarded.
    pub fn handle_pointer_motion(&mut self, delta: (f64, f64)) {
        if !self.state.pointer_captured {
            return;
        }
        let y_mult = if self.invert_y { -1.0 } else { 1.0 };
        let scaled = Vec2::new(
            delta.0 as f32 * self.mouse_sensitivity,
            delta.1 as f32 * self.mouse_sensitivity * y_mult,
        );
        // Keep the buffered delta finite
        if !scaled.is_finite() {
            trace!(?delta, "Dropped non-finite pointer motion");
            return;
        }
        self.state.pointer_delta += scaled;
    }

    /// A user gesture (click) on the view acquires pointer capture
    pub fn handle_click(&mut self) {
        if !self.state.pointer_captured {
            debug!("Pointer captured");
        }
        self.state.pointer_captured = true;
    }

    /// The host reports a pointer lock change
    pub fn handle_pointer_lock_change(&mut self, locked: bool) {
        if self.state.pointer_captured && !locked {
            debug!("Pointer released");
            self.state.pointer_delta = Vec2::ZERO;
        }
        self.state.pointer_captured = locked;
    }

    /// The view lost focus; key releases will not be delivered
    pub fn handle_focus_lost(&mut self) {
        self.state.clear_all();
    }

    /// Drain the pointer delta accumulated since the last call
    pub fn take_pointer_delta(&mut self) -> Vec2 {
        self.state.take_pointer_delta()
    }
}

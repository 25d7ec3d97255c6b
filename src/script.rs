//! Scripted input for headless sessions
//!
//! A script is a JSON document of timestamped host events:
//!
//! ```json
//! {
//!   "duration": 4.0,
//!   "events": [
//!     { "at": 0.0, "type": "click" },
//!     { "at": 0.0, "type": "key_down", "key": "KeyW" },
//!     { "at": 1.0, "type": "pointer_motion", "dx": 200.0, "dy": -40.0 },
//!     { "at": 2.5, "type": "key_up", "key": "KeyW" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use roam_game::PlayerConfig;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// One host event delivered to the controller's input surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
    PointerMotion { dx: f64, dy: f64 },
    /// User gesture that acquires pointer lock
    Click,
    /// Host notification that pointer lock changed
    PointerLock { locked: bool },
    FocusLost,
    /// Settings changed mid-session
    SetConfig { config: PlayerConfig },
}

/// Event scheduled at a session time in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at: f32,
    #[serde(flatten)]
    pub event: ScriptEvent,
}

/// Timeline of input events plus how long to run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputScript {
    /// Session length in seconds
    pub duration: f32,
    /// Simulated display frame time in seconds
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    pub events: Vec<TimedEvent>,
}

fn default_frame_time() -> f32 {
    1.0 / 60.0
}

impl InputScript {
    /// Parse a script, ordering events by time (stable for equal times)
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut script: Self = serde_json::from_str(json).context("Invalid input script")?;
        script.events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(script)
    }

    /// Load a script from a file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input script {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("In input script {:?}", path))
    }

    /// Walk forward, look around, strafe and jump
    pub fn demo() -> Self {
        use ScriptEvent::*;

        let events = vec![
            (0.0, Click),
            (0.0, PointerLock { locked: true }),
            (0.0, KeyDown { key: KeyCode::KeyW }),
            (1.0, PointerMotion { dx: 250.0, dy: -60.0 }),
            (1.5, KeyDown { key: KeyCode::Space }),
            (1.6, KeyUp { key: KeyCode::Space }),
            (2.0, KeyDown { key: KeyCode::KeyD }),
            (3.0, KeyUp { key: KeyCode::KeyD }),
            (3.0, PointerMotion { dx: -500.0, dy: 60.0 }),
            (4.0, KeyUp { key: KeyCode::KeyW }),
            (4.0, PointerLock { locked: false }),
        ];

        Self {
            duration: 5.0,
            frame_time: default_frame_time(),
            events: events
                .into_iter()
                .map(|(at, event)| TimedEvent { at, event })
                .collect(),
        }
    }
}

//! Roam - first-person exploration, run headless
//!
//! Usage:
//!   roam [--settings path.toml] [--script input.json] [--level flat|open-field|maze|houses]
//!        [--save-settings]
//!
//! Builds the configured level, replays an input script (a built-in demo
//! when none is given) through the player controller and reports where the
//! camera ended up. Set `RUST_LOG=debug` to trace every frame.

mod script;
mod session;
mod settings;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use roam_world::{Level, LevelKind};
use tracing::{info, warn};

use crate::script::InputScript;
use crate::session::Session;
use crate::settings::GameSettings;

/// Command line options
#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    script: Option<PathBuf>,
    level: Option<String>,
    save_settings: bool,
}

/// Parse `argv` (program name first), warning about anything not understood
fn parse_args(argv: &[String]) -> Args {
    let mut args = Args::default();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--settings" if i + 1 < argv.len() => {
                args.settings = Some(PathBuf::from(&argv[i + 1]));
                i += 2;
            }
            "--script" if i + 1 < argv.len() => {
                args.script = Some(PathBuf::from(&argv[i + 1]));
                i += 2;
            }
            "--level" if i + 1 < argv.len() => {
                args.level = Some(argv[i + 1].clone());
                i += 2;
            }
            "--save-settings" => {
                args.save_settings = true;
                i += 1;
            }
            flag @ ("--settings" | "--script" | "--level") => {
                warn!("{} expects a value, ignoring it", flag);
                i += 1;
            }
            other => {
                warn!("Ignoring unknown argument {:?}", other);
                i += 1;
            }
        }
    }
    args
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let argv: Vec<String> = env::args().collect();
    let args = parse_args(&argv);
    info!("Starting Roam...");

    let mut settings = match &args.settings {
        Some(path) => GameSettings::load_from(path)?,
        None => GameSettings::load(),
    };

    if let Some(level) = &args.level {
        settings.world.kind = level.parse::<LevelKind>().context("--level")?;
    }

    if args.save_settings {
        let path = settings.save()?;
        info!("Settings written to {:?}", path);
    }

    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => {
            info!("No input script given, running the demo");
            InputScript::demo()
        }
    };

    let level = Level::build(&settings.world).context("Failed to build level")?;
    let mut session = Session::new(&settings, level, script);
    let summary = session.run();

    let pose = summary.final_pose;
    info!(
        position = ?pose.position,
        yaw = pose.orientation.yaw,
        pitch = pose.orientation.pitch(),
        grounded = summary.grounded,
        ticks = summary.ticks,
        distance = summary.distance,
        world_bound = session.player().config().world_bound,
        "Session finished"
    );

    Ok(())
}

/*!
# Parachute Server

Headless server process hosting the parachute feature.

The configuration path comes from `PARACHUTE_CONFIG` (default `config.toml`).
The file is required and validated before the app starts, and afterwards it is
watched for edits.
*/

use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::path::PathBuf;

use parachute_server::ecs::plugins::config::DEFAULT_CONFIG_PATH;
use parachute_server::{ConfigError, ParachutePlugin, load_config};

/// Fixed simulation rate, matching a 64-tick game server.
const TICK_RATE_HZ: f64 = 64.0;

fn main() -> Result<(), ConfigError> {
    let config_path = std::env::var("PARACHUTE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    let file = load_config(&config_path)?;
    let parachute = ParachutePlugin::new(&file)?.watching(config_path);

    App::new()
        // Bevy's minimal plugins (no graphics/audio needed for server)
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(parachute)
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
        .add_systems(Startup, announce_startup)
        .run();

    Ok(())
}

fn announce_startup(config: Res<parachute_server::FlightConfig>) {
    info!(
        "Parachute ready: terminal velocity {}, step {}, linear {}, model {}",
        config.terminal_velocity,
        config.fall_step,
        config.linear,
        config.model.as_deref().unwrap_or("<none>"),
    );
    if let Some(flag) = config.admin_flag.as_deref() {
        info!("Parachute restricted to players with {flag}");
    }
}

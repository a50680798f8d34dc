use bevy::prelude::*;

use crate::ecs::plugins::config::components::*;
use crate::ecs::plugins::config::loader::parse_config;

/// Applies config file edits picked up by the watcher.
///
/// `MaxPlayers` sizes the slot table once at startup, so a reload keeps the
/// running value. An invalid edit is logged and the current snapshot stays.
pub fn reload_config_system(
    receiver: Option<Res<ConfigWatcherReceiver>>,
    mut config: ResMut<FlightConfig>,
) {
    let Some(receiver) = receiver else { return };

    for content in receiver.0.try_iter() {
        let next = parse_config(&content)
            .and_then(|file| FlightConfig::from_settings(&file.parachute.settings));

        match next {
            Ok(next) => {
                if next.max_players != config.max_players {
                    warn!(
                        "MaxPlayers changed from {} to {}; restart the server to apply it",
                        config.max_players, next.max_players
                    );
                }
                let max_players = config.max_players;
                *config = FlightConfig { max_players, ..next };
                info!("Parachute configuration reloaded");
            }
            Err(e) => {
                error!("Ignoring parachute configuration change: {e}");
            }
        }
    }
}

pub fn precache_model_system(config: Res<FlightConfig>, mut manifest: ResMut<ResourceManifest>) {
    if let Some(model) = config.model.as_deref() {
        if manifest.add_item(model) {
            debug!("Precaching parachute model {model}");
        }
    }
}

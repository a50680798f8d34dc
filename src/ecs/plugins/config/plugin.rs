use bevy::prelude::*;
use std::path::PathBuf;

use crate::ecs::core::ParachuteSet;
use crate::ecs::plugins::config::components::*;
use crate::ecs::plugins::config::systems::*;
use crate::ecs::plugins::config::watcher::spawn_config_watcher;

pub struct ConfigPlugin {
    pub config: FlightConfig,
    pub watch_path: Option<PathBuf>,
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<ResourceManifest>();

        if let Some(path) = &self.watch_path {
            app.insert_resource(ConfigWatcherReceiver(spawn_config_watcher(path.clone())));
        }

        app.add_systems(
            FixedUpdate,
            (
                reload_config_system,
                precache_model_system.run_if(resource_changed::<FlightConfig>),
            )
                .chain()
                .in_set(ParachuteSet::Config),
        );
    }
}

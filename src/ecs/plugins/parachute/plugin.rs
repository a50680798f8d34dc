use bevy::prelude::*;
use std::path::PathBuf;

use crate::ecs::core::{CorePlugin, ParachuteSet};
use crate::ecs::plugins::config::{ConfigError, ConfigFile, ConfigPlugin, FlightConfig, ParachuteSettings};
use crate::ecs::plugins::parachute::components::*;
use crate::ecs::plugins::parachute::systems::*;
use crate::ecs::plugins::permission::{AdminRegistry, PermissionPlugin};
use crate::ecs::plugins::player::PlayerPlugin;

/// Everything the parachute feature needs, built from a validated config file.
///
/// A host that has its own permission backend inserts a `Permissions`
/// resource before adding this plugin.
pub struct ParachutePlugin {
    config: FlightConfig,
    admins: AdminRegistry,
    watch_path: Option<PathBuf>,
}

impl ParachutePlugin {
    pub fn new(file: &ConfigFile) -> Result<Self, ConfigError> {
        Ok(Self {
            config: FlightConfig::from_settings(&file.parachute.settings)?,
            admins: AdminRegistry::from_config(&file.parachute.admins)?,
            watch_path: None,
        })
    }

    pub fn from_settings(settings: ParachuteSettings) -> Result<Self, ConfigError> {
        let mut file = ConfigFile::default();
        file.parachute.settings = settings;
        Self::new(&file)
    }

    /// Reload the configuration whenever this file changes on disk.
    pub fn watching(mut self, path: impl Into<PathBuf>) -> Self {
        self.watch_path = Some(path.into());
        self
    }
}

impl Plugin for ParachutePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CorePlugin,
            PlayerPlugin,
            ConfigPlugin {
                config: self.config.clone(),
                watch_path: self.watch_path.clone(),
            },
            PermissionPlugin {
                registry: self.admins.clone(),
            },
        ))
        .insert_resource(FlightTable::new(self.config.max_players))
        .init_resource::<ParachuteToggle>()
        .add_observer(cancel_flights_observer)
        .add_systems(Startup, adopt_connected_players_system)
        .add_systems(PreUpdate, toggle_system.run_if(resource_changed::<ParachuteToggle>))
        .add_systems(FixedUpdate, (
            lifecycle_event_system.in_set(ParachuteSet::Lifecycle),
            parachute_flight_system
                .run_if(parachute_enabled)
                .in_set(ParachuteSet::Flight),
        ));
    }
}

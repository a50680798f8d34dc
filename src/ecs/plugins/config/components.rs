use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_MAX_PLAYERS: usize = 64;

// ============================================================================
// FILE MODEL
// ============================================================================

/// Root of `config.toml`. Everything lives under the `[Parachute]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConfigFile {
    pub parachute: ParachuteSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParachuteSection {
    pub settings: ParachuteSettings,
    /// Steam id (as a string key) to granted permission flags.
    pub admins: HashMap<String, Vec<String>>,
}

/// Settings as written by the server operator. `fall_speed` is a positive magnitude.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParachuteSettings {
    pub fall_speed: f32,
    pub linear: bool,
    pub model: String,
    pub decrease: f32,
    pub admin_flag: String,
    pub disable_when_carrying_hostage: bool,
    pub max_players: usize,
}

impl Default for ParachuteSettings {
    fn default() -> Self {
        Self {
            fall_speed: 85.0,
            linear: true,
            model: String::new(),
            decrease: 15.0,
            admin_flag: String::new(),
            disable_when_carrying_hostage: false,
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }
}

// ============================================================================
// RUNTIME SNAPSHOT
// ============================================================================

/// Validated configuration read by the flight systems.
///
/// Velocities use the host's downward-negative convention: `terminal_velocity`
/// and `fall_step` are the negated `FallSpeed` and `Decrease` values. The
/// resource is replaced wholesale on reload, never patched field by field.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlightConfig {
    pub terminal_velocity: f32,
    pub fall_step: f32,
    pub linear: bool,
    pub model: Option<String>,
    pub admin_flag: Option<String>,
    pub disable_when_carrying_hostage: bool,
    pub max_players: usize,
}

impl FlightConfig {
    pub fn from_settings(settings: &ParachuteSettings) -> Result<Self, ConfigError> {
        if !settings.fall_speed.is_finite() || settings.fall_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "FallSpeed",
                reason: format!("expected a finite magnitude >= 0, got {}", settings.fall_speed),
            });
        }
        if !settings.decrease.is_finite() || settings.decrease < 0.0 {
            return Err(ConfigError::Invalid {
                field: "Decrease",
                reason: format!("expected a finite magnitude >= 0, got {}", settings.decrease),
            });
        }
        if settings.max_players == 0 {
            return Err(ConfigError::Invalid {
                field: "MaxPlayers",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            terminal_velocity: -settings.fall_speed,
            fall_step: -settings.decrease,
            linear: settings.linear,
            model: non_empty(&settings.model),
            admin_flag: non_empty(&settings.admin_flag),
            disable_when_carrying_hostage: settings.disable_when_carrying_hostage,
            max_players: settings.max_players,
        })
    }

    /// True when `Decrease = 0`, which always snaps to terminal velocity.
    pub fn snaps_immediately(&self) -> bool {
        self.fall_step == 0.0
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        let settings = ParachuteSettings::default();
        Self {
            terminal_velocity: -settings.fall_speed,
            fall_step: -settings.decrease,
            linear: settings.linear,
            model: None,
            admin_flag: None,
            disable_when_carrying_hostage: settings.disable_when_carrying_hostage,
            max_players: settings.max_players,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ============================================================================
// PRECACHE
// ============================================================================

/// Resource paths the host must precache before they can be spawned.
#[derive(Resource, Debug, Default)]
pub struct ResourceManifest {
    items: Vec<String>,
}

impl ResourceManifest {
    /// Returns false if the path was already registered.
    pub fn add_item(&mut self, path: &str) -> bool {
        if self.contains(path) {
            return false;
        }
        self.items.push(path.to_string());
        true
    }

    pub fn contains(&self, path: &str) -> bool {
        self.items.iter().any(|item| item == path)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

// ============================================================================
// HOT RELOAD
// ============================================================================

/// Receives the full contents of the config file each time it changes on disk.
#[derive(Resource)]
pub struct ConfigWatcherReceiver(pub crossbeam_channel::Receiver<String>);

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

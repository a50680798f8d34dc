use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::ecs::plugins::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error("permission backend unavailable: {0}")]
    Unavailable(String),

    #[error("unknown permission flag {0:?}")]
    UnknownFlag(String),
}

/// Permission lookup provided by the host (admin system, database, ...).
pub trait PermissionService: Send + Sync + 'static {
    fn player_has_permission(&self, steam_id: u64, flag: &str) -> Result<bool, PermissionError>;
}

/// In-memory grants, loaded from `[Parachute.Admins]`.
#[derive(Debug, Clone, Default)]
pub struct AdminRegistry {
    grants: HashMap<u64, HashSet<String>>,
}

impl AdminRegistry {
    pub fn from_config(admins: &HashMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for (steam_id, flags) in admins {
            let id = steam_id.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                field: "Admins",
                reason: format!("{steam_id:?} is not a steam id: {e}"),
            })?;
            for flag in flags {
                registry.grant(id, flag);
            }
        }
        Ok(registry)
    }

    pub fn grant(&mut self, steam_id: u64, flag: &str) {
        self.grants.entry(steam_id).or_default().insert(flag.to_string());
    }
}

impl PermissionService for AdminRegistry {
    fn player_has_permission(&self, steam_id: u64, flag: &str) -> Result<bool, PermissionError> {
        Ok(self
            .grants
            .get(&steam_id)
            .is_some_and(|flags| flags.contains(flag)))
    }
}

#[derive(Resource)]
pub struct Permissions(Box<dyn PermissionService>);

impl Permissions {
    pub fn new(service: impl PermissionService) -> Self {
        Self(Box::new(service))
    }

    /// Eligibility for the parachute. No required flag means everyone is
    /// eligible; a failed lookup denies.
    pub fn resolve(&self, steam_id: u64, required_flag: Option<&str>) -> bool {
        let Some(flag) = required_flag.filter(|flag| !flag.is_empty()) else {
            return true;
        };

        match self.0.player_has_permission(steam_id, flag) {
            Ok(granted) => granted,
            Err(e) => {
                warn!("Permission lookup for {steam_id} failed, denying parachute: {e}");
                false
            }
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::new(AdminRegistry::default())
    }
}

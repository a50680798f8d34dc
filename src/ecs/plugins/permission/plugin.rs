use bevy::prelude::*;

use crate::ecs::plugins::permission::components::*;

/// Installs the in-memory registry unless the host already provided a
/// `Permissions` resource.
pub struct PermissionPlugin {
    pub registry: AdminRegistry,
}

impl Plugin for PermissionPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<Permissions>() {
            app.insert_resource(Permissions::new(self.registry.clone()));
        }
    }
}

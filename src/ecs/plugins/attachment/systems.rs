use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::ecs::plugins::attachment::components::*;
use crate::ecs::plugins::config::FlightConfig;

/// Creates and destroys parachute props.
#[derive(SystemParam)]
pub struct Attachments<'w, 's> {
    commands: Commands<'w, 's>,
    config: Res<'w, FlightConfig>,
}

impl Attachments<'_, '_> {
    /// Spawns a prop at the owner's origin and parents it so it follows the
    /// pawn. Returns `None` when no model is configured.
    pub fn attach(&mut self, owner: Entity) -> Option<PropHandle> {
        let model = self.config.model.as_deref()?;

        let prop = self
            .commands
            .spawn((
                ParachuteProp { owner },
                PropModel(model.to_string()),
                Transform::IDENTITY,
            ))
            .set_parent(owner)
            .id();

        debug!("Attached parachute {prop:?} to {owner:?}");
        Some(PropHandle::new(prop))
    }

    /// Despawns the prop if there is one and it still exists.
    pub fn detach(&mut self, handle: Option<PropHandle>) {
        let Some(handle) = handle else { return };

        // The prop may already be gone if the host despawned the pawn's hierarchy.
        if let Some(prop) = self.commands.get_entity(handle.entity()) {
            prop.despawn_recursive();
            debug!("Detached parachute {:?}", handle.entity());
        }
    }
}

use bevy::prelude::*;

use crate::ecs::plugins::attachment::Attachments;
use crate::ecs::plugins::config::FlightConfig;
use crate::ecs::plugins::parachute::components::*;
use crate::ecs::plugins::parachute::flight::next_fall_velocity;
use crate::ecs::plugins::parachute::lifecycle::FlightLifecycle;
use crate::ecs::plugins::player::*;

// ============================================================================
// LIFECYCLE SYSTEMS
// ============================================================================

/// Creates records for players that were already connected when the plugin
/// started (server hot reload).
pub fn adopt_connected_players_system(players: Query<&Player>, mut lifecycle: FlightLifecycle) {
    let mut adopted = 0;
    for player in players.iter() {
        lifecycle.on_connect(player.slot, player.steam_id);
        adopted += 1;
    }
    if adopted > 0 {
        info!("Adopted {adopted} already connected players");
    }
}

pub fn lifecycle_event_system(
    mut events: EventReader<PlayerLifecycleEvent>,
    mut lifecycle: FlightLifecycle,
) {
    for event in events.read() {
        lifecycle.handle(event);
    }
}

/// Sets the global switch and, when it goes from on to off, cancels every
/// active flight before returning.
pub fn set_parachute_enabled(world: &mut World, enabled: bool) {
    let was_enabled = {
        let mut toggle = world.resource_mut::<ParachuteToggle>();
        std::mem::replace(&mut toggle.enabled, enabled)
    };
    if was_enabled && !enabled {
        world.trigger(ParachuteDisabled);
        // Apply the prop despawns queued by the observer before returning.
        world.flush();
    }
}

/// Applies a `sv_parachute` console value. Returns false if it is not a boolean.
pub fn apply_parachute_convar(world: &mut World, value: &str) -> bool {
    let mut parsed = *world.resource::<ParachuteToggle>();
    if !parsed.set_from_convar(value) {
        return false;
    }
    set_parachute_enabled(world, parsed.enabled);
    true
}

pub fn cancel_flights_observer(_trigger: Trigger<ParachuteDisabled>, mut lifecycle: FlightLifecycle) {
    lifecycle.on_toggle_disabled();
}

/// Catches hosts that write `ParachuteToggle` directly instead of going
/// through `set_parachute_enabled`. Runs every frame, not on the fixed clock.
pub fn toggle_system(toggle: Res<ParachuteToggle>, mut commands: Commands) {
    if !toggle.enabled {
        commands.trigger(ParachuteDisabled);
    }
}

pub fn parachute_enabled(toggle: Res<ParachuteToggle>) -> bool {
    toggle.enabled
}

// ============================================================================
// FLIGHT SYSTEM
// ============================================================================

/// Per-tick parachute state machine.
///
/// Holding Use while airborne and descending deploys the parachute: the
/// vertical velocity is driven toward terminal velocity, gravity drops to
/// `PARACHUTE_GRAVITY_SCALE` and a prop is attached. Releasing Use or landing
/// folds it. While ascending with Use held, a deployed parachute stays
/// deployed (flag and prop kept) but gravity is back to normal until the pawn
/// descends again.
pub fn parachute_flight_system(
    config: Res<FlightConfig>,
    mut table: ResMut<FlightTable>,
    mut attachments: Attachments,
    mut pawns: Query<(
        Entity,
        &Player,
        &LifeState,
        &PressedButtons,
        &GroundEntity,
        Option<&CarriedHostage>,
        &mut Velocity,
        &mut GravityScale,
    )>,
) {
    for (entity, player, life_state, buttons, ground, hostage, mut velocity, mut gravity) in
        pawns.iter_mut()
    {
        if *life_state != LifeState::Alive {
            continue;
        }
        let Some(state) = table.get_mut(player.slot) else {
            continue;
        };
        if !state.has_permission {
            continue;
        }

        if !buttons.is_pressed(GameButtons::USE) || ground.is_grounded() {
            if state.flying {
                attachments.detach(state.take_prop());
                state.flying = false;
                gravity.0 = DEFAULT_GRAVITY_SCALE;
            }
            continue;
        }

        if config.disable_when_carrying_hostage && hostage.is_some_and(CarriedHostage::is_carrying) {
            continue;
        }

        if velocity.z >= 0.0 {
            if state.flying {
                gravity.0 = DEFAULT_GRAVITY_SCALE;
            }
            continue;
        }

        if state.prop.is_none() {
            state.prop = attachments.attach(entity);
        }

        velocity.z = next_fall_velocity(velocity.z, &config);

        if !state.flying {
            gravity.0 = PARACHUTE_GRAVITY_SCALE;
            state.flying = true;
        }
    }
}

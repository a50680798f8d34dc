#![allow(dead_code)]

use bevy::prelude::*;
use parachute_server::ecs::plugins::attachment::{ParachuteProp, PropHandle};
use parachute_server::ecs::plugins::player::*;
use parachute_server::{FlightTable, ParachutePlugin, ParachuteSettings, PlayerFlightState};

pub const CHUTE_MODEL: &str = "models/props_survival/parachute/chute.vmdl";

pub fn settings() -> ParachuteSettings {
    ParachuteSettings {
        model: CHUTE_MODEL.to_string(),
        max_players: 8,
        ..Default::default()
    }
}

pub fn app_with(settings: ParachuteSettings) -> App {
    let mut app = App::new();
    app.add_plugins(ParachutePlugin::from_settings(settings).unwrap());
    app
}

pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

pub fn send(app: &mut App, event: PlayerLifecycleEvent) {
    app.world_mut().send_event(event);
}

/// Spawns a pawn and runs the connect + spawn events through one tick.
pub fn join(app: &mut App, slot: usize, steam_id: u64) -> Entity {
    let pawn = app.world_mut().spawn(PlayerBundle::new(slot, steam_id)).id();
    send(app, PlayerLifecycleEvent::Connected { slot, steam_id });
    send(app, PlayerLifecycleEvent::Spawned { slot, steam_id });
    tick(app);
    pawn
}

/// Sets this tick's inputs: Use held or not, grounded or not, vertical velocity.
pub fn set_input(app: &mut App, pawn: Entity, use_held: bool, grounded: bool, vz: f32) {
    let buttons = if use_held {
        GameButtons::USE | GameButtons::FORWARD
    } else {
        GameButtons::FORWARD
    };
    let ground = grounded.then_some(Entity::PLACEHOLDER);
    app.world_mut().entity_mut(pawn).insert((
        PressedButtons(buttons),
        GroundEntity(ground),
        Velocity::vertical(vz),
    ));
}

/// Holds Use in the air at `vz` and runs one tick.
pub fn glide(app: &mut App, pawn: Entity, vz: f32) {
    set_input(app, pawn, true, false, vz);
    tick(app);
}

pub fn velocity_z(app: &App, pawn: Entity) -> f32 {
    app.world().get::<Velocity>(pawn).unwrap().z
}

pub fn gravity(app: &App, pawn: Entity) -> f32 {
    app.world().get::<GravityScale>(pawn).unwrap().0
}

pub fn state(app: &App, slot: usize) -> Option<&PlayerFlightState> {
    app.world().resource::<FlightTable>().get(slot)
}

pub fn flying(app: &App, slot: usize) -> bool {
    state(app, slot).is_some_and(|state| state.flying)
}

pub fn prop_of(app: &App, slot: usize) -> Option<Entity> {
    state(app, slot)
        .and_then(|state| state.prop.as_ref())
        .map(PropHandle::entity)
}

pub fn prop_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&ParachuteProp>();
    query.iter(world).count()
}

pub fn exists(app: &App, entity: Entity) -> bool {
    app.world().entities().contains(entity)
}

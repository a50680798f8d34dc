mod common;

use bevy::prelude::*;
use common::*;
use parachute_server::ecs::plugins::parachute::{apply_parachute_convar, set_parachute_enabled};
use parachute_server::ecs::plugins::config::{ConfigWatcherReceiver, FlightConfig, ResourceManifest};
use parachute_server::ecs::plugins::permission::{PermissionError, PermissionService, Permissions};
use parachute_server::ecs::plugins::player::*;
use parachute_server::{FlightTable, ParachutePlugin, ParachuteSettings, ParachuteToggle};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Grants the flag while the shared switch is on.
struct Switchable(Arc<AtomicBool>);

impl PermissionService for Switchable {
    fn player_has_permission(&self, _: u64, _: &str) -> Result<bool, PermissionError> {
        Ok(self.0.load(Ordering::SeqCst))
    }
}

struct Unreachable;

impl PermissionService for Unreachable {
    fn player_has_permission(&self, _: u64, _: &str) -> Result<bool, PermissionError> {
        Err(PermissionError::Unavailable("timed out".to_string()))
    }
}

fn restricted_app(service: impl PermissionService) -> App {
    let mut app = App::new();
    app.insert_resource(Permissions::new(service));
    app.add_plugins(
        ParachutePlugin::from_settings(ParachuteSettings {
            admin_flag: "@css/vip".to_string(),
            ..settings()
        })
        .unwrap(),
    );
    app
}

#[test]
fn connect_creates_a_record() {
    let mut app = app_with(settings());
    send(&mut app, PlayerLifecycleEvent::Connected { slot: 5, steam_id: 1001 });
    tick(&mut app);

    let state = state(&app, 5).unwrap();
    assert!(state.has_permission);
    assert!(!state.flying);
    assert!(state.prop.is_none());
    assert_eq!(app.world().resource::<FlightTable>().occupied(), 1);
}

#[test]
fn out_of_range_slots_are_ignored() {
    let mut app = app_with(settings());
    assert_eq!(app.world().resource::<FlightTable>().capacity(), 8);

    for event in [
        PlayerLifecycleEvent::Connected { slot: 8, steam_id: 1 },
        PlayerLifecycleEvent::Spawned { slot: 200, steam_id: 1 },
        PlayerLifecycleEvent::Died { slot: 8 },
        PlayerLifecycleEvent::Disconnected { slot: usize::MAX },
    ] {
        send(&mut app, event);
    }
    tick(&mut app);

    assert_eq!(app.world().resource::<FlightTable>().occupied(), 0);
}

#[test]
fn repeated_connect_keeps_the_existing_record() {
    let mut app = app_with(settings());
    let pawn = join(&mut app, 0, 1001);
    glide(&mut app, pawn, -10.0);
    let prop = prop_of(&app, 0).unwrap();

    send(&mut app, PlayerLifecycleEvent::Connected { slot: 0, steam_id: 1001 });
    set_input(&mut app, pawn, true, false, -25.0);
    tick(&mut app);

    assert!(flying(&app, 0));
    assert_eq!(prop_of(&app, 0), Some(prop));
    assert_eq!(prop_count(&mut app), 1);
}

#[test]
fn disconnect_frees_the_slot_and_despawns_the_prop() {
    let mut app = app_with(settings());
    let pawn = join(&mut app, 3, 1001);
    glide(&mut app, pawn, -10.0);
    let prop = prop_of(&app, 3).unwrap();

    send(&mut app, PlayerLifecycleEvent::Disconnected { slot: 3 });
    tick(&mut app);

    assert!(state(&app, 3).is_none());
    assert!(!exists(&app, prop));
    assert_eq!(prop_count(&mut app), 0);
}

#[test]
fn reused_slot_starts_clean() {
    let mut app = app_with(settings());
    let first = join(&mut app, 3, 1001);
    glide(&mut app, first, -10.0);

    // The host tears the old pawn down and hands the slot to a new player in one frame.
    app.world_mut().entity_mut(first).despawn_recursive();
    let second = app.world_mut().spawn(PlayerBundle::new(3, 2002)).id();
    send(&mut app, PlayerLifecycleEvent::Disconnected { slot: 3 });
    send(&mut app, PlayerLifecycleEvent::Connected { slot: 3, steam_id: 2002 });
    tick(&mut app);

    let state = state(&app, 3).unwrap();
    assert!(!state.flying);
    assert!(state.prop.is_none());
    assert_eq!(prop_count(&mut app), 0);
    assert_eq!(gravity(&app, second), 1.0);
}

#[test]
fn death_drops_the_prop_and_respawn_resets_the_flight() {
    let mut app = app_with(settings());
    let pawn = join(&mut app, 1, 1001);
    glide(&mut app, pawn, -10.0);
    let prop = prop_of(&app, 1).unwrap();

    app.world_mut().entity_mut(pawn).insert(LifeState::Dead);
    send(&mut app, PlayerLifecycleEvent::Died { slot: 1 });
    tick(&mut app);

    assert!(!exists(&app, prop));
    assert!(prop_of(&app, 1).is_none());
    // The flag is only cleared by the next spawn.
    assert!(flying(&app, 1));

    app.world_mut().entity_mut(pawn).insert(LifeState::Alive);
    set_input(&mut app, pawn, false, true, 0.0);
    send(&mut app, PlayerLifecycleEvent::Spawned { slot: 1, steam_id: 1001 });
    tick(&mut app);

    assert!(!flying(&app, 1));
    assert_eq!(gravity(&app, pawn), 1.0);
    assert_eq!(prop_count(&mut app), 0);
}

#[test]
fn respawn_recomputes_permission() {
    let granted = Arc::new(AtomicBool::new(true));
    let mut app = restricted_app(Switchable(granted.clone()));
    let pawn = join(&mut app, 0, 1001);
    assert!(state(&app, 0).unwrap().has_permission);

    granted.store(false, Ordering::SeqCst);
    send(&mut app, PlayerLifecycleEvent::Died { slot: 0 });
    send(&mut app, PlayerLifecycleEvent::Spawned { slot: 0, steam_id: 1001 });
    tick(&mut app);
    assert!(!state(&app, 0).unwrap().has_permission);

    glide(&mut app, pawn, -10.0);
    assert!(!flying(&app, 0));

    granted.store(true, Ordering::SeqCst);
    send(&mut app, PlayerLifecycleEvent::Spawned { slot: 0, steam_id: 1001 });
    tick(&mut app);
    assert!(state(&app, 0).unwrap().has_permission);
}

#[test]
fn failed_permission_lookup_denies() {
    let mut app = restricted_app(Unreachable);
    let pawn = join(&mut app, 0, 1001);

    glide(&mut app, pawn, -10.0);

    assert!(!state(&app, 0).unwrap().has_permission);
    assert!(!flying(&app, 0));
}

#[test]
fn spawn_without_connect_creates_the_record() {
    let mut app = app_with(settings());
    send(&mut app, PlayerLifecycleEvent::Spawned { slot: 4, steam_id: 1001 });
    tick(&mut app);

    assert!(state(&app, 4).is_some_and(|state| state.has_permission && !state.flying));
}

#[test]
fn releasing_a_prop_twice_is_harmless() {
    let mut app = app_with(settings());
    let pawn = join(&mut app, 0, 1001);
    glide(&mut app, pawn, -10.0);

    send(&mut app, PlayerLifecycleEvent::Died { slot: 0 });
    send(&mut app, PlayerLifecycleEvent::Died { slot: 0 });
    send(&mut app, PlayerLifecycleEvent::Disconnected { slot: 0 });
    send(&mut app, PlayerLifecycleEvent::Disconnected { slot: 0 });
    tick(&mut app);

    assert!(state(&app, 0).is_none());
    assert_eq!(prop_count(&mut app), 0);
}

#[test]
fn prop_already_despawned_by_the_host_is_not_released_again() {
    let mut app = app_with(settings());
    let pawn = join(&mut app, 0, 1001);
    glide(&mut app, pawn, -10.0);

    // Despawning the pawn's hierarchy takes the child prop with it.
    app.world_mut().entity_mut(pawn).despawn_recursive();
    assert_eq!(prop_count(&mut app), 0);

    send(&mut app, PlayerLifecycleEvent::Disconnected { slot: 0 });
    tick(&mut app);
    assert!(state(&app, 0).is_none());
}

#[test]
fn disabling_the_feature_cancels_every_flight_at_once() {
    let mut app = app_with(settings());
    let pawns: Vec<Entity> = (0..3).map(|slot| join(&mut app, slot, 1000 + slot as u64)).collect();
    let idle = join(&mut app, 3, 1003);
    for &pawn in &pawns {
        set_input(&mut app, pawn, true, false, -10.0);
    }
    tick(&mut app);
    assert_eq!(prop_count(&mut app), 3);

    // No schedule runs between the console change and the assertions.
    assert!(apply_parachute_convar(app.world_mut(), "false"));

    assert!(!app.world().resource::<ParachuteToggle>().enabled);
    for (slot, &pawn) in pawns.iter().enumerate() {
        assert!(!flying(&app, slot));
        assert_eq!(gravity(&app, pawn), 1.0);
        assert!(prop_of(&app, slot).is_none());
        assert!(state(&app, slot).is_some());
    }
    assert_eq!(gravity(&app, idle), 1.0);
    assert_eq!(prop_count(&mut app), 0);

    // Use is still held: nothing redeploys until the feature is back on.
    tick(&mut app);
    assert_eq!(prop_count(&mut app), 0);

    assert!(!apply_parachute_convar(app.world_mut(), "maybe"));
    set_parachute_enabled(app.world_mut(), true);
    for &pawn in &pawns {
        set_input(&mut app, pawn, true, false, -10.0);
    }
    tick(&mut app);
    assert_eq!(prop_count(&mut app), 3);
}

#[test]
fn direct_toggle_writes_are_cancelled_every_frame() {
    let mut app = app_with(settings());
    let pawn = join(&mut app, 0, 1001);
    glide(&mut app, pawn, -10.0);
    assert!(flying(&app, 0));

    app.world_mut().resource_mut::<ParachuteToggle>().enabled = false;
    app.world_mut().run_schedule(PreUpdate);

    assert!(!flying(&app, 0));
    assert_eq!(gravity(&app, pawn), 1.0);
    assert_eq!(prop_count(&mut app), 0);
}

#[test]
fn already_connected_players_are_adopted_on_startup() {
    let mut app = app_with(settings());
    app.world_mut().spawn(PlayerBundle::new(0, 1001));
    app.world_mut().spawn(PlayerBundle::new(6, 1006));

    app.world_mut().run_schedule(Startup);

    let table = app.world().resource::<FlightTable>();
    assert_eq!(table.occupied(), 2);
    assert!(table.contains(0));
    assert!(table.contains(6));
}

#[test]
fn configured_model_is_precached() {
    let mut app = app_with(settings());
    tick(&mut app);

    let manifest = app.world().resource::<ResourceManifest>();
    assert_eq!(manifest.items(), [CHUTE_MODEL.to_string()]);
}

#[test]
fn config_edits_are_applied_between_ticks() {
    let mut app = app_with(settings());
    let (tx, rx) = crossbeam_channel::unbounded();
    app.insert_resource(ConfigWatcherReceiver(rx));
    let pawn = join(&mut app, 0, 1001);

    tx.send(
        r#"
        [Parachute.Settings]
        FallSpeed = 40
        Decrease = 10
        Model = "models/chute_v2.vmdl"
        MaxPlayers = 128
        "#
        .to_string(),
    )
    .unwrap();
    glide(&mut app, pawn, -35.0);

    let config = app.world().resource::<FlightConfig>();
    assert_eq!(config.terminal_velocity, -40.0);
    assert_eq!(config.model.as_deref(), Some("models/chute_v2.vmdl"));
    assert_eq!(config.max_players, 8);
    assert!(app.world().resource::<ResourceManifest>().contains("models/chute_v2.vmdl"));
    assert_eq!(velocity_z(&app, pawn), -45.0);

    // A broken edit keeps the previous snapshot.
    tx.send("[Parachute.Settings]\nFallSpeed = -1\n".to_string()).unwrap();
    tick(&mut app);
    assert_eq!(app.world().resource::<FlightConfig>().terminal_velocity, -40.0);
}

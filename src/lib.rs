/*!
# Parachute

Per-player parachute flight assistance for an authoritative game server,
built on Bevy ECS.

While a player holds Use in the air, their fall is driven toward a configured
terminal velocity, gravity is scaled down and a parachute prop is attached to
their pawn. Releasing Use or touching ground folds the parachute and restores
gravity.

## Plugins

- **ParachutePlugin**: entry point; adds everything below plus the flight systems
- **CorePlugin**: ordering of the fixed-tick system sets
- **PlayerPlugin**: host-facing pawn components and lifecycle events
- **ConfigPlugin**: configuration snapshot, precache manifest, hot reload
- **PermissionPlugin**: admin flag lookup

## Host contract

The host spawns a `PlayerBundle` per pawn and keeps its components current.
It sends `PlayerLifecycleEvent`s as players connect, spawn, die and
disconnect, and it forwards the `sv_parachute` console variable through
`apply_parachute_convar`, which cancels every flight as soon as the value turns
off. The flight systems run in `FixedUpdate` and write
back `Velocity::z` and `GravityScale`.
*/

pub mod ecs;

pub use ecs::ParachutePlugin;
pub use ecs::plugins::config::{ConfigError, ConfigFile, FlightConfig, ParachuteSettings, load_config};
pub use ecs::plugins::parachute::{
    FlightTable, ParachuteToggle, PlayerFlightState, apply_parachute_convar, set_parachute_enabled,
};
pub use ecs::plugins::player::{PlayerBundle, PlayerLifecycleEvent};

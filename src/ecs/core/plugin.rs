use bevy::prelude::*;

/// Order of parachute work inside one fixed tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParachuteSet {
    /// Swap in a reloaded configuration snapshot.
    Config,
    /// Drain connect/spawn/death/disconnect events.
    Lifecycle,
    /// Per-pawn flight state machine.
    Flight,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                ParachuteSet::Config,
                ParachuteSet::Lifecycle,
                ParachuteSet::Flight,
            )
                .chain(),
        );
    }
}

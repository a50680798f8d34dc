use crate::ecs::plugins::config::FlightConfig;

/// Vertical velocity for the next tick of a descending pawn under a deployed
/// parachute.
///
/// `Decrease = 0` snaps straight to terminal velocity. In linear mode a pawn
/// already at or past terminal velocity is held there. Otherwise the velocity
/// moves one `Decrease` step toward terminal velocity from whichever side it
/// is on. The step is not clamped, so a large step can carry the velocity past
/// terminal for one tick.
pub fn next_fall_velocity(current: f32, config: &FlightConfig) -> f32 {
    if config.snaps_immediately() || (config.linear && current <= config.terminal_velocity) {
        config.terminal_velocity
    } else if current < config.terminal_velocity {
        current - config.fall_step
    } else {
        current + config.fall_step
    }
}

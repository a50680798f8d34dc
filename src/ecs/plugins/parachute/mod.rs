pub mod components;
pub mod flight;
pub mod lifecycle;
pub mod plugin;
pub mod systems;

pub use components::*;
pub use flight::next_fall_velocity;
pub use lifecycle::FlightLifecycle;
pub use plugin::ParachutePlugin;
pub use systems::{apply_parachute_convar, set_parachute_enabled};

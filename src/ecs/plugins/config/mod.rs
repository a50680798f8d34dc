pub mod components;
pub mod loader;
pub mod plugin;
pub mod systems;
pub mod watcher;

pub use components::*;
pub use loader::{load_config, parse_config};
pub use plugin::ConfigPlugin;

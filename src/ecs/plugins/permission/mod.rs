pub mod components;
pub mod plugin;

pub use components::*;
pub use plugin::PermissionPlugin;

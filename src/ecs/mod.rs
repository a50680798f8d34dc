pub mod core;
pub mod plugins;

pub use self::core::{CorePlugin, ParachuteSet};
pub use plugins::{ConfigPlugin, ParachutePlugin, PermissionPlugin, PlayerPlugin};

pub mod attachment;
pub mod config;
pub mod parachute;
pub mod permission;
pub mod player;

pub use config::ConfigPlugin;
pub use parachute::ParachutePlugin;
pub use permission::PermissionPlugin;
pub use player::PlayerPlugin;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::Attachments;

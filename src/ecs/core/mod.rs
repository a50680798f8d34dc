pub mod plugin;

pub use plugin::{CorePlugin, ParachuteSet};

use std::path::Path;

use crate::ecs::plugins::config::components::{ConfigError, ConfigFile};

/// Reads and parses the config file. A missing file is an error: the server
/// refuses to start without an explicit configuration.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&toml_str)
}

pub fn parse_config(toml_str: &str) -> Result<ConfigFile, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}

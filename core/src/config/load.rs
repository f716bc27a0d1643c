use std::path::Path;

use super::types::BonnetConfig;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "bonnet.toml";

pub fn load_from_path(path: &Path) -> Result<BonnetConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&s, path)
}

/// `./bonnet.toml` if it exists, defaults otherwise.
pub fn load_default() -> Result<BonnetConfig, ConfigError> {
    let local_config = Path::new(DEFAULT_CONFIG_FILE);
    if local_config.exists() {
        load_from_path(local_config)
    } else {
        Ok(BonnetConfig::default())
    }
}

fn parse(s: &str, path: &Path) -> Result<BonnetConfig, ConfigError> {
    toml::from_str::<BonnetConfig>(s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

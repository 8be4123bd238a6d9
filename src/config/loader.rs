use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{ConfigError, KitchenConfig};

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<KitchenConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)))
}

/// Load configuration from `path` if given, otherwise from defaults and the environment
pub fn load_config_or_default(path: Option<&Path>) -> Result<KitchenConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => extract(Figment::from(Serialized::defaults(KitchenConfig::default()))),
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<KitchenConfig, ConfigError> {
    let config: KitchenConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn extract(figment: Figment) -> Result<KitchenConfig, ConfigError> {
    let config: KitchenConfig = figment
        .merge(Env::prefixed("KITCHEN_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

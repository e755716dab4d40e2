use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `CALLMATCH_MATCHING__CONFIDENCE_THRESHOLD`
pub const ENV_PREFIX: &str = "CALLMATCH_";

fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from defaults plus environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

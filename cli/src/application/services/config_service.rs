//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{SctlConfig, apply_config_value};
use crate::domain::{validate_config_key, validate_config_value};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<SctlConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<SctlConfig> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}

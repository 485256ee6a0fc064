//! TabDock configuration system.
//!
//! TOML-based configuration with serde defaults and full validation.
//! Partial configs work out of the box; invalid values fall back to
//! defaults with a logged warning.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::TabdockConfig;
pub use toml_loader::{default_config_path, load_from_path};

use std::path::Path;
use tabdock_common::ConfigError;

/// Load config from the platform default path, creating a default file if
/// none exists.
pub fn load_config() -> Result<TabdockConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path override.
pub fn load_config_from(path: &Path) -> Result<TabdockConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

//! Configuration validation.
//!
//! Validates numeric ranges and the window title, collecting all errors.

use crate::schema::TabdockConfig;
use tabdock_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TabdockConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if config.window.title.trim().is_empty() {
        errors.push("window.title must not be empty".into());
    }

    validate_range(&mut errors, "window.width", config.window.width, 320, 7680);
    validate_range(&mut errors, "window.height", config.window.height, 240, 4320);
    validate_range(
        &mut errors,
        "capture.poll_interval_ms",
        config.capture.poll_interval_ms,
        250,
        30_000,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range<T: PartialOrd + std::fmt::Display>(
    errors: &mut Vec<String>,
    field: &str,
    value: T,
    min: T,
    max: T,
) {
    if value < min || value > max {
        errors.push(format!("{field} must be between {min} and {max}, got {value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&TabdockConfig::default()).is_ok());
    }

    #[test]
    fn rejects_tiny_poll_interval() {
        let mut config = TabdockConfig::default();
        config.capture.poll_interval_ms = 10;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("capture.poll_interval_ms"));
    }

    #[test]
    fn rejects_empty_title() {
        let mut config = TabdockConfig::default();
        config.window.title = "   ".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = TabdockConfig::default();
        config.window.width = 1;
        config.window.height = 1;
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("window.width"));
        assert!(msg.contains("window.height"));
    }
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("window system error: {0}")]
    WindowSystem(String),

    #[error("window not found: 0x{0:x}")]
    WindowNotFound(u64),

    #[error("host window handle error: {0}")]
    HostHandle(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("poll interval out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: poll interval out of range"
        );
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::WindowSystem("connection reset".into());
        assert_eq!(err.to_string(), "window system error: connection reset");

        let err = PlatformError::WindowNotFound(0x2a);
        assert_eq!(err.to_string(), "window not found: 0x2a");

        let err = PlatformError::NotSupported("wayland".into());
        assert_eq!(err.to_string(), "not supported: wayland");
    }
}

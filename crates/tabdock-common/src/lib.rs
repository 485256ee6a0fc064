//! Shared types and errors for TabDock.

pub mod errors;
pub mod types;

pub use errors::{ConfigError, PlatformError};
pub use types::Rect;

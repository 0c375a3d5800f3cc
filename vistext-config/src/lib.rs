//! Configuration system for vistext.
//!
//! This crate provides configuration loading, saving, and default values for
//! the font atlas:
//!
//! - Font file and point size
//! - Optional display DPI override
//! - Log level for the debug log file

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{DpiOverride, LogLevel};

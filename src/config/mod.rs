//! Configuration module
//!
//! This module handles the collector's configuration file, its validation,
//! and resolution into runtime settings.

mod defaults;
mod loading;
mod types;
mod validation;

// Re-export public types
pub use loading::{ConfigSource, load_config, load_config_with_fallback};
pub use types::{CollectorSettings, Config, ProxyEntry};
pub use validation::ConfigError;

// Re-export default functions for use in tests and other modules
pub use defaults::{fetch_timeout, poll_interval};

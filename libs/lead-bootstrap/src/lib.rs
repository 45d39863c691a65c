//! Process bootstrap for the lead capture server: layered configuration,
//! logging initialization and shutdown signal handling.

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{AppConfig, ConfigError, Environment, LogFormat, LoggingConfig, ServerConfig};

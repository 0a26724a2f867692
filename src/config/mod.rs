pub mod env;
mod loader;

pub use env::{AppConfig, ConfigError, Credentials, LoggingConfig, PollerConfig};
pub use loader::{load_config, load_logging_config};

//! Configuration for hosts embedding the navigation core.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{BroadcastConfig, Config, LoggingConfig};

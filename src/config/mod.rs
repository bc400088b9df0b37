#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, GarageCommand, MaintenanceCommand};
pub use toml_config::GarageConfig;

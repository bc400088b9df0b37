pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::GarageConfig;

pub use adapters::{JsonGarageStore, LocalStorage, TracingSignalSink};
pub use core::{
    codec::VehicleCodec, details::DetailsCatalog, engine::GarageEngine, garage::Garage,
};
pub use domain::{
    maintenance::MaintenanceRecord,
    vehicle::{Command, Cue, Outcome, Refusal, Vehicle, VehicleType},
};
pub use utils::error::{GarageError, Result};

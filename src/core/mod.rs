pub mod codec;
pub mod details;
pub mod engine;
pub mod garage;
pub mod schedule;

pub use crate::domain::maintenance::MaintenanceRecord;
pub use crate::domain::ports::{ConfigProvider, GarageStore, SignalSink, Storage};
pub use crate::domain::vehicle::{Command, Cue, Outcome, Refusal, Vehicle, VehicleType};
pub use crate::utils::error::Result;

use crate::domain::record::VehicleRecord;
use crate::domain::vehicle::{Cue, VehicleType};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn garage_file(&self) -> &str;
    fn details_file(&self) -> &str;
    fn default_truck_capacity(&self) -> f64;
}

/// Persistence collaborator. Saving always replaces the whole collection.
#[async_trait]
pub trait GarageStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<VehicleRecord>>;
    async fn save_all(&self, records: &[VehicleRecord]) -> Result<()>;
}

/// Plays the cue for an event. Callers log failures and carry on.
pub trait SignalSink: Send + Sync {
    fn play(&self, kind: VehicleType, cue: Cue) -> Result<()>;
}

use crate::domain::record::VehicleRecord;
use crate::domain::ports::{GarageStore, Storage};
use crate::utils::error::{GarageError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Keeps the whole garage as one JSON array in a single file.
pub struct JsonGarageStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> JsonGarageStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

#[async_trait]
impl<S: Storage> GarageStore for JsonGarageStore<S> {
    /// A missing file is an empty garage. Entries that are not even record-shaped
    /// are skipped and disappear from the file on the next save; a file that is
    /// not a JSON array is an error, so it never gets overwritten by an empty save.
    async fn load_all(&self) -> Result<Vec<VehicleRecord>> {
        let bytes = match self.storage.read_file(&self.file_name).await {
            Ok(bytes) => bytes,
            Err(GarageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No garage file at {}, starting empty", self.file_name);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let Value::Array(items) = serde_json::from_slice::<Value>(&bytes)? else {
            return Err(GarageError::StorageError {
                message: format!("{} does not contain a JSON array", self.file_name),
            });
        };

        let total = items.len();
        let records: Vec<VehicleRecord> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::error!("Skipping unreadable vehicle #{}: {}", index, e);
                    None
                }
            })
            .collect();
        tracing::debug!("Read {}/{} records from {}", records.len(), total, self.file_name);
        if records.len() < total {
            tracing::warn!(
                "{} unreadable entries in {} will not be written back on the next save",
                total - records.len(),
                self.file_name
            );
        }
        Ok(records)
    }

    async fn save_all(&self, records: &[VehicleRecord]) -> Result<()> {
        let data = serde_json::to_vec_pretty(records)?;
        self.storage.write_file(&self.file_name, &data).await?;
        tracing::debug!("Wrote {} records to {}", records.len(), self.file_name);
        Ok(())
    }
}

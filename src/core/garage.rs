use crate::core::codec::VehicleCodec;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::record::VehicleRecord;
use crate::domain::ports::GarageStore;
use crate::domain::vehicle::{Command, Outcome, Refusal, Vehicle};
use crate::utils::error::{GarageError, Result};

/// Ordered collection of vehicles, addressed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Garage {
    vehicles: Vec<Vehicle>,
}

impl Garage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every record it can. Records that fail (unknown type, invalid
    /// fields, repeated id) are logged and left out; the rest still load.
    pub fn from_records(records: &[VehicleRecord], codec: &VehicleCodec) -> Self {
        let mut garage = Self::new();
        for record in records {
            let Some(vehicle) = codec.from_plain(record) else {
                continue;
            };
            if garage.find(vehicle.id()).is_some() {
                tracing::warn!("Skipping vehicle with repeated id {}", vehicle.id());
                continue;
            }
            garage.vehicles.push(vehicle);
        }

        let dropped = records.len() - garage.len();
        if dropped > 0 {
            tracing::warn!(
                "Loaded {} of {} vehicles, {} could not be rebuilt and will not be written back on the next save",
                garage.len(),
                records.len(),
                dropped
            );
        }
        garage
    }

    pub fn to_records(&self, codec: &VehicleCodec) -> Vec<VehicleRecord> {
        self.vehicles.iter().map(|v| codec.to_plain(v)).collect()
    }

    pub async fn load<S: GarageStore + ?Sized>(store: &S, codec: &VehicleCodec) -> Result<Self> {
        let records = store.load_all().await?;
        Ok(Self::from_records(&records, codec))
    }

    pub async fn save<S: GarageStore + ?Sized>(&self, store: &S, codec: &VehicleCodec) -> Result<()> {
        store.save_all(&self.to_records(codec)).await?;
        tracing::debug!("Saved {} vehicles", self.len());
        Ok(())
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id() == id)
    }

    pub fn add(&mut self, vehicle: Vehicle) -> Result<&Vehicle> {
        if self.find(vehicle.id()).is_some() {
            return Err(GarageError::validation(
                "id",
                format!("a vehicle with id {} already exists", vehicle.id()),
            ));
        }
        tracing::info!("Added {} {} ({})", vehicle.kind(), vehicle.model(), vehicle.id());
        self.vehicles.push(vehicle);
        Ok(&self.vehicles[self.vehicles.len() - 1])
    }

    pub fn remove(&mut self, id: &str) -> std::result::Result<Vehicle, Refusal> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.id() == id)
            .ok_or_else(|| vehicle_not_found(id))?;
        let vehicle = self.vehicles.remove(index);
        tracing::info!("Removed {} {} ({})", vehicle.kind(), vehicle.model(), id);
        Ok(vehicle)
    }

    pub fn operate(&mut self, id: &str, command: Command) -> Outcome {
        self.find_mut(id)
            .ok_or_else(|| vehicle_not_found(id))?
            .apply(command)
    }

    pub fn add_maintenance(
        &mut self,
        vehicle_id: &str,
        record: MaintenanceRecord,
    ) -> std::result::Result<(), Refusal> {
        let vehicle = self
            .find_mut(vehicle_id)
            .ok_or_else(|| vehicle_not_found(vehicle_id))?;
        vehicle.add_maintenance(record);
        Ok(())
    }

    pub fn remove_maintenance(
        &mut self,
        vehicle_id: &str,
        record_id: &str,
    ) -> std::result::Result<MaintenanceRecord, Refusal> {
        self.find_mut(vehicle_id)
            .ok_or_else(|| vehicle_not_found(vehicle_id))?
            .remove_maintenance(record_id)
    }
}

fn vehicle_not_found(id: &str) -> Refusal {
    Refusal::VehicleNotFound { id: id.to_string() }
}

use crate::core::codec::VehicleCodec;
use crate::core::garage::Garage;
use crate::core::schedule::{due_soon_alerts, DueSoonAlert};
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::ports::{GarageStore, SignalSink};
use crate::domain::vehicle::{Command, Cue, Outcome, Refusal, Vehicle, VehicleType};
use crate::utils::error::Result;
use chrono::{DateTime, TimeZone};
use std::fmt;

/// Drives one garage: every trigger runs to completion, plays its cue and,
/// when something changed, writes the whole garage back to the store. A failed
/// write leaves the garage as it was before the call.
///
/// The outer `Result` of each method reports persistence failures; the inner
/// one reports refusals, which never touch the store.
pub struct GarageEngine<S: GarageStore, G: SignalSink> {
    store: S,
    signals: G,
    codec: VehicleCodec,
    garage: Garage,
}

impl<S: GarageStore, G: SignalSink> GarageEngine<S, G> {
    pub async fn load(store: S, signals: G, codec: VehicleCodec) -> Result<Self> {
        let garage = Garage::load(&store, &codec).await?;
        tracing::info!("Garage loaded with {} vehicles", garage.len());
        Ok(Self {
            store,
            signals,
            codec,
            garage,
        })
    }

    pub fn garage(&self) -> &Garage {
        &self.garage
    }

    pub async fn reload(&mut self) -> Result<()> {
        self.garage = Garage::load(&self.store, &self.codec).await?;
        Ok(())
    }

    pub async fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<String> {
        let before = self.garage.clone();
        let id = self.garage.add(vehicle)?.id().to_string();
        self.commit(before).await?;
        Ok(id)
    }

    pub async fn remove_vehicle(&mut self, id: &str) -> Result<std::result::Result<Vehicle, Refusal>> {
        let before = self.garage.clone();
        let removed = self.garage.remove(id);
        if removed.is_ok() {
            self.commit(before).await?;
        }
        Ok(removed)
    }

    pub async fn trigger(&mut self, id: &str, command: Command) -> Result<Outcome> {
        let before = self.garage.clone();
        let Some(vehicle) = self.garage.find_mut(id) else {
            return Ok(Err(Refusal::VehicleNotFound { id: id.to_string() }));
        };
        let outcome = vehicle.apply(command);
        let kind = vehicle.kind();

        match &outcome {
            Ok(cue) => {
                if self.garage != before {
                    self.commit(before).await?;
                }
                if let Some(cue) = cue {
                    self.play(kind, *cue);
                }
            }
            Err(refusal) => {
                tracing::warn!("{} refused for {}: {}", command.name(), id, refusal);
            }
        }
        Ok(outcome)
    }

    pub async fn add_maintenance(
        &mut self,
        vehicle_id: &str,
        record: MaintenanceRecord,
    ) -> Result<std::result::Result<(), Refusal>> {
        let before = self.garage.clone();
        let added = self.garage.add_maintenance(vehicle_id, record);
        if added.is_ok() {
            self.commit(before).await?;
        }
        Ok(added)
    }

    pub async fn remove_maintenance(
        &mut self,
        vehicle_id: &str,
        record_id: &str,
    ) -> Result<std::result::Result<MaintenanceRecord, Refusal>> {
        let before = self.garage.clone();
        let removed = self.garage.remove_maintenance(vehicle_id, record_id);
        if removed.is_ok() {
            self.commit(before).await?;
        }
        Ok(removed)
    }

    pub fn due_soon_alerts<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<DueSoonAlert>
    where
        Tz::Offset: fmt::Display,
    {
        due_soon_alerts(self.garage.iter(), now)
    }

    fn play(&self, kind: VehicleType, cue: Cue) {
        if let Err(e) = self.signals.play(kind, cue) {
            tracing::warn!("Could not play {} for {}: {}", cue.event_name(), kind, e);
        }
    }

    /// Saves the current garage, or puts `before` back if the store fails so
    /// memory never holds a change the caller was told did not happen.
    async fn commit(&mut self, before: Garage) -> Result<()> {
        if let Err(e) = self.garage.save(&self.store, &self.codec).await {
            tracing::error!("❌ Save failed, reverting the garage: {}", e);
            self.garage = before;
            return Err(e);
        }
        Ok(())
    }
}

//! Conversion between [`Vehicle`] and its flat persisted [`VehicleRecord`].
//!
//! Broken maintenance entries are dropped one by one and invariants are
//! repaired, so a degraded record still yields a usable vehicle.

use crate::domain::maintenance::{parse_timestamp, MaintenanceRecord};
use crate::domain::record::{MaintenanceEntry, VehicleRecord};
use crate::domain::vehicle::{Variant, Vehicle, VehicleType};
use crate::utils::error::{GarageError, Result};
use chrono::{SecondsFormat, Utc};

pub const DEFAULT_TRUCK_CAPACITY: f64 = 10_000.0;

pub fn maintenance_to_plain(record: &MaintenanceRecord) -> MaintenanceEntry {
    MaintenanceEntry {
        id: Some(record.id().to_string()),
        timestamp: Some(
            record
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ),
        service_type: Some(record.service_type().to_string()),
        cost: Some(record.cost()),
        description: Some(record.description().unwrap_or_default().to_string()),
    }
}

pub fn maintenance_from_plain(entry: &MaintenanceEntry) -> Result<MaintenanceRecord> {
    let raw_timestamp = entry.timestamp.as_deref().unwrap_or_default();
    let timestamp = parse_timestamp(raw_timestamp, &Utc).ok_or_else(|| {
        GarageError::validation("timestamp", format!("'{}' is not a valid date", raw_timestamp))
    })?;
    let cost = entry
        .cost
        .ok_or_else(|| GarageError::validation("cost", "missing or not a number"))?;

    let record = MaintenanceRecord::new(
        timestamp,
        entry.service_type.as_deref().unwrap_or_default(),
        cost,
        entry.description.as_deref(),
    )?;
    Ok(match entry.id.as_deref() {
        Some(id) => record.with_id(id),
        None => record,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct VehicleCodec {
    default_truck_capacity: f64,
}

impl Default for VehicleCodec {
    fn default() -> Self {
        Self::new(DEFAULT_TRUCK_CAPACITY)
    }
}

impl VehicleCodec {
    /// `default_truck_capacity` stands in for trucks persisted without a usable capacity.
    pub fn new(default_truck_capacity: f64) -> Self {
        let default_truck_capacity = if default_truck_capacity.is_finite() && default_truck_capacity > 0.0 {
            default_truck_capacity
        } else {
            DEFAULT_TRUCK_CAPACITY
        };
        Self {
            default_truck_capacity,
        }
    }

    pub fn default_truck_capacity(&self) -> f64 {
        self.default_truck_capacity
    }

    pub fn to_plain(&self, vehicle: &Vehicle) -> VehicleRecord {
        let mut record = VehicleRecord {
            id: Some(vehicle.id().to_string()),
            kind: Some(vehicle.kind().tag().to_string()),
            model: Some(vehicle.model().to_string()),
            color: Some(vehicle.color().to_string()),
            ignition_on: vehicle.is_on(),
            speed: Some(vehicle.speed()),
            turbo_on: None,
            capacity: None,
            current_load: None,
            maintenance: vehicle
                .maintenance_history()
                .iter()
                .map(maintenance_to_plain)
                .collect(),
        };

        match vehicle.variant() {
            Variant::Car => {}
            Variant::SportsCar { turbo_on } => record.turbo_on = Some(*turbo_on),
            Variant::Truck {
                capacity,
                current_load,
            } => {
                record.capacity = Some(*capacity);
                record.current_load = Some(*current_load);
            }
        }
        record
    }

    /// Rebuilds a vehicle, failing only when the tag is unknown or the base fields are invalid.
    pub fn try_from_plain(&self, record: &VehicleRecord) -> Result<Vehicle> {
        let tag = record.kind.as_deref().unwrap_or_default();
        let kind = VehicleType::from_tag(tag).ok_or_else(|| GarageError::UnknownVehicleType {
            tag: tag.to_string(),
        })?;

        let capacity = match kind {
            VehicleType::Truck => Some(
                record
                    .capacity
                    .filter(|capacity| *capacity > 0.0)
                    .unwrap_or(self.default_truck_capacity),
            ),
            _ => None,
        };

        let mut vehicle = Vehicle::new(
            kind,
            record.model.as_deref().unwrap_or_default(),
            record.color.as_deref().unwrap_or_default(),
            capacity,
        )?
        .with_id(record.id.as_deref().unwrap_or_default());

        vehicle.restore_state(
            record.ignition_on,
            record.speed.unwrap_or(0.0),
            record.turbo_on.unwrap_or(false),
            record.current_load.unwrap_or(0.0),
        );

        let history = record
            .maintenance
            .iter()
            .filter_map(|entry| match maintenance_from_plain(entry) {
                Ok(maintenance) => Some(maintenance),
                Err(e) => {
                    tracing::warn!(
                        "Dropping maintenance entry {:?} of vehicle {}: {}",
                        entry.id,
                        vehicle.id(),
                        e
                    );
                    None
                }
            })
            .collect();
        vehicle.restore_history(history);

        Ok(vehicle)
    }

    /// Like [`VehicleCodec::try_from_plain`], logging the failure and returning `None`.
    pub fn from_plain(&self, record: &VehicleRecord) -> Option<Vehicle> {
        match self.try_from_plain(record) {
            Ok(vehicle) => Some(vehicle),
            Err(e) => {
                tracing::error!(
                    "Could not rebuild vehicle {} ({}): {}",
                    record.model.as_deref().unwrap_or("unknown model"),
                    record.kind.as_deref().unwrap_or("no type"),
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn maintained(mut vehicle: Vehicle) -> Vehicle {
        vehicle.add_maintenance(
            MaintenanceRecord::parse("2024-05-10T10:00:00Z", "Oil change", 150.0, Some("synthetic"))
                .unwrap(),
        );
        vehicle.add_maintenance(
            MaintenanceRecord::parse("2031-01-02T08:30:00.123Z", "Inspection", 80.5, None).unwrap(),
        );
        vehicle
    }

    #[test]
    fn test_round_trip_each_variant() {
        let codec = VehicleCodec::default();

        let mut car = maintained(Vehicle::car("Civic", "Red").unwrap());
        car.turn_on().unwrap();
        car.accelerate().unwrap();

        let mut ferrari = maintained(Vehicle::sports_car("F40", "Yellow").unwrap());
        ferrari.turn_on().unwrap();
        ferrari.activate_turbo().unwrap();

        let mut truck = maintained(Vehicle::truck("Actros", "White", 2500.0).unwrap());
        truck.load(1200.5).unwrap();

        for vehicle in [car, ferrari, truck] {
            let plain = codec.to_plain(&vehicle);
            let json = serde_json::to_string(&plain).unwrap();
            let parsed: VehicleRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(codec.try_from_plain(&parsed).unwrap(), vehicle);
        }
    }

    #[test]
    fn test_plain_record_uses_stored_field_names() {
        let truck = Vehicle::truck("Actros", "White", 1000.0).unwrap();
        let value = serde_json::to_value(VehicleCodec::default().to_plain(&truck)).unwrap();
        assert_eq!(value["tipoVeiculo"], "Caminhao");
        assert_eq!(value["modelo"], "Actros");
        assert_eq!(value["cor"], "White");
        assert_eq!(value["ligado"], false);
        assert_eq!(value["capacidadeCarga"], 1000.0);
        assert_eq!(value["cargaAtual"], 0.0);
        assert!(value.get("turboAtivado").is_none());
    }

    #[test]
    fn test_unknown_tag_yields_no_vehicle() {
        let record: VehicleRecord =
            serde_json::from_value(json!({"tipoVeiculo": "Moto", "modelo": "CG", "cor": "Red"}))
                .unwrap();
        let codec = VehicleCodec::default();
        assert!(matches!(
            codec.try_from_plain(&record),
            Err(GarageError::UnknownVehicleType { .. })
        ));
        assert!(codec.from_plain(&record).is_none());
    }

    #[test]
    fn test_truck_without_capacity_gets_default() {
        let codec = VehicleCodec::new(7500.0);
        for capacity in [json!(null), json!(0), json!(-3), json!("abc")] {
            let record: VehicleRecord = serde_json::from_value(json!({
                "tipoVeiculo": "Caminhao", "modelo": "Actros", "cor": "White",
                "capacidadeCarga": capacity
            }))
            .unwrap();
            let truck = codec.try_from_plain(&record).unwrap();
            assert_eq!(truck.capacity(), Some(7500.0));
        }
    }

    #[test]
    fn test_invalid_codec_default_falls_back() {
        assert_eq!(VehicleCodec::new(0.0).default_truck_capacity(), DEFAULT_TRUCK_CAPACITY);
    }

    #[test]
    fn test_numeric_fields_are_coerced() {
        let record: VehicleRecord = serde_json::from_value(json!({
            "id": "v-legacy",
            "tipoVeiculo": "Caminhao", "modelo": "Actros", "cor": "White",
            "ligado": true,
            "velocidade": "12.5",
            "capacidadeCarga": "5000",
            "cargaAtual": "oops"
        }))
        .unwrap();
        let truck = VehicleCodec::default().try_from_plain(&record).unwrap();
        assert_eq!(truck.id(), "v-legacy");
        assert!(truck.is_on());
        assert_eq!(truck.speed(), 12.5);
        assert_eq!(truck.capacity(), Some(5000.0));
        assert_eq!(truck.current_load(), Some(0.0));
    }

    #[test]
    fn test_bad_maintenance_entries_are_dropped() {
        let record: VehicleRecord = serde_json::from_value(json!({
            "tipoVeiculo": "Carro", "modelo": "Civic", "cor": "Red",
            "historicoManutencao": [
                {"id": "m-1", "data": "2024-01-01T00:00:00.000Z", "tipo": "Oil", "custo": 100},
                {"id": "m-2", "data": "never", "tipo": "Oil", "custo": 100},
                {"id": "m-3", "data": "2024-02-01T00:00:00.000Z", "tipo": "", "custo": 100},
                {"id": "m-4", "data": "2024-03-01T00:00:00.000Z", "tipo": "Tyres", "custo": "-5"},
                "not an object",
                {"id": "m-5", "data": "2024-04-01T00:00:00.000Z", "tipo": "Tyres", "custo": "320.90"}
            ]
        }))
        .unwrap();
        let car = VehicleCodec::default().try_from_plain(&record).unwrap();
        let ids: Vec<&str> = car.maintenance_history().iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["m-5", "m-1"]);
    }

    #[test]
    fn test_invalid_base_fields_fail_the_vehicle() {
        let record: VehicleRecord =
            serde_json::from_value(json!({"tipoVeiculo": "Carro", "modelo": " ", "cor": "Red"}))
                .unwrap();
        assert!(VehicleCodec::default().from_plain(&record).is_none());
    }

    #[test]
    fn test_missing_history_is_empty() {
        let record: VehicleRecord = serde_json::from_value(json!({
            "tipoVeiculo": "CarroEsportivo", "modelo": "F40", "cor": "Red",
            "historicoManutencao": "corrupted",
            "turboAtivado": true
        }))
        .unwrap();
        let ferrari = VehicleCodec::default().try_from_plain(&record).unwrap();
        assert!(ferrari.maintenance_history().is_empty());
        // ignition is off, so the stored turbo flag cannot survive
        assert!(!ferrari.turbo_on());
    }
}

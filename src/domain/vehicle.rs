use crate::domain::generate_id;
use crate::domain::maintenance::{sort_newest_first, MaintenanceRecord};
use crate::utils::error::{GarageError, Result};
use crate::utils::validation::{require_positive, require_text};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CAR_ACCELERATION: f64 = 10.0;
const CAR_BRAKING: f64 = 10.0;
const SPORTS_ACCELERATION: f64 = 15.0;
const SPORTS_TURBO_ACCELERATION: f64 = 30.0;

/// Which kind of vehicle a record describes. The tag is what gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Car,
    SportsCar,
    Truck,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [VehicleType::Car, VehicleType::SportsCar, VehicleType::Truck];

    /// Discriminator stored in every persisted vehicle. Changing these breaks saved garages.
    pub fn tag(self) -> &'static str {
        match self {
            VehicleType::Car => "Carro",
            VehicleType::SportsCar => "CarroEsportivo",
            VehicleType::Truck => "Caminhao",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::SportsCar => "Sports Car",
            VehicleType::Truck => "Truck",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleType {
    type Err = GarageError;

    /// Accepts the persisted tags as well as friendlier spellings (`car`, `sports-car`, `truck`).
    fn from_str(s: &str) -> Result<Self> {
        if let Some(kind) = Self::from_tag(s) {
            return Ok(kind);
        }
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "car" | "carro" => Ok(VehicleType::Car),
            "sportscar" | "carroesportivo" => Ok(VehicleType::SportsCar),
            "truck" | "caminhao" => Ok(VehicleType::Truck),
            _ => Err(GarageError::UnknownVehicleType { tag: s.to_string() }),
        }
    }
}

/// State only some kinds of vehicle carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Car,
    SportsCar { turbo_on: bool },
    Truck { capacity: f64, current_load: f64 },
}

impl Variant {
    pub fn kind(&self) -> VehicleType {
        match self {
            Variant::Car => VehicleType::Car,
            Variant::SportsCar { .. } => VehicleType::SportsCar,
            Variant::Truck { .. } => VehicleType::Truck,
        }
    }
}

/// Audio/visual cue an operation asks the signal collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    IgnitionStart,
    Accelerate,
    Turbo,
    Horn(VehicleType),
}

impl Cue {
    pub fn event_name(&self) -> String {
        match self {
            Cue::IgnitionStart => "ignitionStart".to_string(),
            Cue::Accelerate => "accelerate".to_string(),
            Cue::Turbo => "turbo".to_string(),
            Cue::Horn(kind) => format!("horn-{}", kind.tag()),
        }
    }
}

/// Why an operation was turned down. The vehicle is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Refusal {
    #[error("the {kind} must be turned on to {action}")]
    IgnitionOff {
        kind: VehicleType,
        action: &'static str,
    },

    #[error("the turbo is already active")]
    TurboAlreadyActive,

    #[error("{operation} is not available for a {kind}")]
    NotSupported {
        kind: VehicleType,
        operation: &'static str,
    },

    #[error("quantity must be a positive number, got {quantity}")]
    InvalidQuantity { quantity: f64 },

    #[error("cannot load {requested}kg: capacity of {capacity}kg exceeded (current load {current}kg)")]
    CapacityExceeded {
        requested: f64,
        current: f64,
        capacity: f64,
    },

    #[error("cannot unload {requested}kg: current load is only {current}kg")]
    InsufficientLoad { requested: f64, current: f64 },

    #[error("maintenance record not found: {id}")]
    MaintenanceNotFound { id: String },

    #[error("vehicle not found: {id}")]
    VehicleNotFound { id: String },
}

/// Result of an operation: the cue to play on success, or the refusal.
pub type Outcome = std::result::Result<Option<Cue>, Refusal>;

/// One externally triggered vehicle operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TurnOn,
    TurnOff,
    ToggleIgnition,
    Accelerate,
    Brake,
    Honk,
    ActivateTurbo,
    DeactivateTurbo,
    Load(f64),
    Unload(f64),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::TurnOn => "turn-on",
            Command::TurnOff => "turn-off",
            Command::ToggleIgnition => "toggle",
            Command::Accelerate => "accelerate",
            Command::Brake => "brake",
            Command::Honk => "honk",
            Command::ActivateTurbo => "turbo-on",
            Command::DeactivateTurbo => "turbo-off",
            Command::Load(_) => "load",
            Command::Unload(_) => "unload",
        }
    }

    /// Builds a command from its name; `load`/`unload` need a quantity.
    pub fn parse(name: &str, quantity: Option<f64>) -> Result<Self> {
        let needs_quantity = |field: &str| {
            quantity.ok_or_else(|| GarageError::validation(field, "a quantity is required"))
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "turn-on" | "on" => Ok(Command::TurnOn),
            "turn-off" | "off" => Ok(Command::TurnOff),
            "toggle" => Ok(Command::ToggleIgnition),
            "accelerate" => Ok(Command::Accelerate),
            "brake" => Ok(Command::Brake),
            "honk" => Ok(Command::Honk),
            "turbo-on" => Ok(Command::ActivateTurbo),
            "turbo-off" => Ok(Command::DeactivateTurbo),
            "load" => Ok(Command::Load(needs_quantity("load quantity")?)),
            "unload" => Ok(Command::Unload(needs_quantity("unload quantity")?)),
            other => Err(GarageError::validation(
                "command",
                format!("unknown command '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: String,
    model: String,
    color: String,
    ignition_on: bool,
    speed: f64,
    variant: Variant,
    maintenance_history: Vec<MaintenanceRecord>,
}

impl Vehicle {
    /// Validates and builds a vehicle in its initial state: off, stopped, empty.
    /// `capacity` is only read for trucks, which require it.
    pub fn new(kind: VehicleType, model: &str, color: &str, capacity: Option<f64>) -> Result<Self> {
        let model = require_text("model", model)?;
        let color = require_text("color", color)?;
        let variant = match kind {
            VehicleType::Car => Variant::Car,
            VehicleType::SportsCar => Variant::SportsCar { turbo_on: false },
            VehicleType::Truck => {
                let capacity = capacity
                    .ok_or_else(|| GarageError::validation("capacity", "a truck needs a capacity"))?;
                Variant::Truck {
                    capacity: require_positive("capacity", capacity)?,
                    current_load: 0.0,
                }
            }
        };

        Ok(Self {
            id: generate_id("v"),
            model,
            color,
            ignition_on: false,
            speed: 0.0,
            variant,
            maintenance_history: Vec::new(),
        })
    }

    pub fn car(model: &str, color: &str) -> Result<Self> {
        Self::new(VehicleType::Car, model, color, None)
    }

    pub fn sports_car(model: &str, color: &str) -> Result<Self> {
        Self::new(VehicleType::SportsCar, model, color, None)
    }

    pub fn truck(model: &str, color: &str, capacity: f64) -> Result<Self> {
        Self::new(VehicleType::Truck, model, color, Some(capacity))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn kind(&self) -> VehicleType {
        self.variant.kind()
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn is_on(&self) -> bool {
        self.ignition_on
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn turbo_on(&self) -> bool {
        matches!(self.variant, Variant::SportsCar { turbo_on: true })
    }

    pub fn capacity(&self) -> Option<f64> {
        match self.variant {
            Variant::Truck { capacity, .. } => Some(capacity),
            _ => None,
        }
    }

    pub fn current_load(&self) -> Option<f64> {
        match self.variant {
            Variant::Truck { current_load, .. } => Some(current_load),
            _ => None,
        }
    }

    pub fn maintenance_history(&self) -> &[MaintenanceRecord] {
        &self.maintenance_history
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::TurnOn => self.turn_on(),
            Command::TurnOff => self.turn_off(),
            Command::ToggleIgnition => self.toggle_ignition(),
            Command::Accelerate => self.accelerate(),
            Command::Brake => self.brake(),
            Command::Honk => self.honk(),
            Command::ActivateTurbo => self.activate_turbo(),
            Command::DeactivateTurbo => self.deactivate_turbo(),
            Command::Load(quantity) => self.load(quantity),
            Command::Unload(quantity) => self.unload(quantity),
        }
    }

    pub fn turn_on(&mut self) -> Outcome {
        if self.ignition_on {
            return Ok(None);
        }
        self.ignition_on = true;
        tracing::debug!("{} {} turned on", self.kind(), self.model);
        Ok(Some(Cue::IgnitionStart))
    }

    pub fn turn_off(&mut self) -> Outcome {
        if !self.ignition_on {
            return Ok(None);
        }
        self.ignition_on = false;
        self.speed = 0.0;
        if let Variant::SportsCar { turbo_on } = &mut self.variant {
            *turbo_on = false;
        }
        tracing::debug!("{} {} turned off", self.kind(), self.model);
        Ok(None)
    }

    pub fn toggle_ignition(&mut self) -> Outcome {
        if self.ignition_on {
            self.turn_off()
        } else {
            self.turn_on()
        }
    }

    pub fn accelerate(&mut self) -> Outcome {
        self.require_ignition("accelerate")?;
        let delta = match self.variant {
            Variant::Car => CAR_ACCELERATION,
            Variant::SportsCar { turbo_on: true } => SPORTS_TURBO_ACCELERATION,
            Variant::SportsCar { turbo_on: false } => SPORTS_ACCELERATION,
            Variant::Truck {
                capacity,
                current_load,
            } => {
                let load_factor = (1.0 - current_load / (capacity * 1.5)).max(0.2);
                (5.0 * load_factor).max(1.0)
            }
        };
        self.speed += delta;
        tracing::debug!("{} {} accelerated to {:.1}", self.kind(), self.model, self.speed);
        Ok(Some(Cue::Accelerate))
    }

    pub fn brake(&mut self) -> Outcome {
        self.require_ignition("brake")?;
        let delta = match self.variant {
            Variant::Car | Variant::SportsCar { .. } => CAR_BRAKING,
            Variant::Truck {
                capacity,
                current_load,
            } => {
                let brake_factor = (1.0 - current_load / (capacity * 2.0)).max(0.3);
                (8.0 * brake_factor).max(2.0)
            }
        };
        self.speed = (self.speed - delta).max(0.0);
        tracing::debug!("{} {} slowed to {:.1}", self.kind(), self.model, self.speed);
        Ok(None)
    }

    pub fn honk(&self) -> Outcome {
        Ok(Some(Cue::Horn(self.kind())))
    }

    pub fn activate_turbo(&mut self) -> Outcome {
        let kind = self.kind();
        let ignition_on = self.ignition_on;
        match &mut self.variant {
            Variant::SportsCar { turbo_on } => {
                if !ignition_on {
                    return Err(Refusal::IgnitionOff {
                        kind,
                        action: "activate the turbo",
                    });
                }
                if *turbo_on {
                    return Err(Refusal::TurboAlreadyActive);
                }
                *turbo_on = true;
                Ok(Some(Cue::Turbo))
            }
            _ => Err(Refusal::NotSupported {
                kind,
                operation: "turbo",
            }),
        }
    }

    pub fn deactivate_turbo(&mut self) -> Outcome {
        let kind = self.kind();
        match &mut self.variant {
            Variant::SportsCar { turbo_on } => {
                *turbo_on = false;
                Ok(None)
            }
            _ => Err(Refusal::NotSupported {
                kind,
                operation: "turbo",
            }),
        }
    }

    pub fn load(&mut self, quantity: f64) -> Outcome {
        let kind = self.kind();
        let Variant::Truck {
            capacity,
            current_load,
        } = &mut self.variant
        else {
            return Err(Refusal::NotSupported {
                kind,
                operation: "loading",
            });
        };
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(Refusal::InvalidQuantity { quantity });
        }
        if *current_load + quantity > *capacity {
            return Err(Refusal::CapacityExceeded {
                requested: quantity,
                current: *current_load,
                capacity: *capacity,
            });
        }
        *current_load += quantity;
        tracing::debug!("Loaded {}kg, current load {}kg", quantity, current_load);
        Ok(None)
    }

    pub fn unload(&mut self, quantity: f64) -> Outcome {
        let kind = self.kind();
        let Variant::Truck { current_load, .. } = &mut self.variant else {
            return Err(Refusal::NotSupported {
                kind,
                operation: "unloading",
            });
        };
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(Refusal::InvalidQuantity { quantity });
        }
        if *current_load - quantity < 0.0 {
            return Err(Refusal::InsufficientLoad {
                requested: quantity,
                current: *current_load,
            });
        }
        *current_load -= quantity;
        tracing::debug!("Unloaded {}kg, current load {}kg", quantity, current_load);
        Ok(None)
    }

    pub fn add_maintenance(&mut self, record: MaintenanceRecord) {
        self.maintenance_history.push(record);
        sort_newest_first(&mut self.maintenance_history);
    }

    pub fn remove_maintenance(&mut self, record_id: &str) -> std::result::Result<MaintenanceRecord, Refusal> {
        let index = self
            .maintenance_history
            .iter()
            .position(|record| record.id() == record_id)
            .ok_or_else(|| Refusal::MaintenanceNotFound {
                id: record_id.to_string(),
            })?;
        Ok(self.maintenance_history.remove(index))
    }

    pub fn find_maintenance(&self, record_id: &str) -> Option<&MaintenanceRecord> {
        self.maintenance_history
            .iter()
            .find(|record| record.id() == record_id)
    }

    fn require_ignition(&self, action: &'static str) -> std::result::Result<(), Refusal> {
        if self.ignition_on {
            Ok(())
        } else {
            Err(Refusal::IgnitionOff {
                kind: self.kind(),
                action,
            })
        }
    }

    pub(crate) fn with_id(mut self, id: &str) -> Self {
        if !id.trim().is_empty() {
            self.id = id.to_string();
        }
        self
    }

    /// Puts persisted state back, repairing anything that would break the invariants:
    /// speed never negative, turbo only with ignition, load within capacity.
    pub(crate) fn restore_state(&mut self, ignition_on: bool, speed: f64, turbo: bool, load: f64) {
        self.ignition_on = ignition_on;
        self.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        match &mut self.variant {
            Variant::Car => {}
            Variant::SportsCar { turbo_on } => *turbo_on = turbo && ignition_on,
            Variant::Truck {
                capacity,
                current_load,
            } => {
                let load = if load.is_finite() { load } else { 0.0 };
                if load < 0.0 || load > *capacity {
                    tracing::warn!(
                        "Stored load {}kg outside 0..={}kg for truck {}, clamping",
                        load,
                        capacity,
                        self.id
                    );
                }
                *current_load = load.clamp(0.0, *capacity);
            }
        }
    }

    pub(crate) fn restore_history(&mut self, records: Vec<MaintenanceRecord>) {
        self.maintenance_history = records;
        sort_newest_first(&mut self.maintenance_history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str) -> MaintenanceRecord {
        MaintenanceRecord::parse(timestamp, "Inspection", 100.0, None).unwrap()
    }

    #[test]
    fn test_car_accelerate_and_brake() {
        let mut car = Vehicle::car("Civic", "Red").unwrap();
        car.turn_on().unwrap();
        car.accelerate().unwrap();
        car.accelerate().unwrap();
        assert_eq!(car.speed(), 20.0);
        car.brake().unwrap();
        assert_eq!(car.speed(), 10.0);
        car.brake().unwrap();
        car.brake().unwrap();
        assert_eq!(car.speed(), 0.0);
    }

    #[test]
    fn test_operations_require_ignition() {
        let mut car = Vehicle::car("Civic", "Red").unwrap();
        assert!(matches!(
            car.accelerate(),
            Err(Refusal::IgnitionOff { action: "accelerate", .. })
        ));
        assert!(matches!(car.brake(), Err(Refusal::IgnitionOff { .. })));
        assert_eq!(car.speed(), 0.0);
    }

    #[test]
    fn test_turn_on_and_off_are_idempotent() {
        let mut car = Vehicle::car("Civic", "Red").unwrap();
        assert_eq!(car.turn_on(), Ok(Some(Cue::IgnitionStart)));
        assert_eq!(car.turn_on(), Ok(None));
        car.accelerate().unwrap();
        assert_eq!(car.turn_off(), Ok(None));
        assert_eq!(car.speed(), 0.0);
        assert_eq!(car.turn_off(), Ok(None));
        assert!(!car.is_on());
    }

    #[test]
    fn test_toggle_ignition() {
        let mut car = Vehicle::car("Civic", "Red").unwrap();
        car.toggle_ignition().unwrap();
        assert!(car.is_on());
        car.toggle_ignition().unwrap();
        assert!(!car.is_on());
    }

    #[test]
    fn test_sports_car_turbo() {
        let mut ferrari = Vehicle::sports_car("F40", "Red").unwrap();
        assert!(matches!(ferrari.activate_turbo(), Err(Refusal::IgnitionOff { .. })));

        ferrari.turn_on().unwrap();
        assert_eq!(ferrari.activate_turbo(), Ok(Some(Cue::Turbo)));
        assert_eq!(ferrari.activate_turbo(), Err(Refusal::TurboAlreadyActive));
        ferrari.accelerate().unwrap();
        assert_eq!(ferrari.speed(), 30.0);

        ferrari.deactivate_turbo().unwrap();
        ferrari.accelerate().unwrap();
        assert_eq!(ferrari.speed(), 45.0);

        ferrari.activate_turbo().unwrap();
        ferrari.turn_off().unwrap();
        assert!(!ferrari.turbo_on());
        assert_eq!(ferrari.speed(), 0.0);
    }

    #[test]
    fn test_truck_loading_respects_capacity() {
        let mut truck = Vehicle::truck("Actros", "White", 1000.0).unwrap();
        assert!(matches!(truck.load(1200.0), Err(Refusal::CapacityExceeded { .. })));
        assert_eq!(truck.current_load(), Some(0.0));
        truck.load(600.0).unwrap();
        assert_eq!(truck.current_load(), Some(600.0));
        assert!(matches!(truck.load(500.0), Err(Refusal::CapacityExceeded { .. })));
        assert_eq!(truck.current_load(), Some(600.0));
        truck.load(400.0).unwrap();
        assert_eq!(truck.current_load(), Some(1000.0));
    }

    #[test]
    fn test_truck_unloading() {
        let mut truck = Vehicle::truck("Actros", "White", 1000.0).unwrap();
        truck.load(300.0).unwrap();
        assert!(matches!(truck.unload(400.0), Err(Refusal::InsufficientLoad { .. })));
        truck.unload(300.0).unwrap();
        assert_eq!(truck.current_load(), Some(0.0));
        assert!(matches!(truck.unload(0.0), Err(Refusal::InvalidQuantity { .. })));
        assert!(matches!(truck.load(-5.0), Err(Refusal::InvalidQuantity { .. })));
    }

    #[test]
    fn test_truck_physics_degrade_with_load() {
        let mut truck = Vehicle::truck("Actros", "White", 1000.0).unwrap();
        truck.turn_on().unwrap();
        truck.accelerate().unwrap();
        assert_eq!(truck.speed(), 5.0);

        truck.turn_off().unwrap();
        truck.load(1000.0).unwrap();
        truck.turn_on().unwrap();
        truck.accelerate().unwrap();
        // factor = max(0.2, 1 - 1000/1500) = 1/3
        assert!((truck.speed() - 5.0 / 3.0).abs() < 1e-9);

        truck.accelerate().unwrap();
        truck.accelerate().unwrap();
        truck.accelerate().unwrap();
        let before = truck.speed();
        truck.brake().unwrap();
        // factor = max(0.3, 1 - 1000/2000) = 0.5, delta = max(2, 4) = 4
        assert!((before - truck.speed() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_variant_only_commands_are_refused_elsewhere() {
        let mut car = Vehicle::car("Civic", "Red").unwrap();
        car.turn_on().unwrap();
        assert!(matches!(car.activate_turbo(), Err(Refusal::NotSupported { .. })));
        assert!(matches!(car.load(10.0), Err(Refusal::NotSupported { .. })));
        let mut truck = Vehicle::truck("Actros", "White", 1000.0).unwrap();
        assert!(matches!(truck.deactivate_turbo(), Err(Refusal::NotSupported { .. })));
    }

    #[test]
    fn test_constructor_validation() {
        assert!(Vehicle::car("", "Red").is_err());
        assert!(Vehicle::car("Civic", "  ").is_err());
        assert!(Vehicle::truck("Actros", "White", 0.0).is_err());
        assert!(Vehicle::new(VehicleType::Truck, "Actros", "White", None).is_err());

        let car = Vehicle::car("  Civic ", " Red ").unwrap();
        assert_eq!(car.model(), "Civic");
        assert_eq!(car.color(), "Red");
        assert!(car.id().starts_with("v-"));
    }

    #[test]
    fn test_honk_cue_per_variant() {
        let truck = Vehicle::truck("Actros", "White", 1000.0).unwrap();
        let cue = truck.honk().unwrap().unwrap();
        assert_eq!(cue.event_name(), "horn-Caminhao");
    }

    #[test]
    fn test_maintenance_kept_newest_first() {
        let mut car = Vehicle::car("Civic", "Red").unwrap();
        car.add_maintenance(record("2024-03-01"));
        car.add_maintenance(record("2024-09-01"));
        car.add_maintenance(record("2023-12-25"));
        let stamps: Vec<_> = car.maintenance_history().iter().map(|r| r.timestamp()).collect();
        assert!(stamps.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_remove_maintenance() {
        let mut car = Vehicle::car("Civic", "Red").unwrap();
        let entry = record("2024-03-01");
        let id = entry.id().to_string();
        car.add_maintenance(entry);
        assert!(car.find_maintenance(&id).is_some());
        assert!(matches!(
            car.remove_maintenance("m-missing"),
            Err(Refusal::MaintenanceNotFound { .. })
        ));
        assert_eq!(car.remove_maintenance(&id).unwrap().id(), id);
        assert!(car.maintenance_history().is_empty());
    }

    #[test]
    fn test_vehicle_type_tags_and_parsing() {
        for kind in VehicleType::ALL {
            assert_eq!(VehicleType::from_tag(kind.tag()), Some(kind));
            assert_eq!(kind.tag().parse::<VehicleType>().unwrap(), kind);
        }
        assert_eq!("sports-car".parse::<VehicleType>().unwrap(), VehicleType::SportsCar);
        assert_eq!("Truck".parse::<VehicleType>().unwrap(), VehicleType::Truck);
        assert!("Moto".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("accelerate", None).unwrap(), Command::Accelerate);
        assert_eq!(Command::parse("load", Some(50.0)).unwrap(), Command::Load(50.0));
        assert!(Command::parse("load", None).is_err());
        assert!(Command::parse("fly", None).is_err());
    }

    #[test]
    fn test_restore_state_repairs_invariants() {
        let mut ferrari = Vehicle::sports_car("F40", "Red").unwrap();
        ferrari.restore_state(false, -20.0, true, 0.0);
        assert_eq!(ferrari.speed(), 0.0);
        assert!(!ferrari.turbo_on());

        let mut truck = Vehicle::truck("Actros", "White", 1000.0).unwrap();
        truck.restore_state(true, 12.5, false, 1500.0);
        assert_eq!(truck.current_load(), Some(1000.0));
        assert_eq!(truck.speed(), 12.5);
    }
}

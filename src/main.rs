use chrono::Local;
use clap::Parser;
use smart_garage::config::{GarageCommand, MaintenanceCommand};
use smart_garage::core::schedule::{future_appointments, past_history};
use smart_garage::core::ConfigProvider;
use smart_garage::domain::maintenance::parse_timestamp;
use smart_garage::utils::error::ErrorSeverity;
use smart_garage::utils::{logger, validation::Validate};
use smart_garage::{
    CliConfig, Command, DetailsCatalog, GarageConfig, GarageEngine, GarageError, JsonGarageStore,
    LocalStorage, MaintenanceRecord, TracingSignalSink, Vehicle, VehicleCodec, VehicleType,
};

type Engine = GarageEngine<JsonGarageStore<LocalStorage>, TracingSignalSink>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = match GarageConfig::from_file_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    if config.logging.format == "json" {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.data_dir().to_string());
    let store = JsonGarageStore::new(storage.clone(), config.garage_file());
    let codec = VehicleCodec::new(config.default_truck_capacity());

    let result = async {
        let mut engine = GarageEngine::load(store, TracingSignalSink, codec).await?;
        run(&mut engine, &config, storage, cli.command).await
    }
    .await;

    if let Err(e) = result {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(
    engine: &mut Engine,
    config: &GarageConfig,
    storage: LocalStorage,
    command: GarageCommand,
) -> Result<(), GarageError> {
    match command {
        GarageCommand::List => {
            if engine.garage().is_empty() {
                println!("No vehicles in the garage.");
            }
            for vehicle in engine.garage().iter() {
                println!(
                    "{}  {}: {} ({})",
                    vehicle.id(),
                    vehicle.kind(),
                    vehicle.model(),
                    vehicle.color()
                );
            }
        }
        GarageCommand::Show { id } => {
            let vehicle = find(engine, &id)?;
            print_vehicle(vehicle);
            print_schedule(vehicle);
        }
        GarageCommand::Add {
            kind,
            model,
            color,
            capacity,
        } => {
            let kind: VehicleType = kind.parse()?;
            let vehicle = Vehicle::new(kind, &model, &color, capacity)?;
            let id = engine.add_vehicle(vehicle).await?;
            println!("✅ {} \"{}\" added to the garage ({})", kind, model.trim(), id);
        }
        GarageCommand::Remove { id } => match engine.remove_vehicle(&id).await? {
            Ok(vehicle) => println!("✅ {} removed", vehicle.model()),
            Err(refusal) => println!("⚠️  {}", refusal),
        },
        GarageCommand::Op {
            id,
            operation,
            quantity,
        } => {
            let command = Command::parse(&operation, quantity)?;
            match engine.trigger(&id, command).await? {
                Ok(_) => print_vehicle(find(engine, &id)?),
                Err(refusal) => println!("⚠️  {}", refusal),
            }
        }
        GarageCommand::Maintenance { action } => match action {
            MaintenanceCommand::Add {
                vehicle_id,
                date,
                time,
                service,
                cost,
                description,
            } => {
                let input = MaintenanceCommand::timestamp_input(&date, time.as_deref());
                let timestamp = parse_timestamp(&input, &Local).ok_or_else(|| {
                    GarageError::validation("timestamp", format!("'{}' is not a valid date", input))
                })?;
                let record =
                    MaintenanceRecord::new(timestamp, &service, cost, description.as_deref())?;
                let record_id = record.id().to_string();
                match engine.add_maintenance(&vehicle_id, record).await? {
                    Ok(()) => println!("✅ Maintenance {} recorded", record_id),
                    Err(refusal) => println!("⚠️  {}", refusal),
                }
            }
            MaintenanceCommand::Remove {
                vehicle_id,
                record_id,
            } => match engine.remove_maintenance(&vehicle_id, &record_id).await? {
                Ok(record) => println!("✅ {} removed", record.service_type()),
                Err(refusal) => println!("⚠️  {}", refusal),
            },
        },
        GarageCommand::History { id } => print_schedule(find(engine, &id)?),
        GarageCommand::Alerts => {
            let alerts = engine.due_soon_alerts(&Local::now());
            if alerts.is_empty() {
                println!("No appointments today or tomorrow.");
            } else {
                println!("Appointment reminders:");
                for alert in alerts {
                    println!("  {}", alert);
                }
            }
        }
        GarageCommand::Details { id } => {
            find(engine, &id)?;
            let catalog = DetailsCatalog::new(storage, config.details_file());
            match catalog.find(&id).await {
                Some(details) => println!("{}", details),
                None => println!("No extra details found for {}.", id),
            }
        }
    }
    Ok(())
}

fn find<'a>(engine: &'a Engine, id: &str) -> Result<&'a Vehicle, GarageError> {
    engine
        .garage()
        .find(id)
        .ok_or_else(|| GarageError::not_found("Vehicle", id))
}

fn print_vehicle(vehicle: &Vehicle) {
    println!("{}: {} ({})", vehicle.kind(), vehicle.model(), vehicle.color());
    println!("  id:     {}", vehicle.id());
    println!("  status: {}", if vehicle.is_on() { "on" } else { "off" });
    println!("  speed:  {:.1} km/h", vehicle.speed());
    if vehicle.kind() == VehicleType::SportsCar {
        println!("  turbo:  {}", if vehicle.turbo_on() { "active" } else { "inactive" });
    }
    if let (Some(capacity), Some(load)) = (vehicle.capacity(), vehicle.current_load()) {
        println!("  load:   {}kg / {}kg", load, capacity);
    }
}

fn print_schedule(vehicle: &Vehicle) {
    let now = Local::now();

    println!("Maintenance history:");
    let history = past_history(vehicle, &now);
    if history.is_empty() {
        println!("  none");
    }
    for entry in history {
        println!("  [{}] {}", entry.id, entry.text);
    }

    println!("Upcoming appointments:");
    let upcoming = future_appointments(vehicle, &now);
    if upcoming.is_empty() {
        println!("  none");
    }
    for entry in upcoming {
        println!("  [{}] {}", entry.id, entry.text);
    }
}

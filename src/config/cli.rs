use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "smart-garage")]
#[command(about = "Manage a small garage of vehicles and their maintenance schedule")]
pub struct CliConfig {
    /// Path to the TOML settings file
    #[arg(short, long, default_value = "garage.toml")]
    pub config: String,

    /// Overrides `storage.data_dir` from the settings file
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: GarageCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum GarageCommand {
    /// List every vehicle in the garage
    List,

    /// Show one vehicle's state and maintenance schedule
    Show { id: String },

    /// Add a vehicle (car, sports-car or truck)
    Add {
        kind: String,
        model: String,
        color: String,
        /// Load capacity in kg, required for trucks
        #[arg(long)]
        capacity: Option<f64>,
    },

    /// Remove a vehicle
    Remove { id: String },

    /// Run an operation: turn-on, turn-off, toggle, accelerate, brake, honk,
    /// turbo-on, turbo-off, load <kg>, unload <kg>
    Op {
        id: String,
        operation: String,
        quantity: Option<f64>,
    },

    /// Add or remove maintenance records
    Maintenance {
        #[command(subcommand)]
        action: MaintenanceCommand,
    },

    /// Past services and upcoming appointments of a vehicle
    History { id: String },

    /// Appointments due today or tomorrow across the garage
    Alerts,

    /// Extra dealer details for a vehicle
    Details { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum MaintenanceCommand {
    Add {
        vehicle_id: String,
        /// YYYY-MM-DD, or a full timestamp
        #[arg(long)]
        date: String,
        /// HH:MM, defaults to 00:00
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        service: String,
        #[arg(long)]
        cost: f64,
        #[arg(long)]
        description: Option<String>,
    },
    Remove {
        vehicle_id: String,
        record_id: String,
    },
}

impl MaintenanceCommand {
    /// Joins `--date` and `--time` into one timestamp string.
    pub fn timestamp_input(date: &str, time: Option<&str>) -> String {
        match time {
            Some(time) if !time.trim().is_empty() => format!("{} {}", date.trim(), time.trim()),
            _ => date.trim().to_string(),
        }
    }
}

//! Views over a vehicle's maintenance ledger relative to a fixed `now`.
//!
//! Past history is listed most recent first. Future appointments are listed
//! soonest first, for every kind of vehicle.

use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::vehicle::{Vehicle, VehicleType};
use chrono::{DateTime, TimeZone};
use std::fmt;

/// A display line together with the id of the record it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedEntry {
    pub id: String,
    pub text: String,
}

/// Splits `history` into records at or before `now` and records after it.
/// Both halves keep the order of `history`.
pub fn partition_at<'a, Tz: TimeZone>(
    history: &'a [MaintenanceRecord],
    now: &DateTime<Tz>,
) -> (Vec<&'a MaintenanceRecord>, Vec<&'a MaintenanceRecord>) {
    let (future, past): (Vec<_>, Vec<_>) = history.iter().partition(|m| m.is_after(now));
    (past, future)
}

pub fn past_history<Tz: TimeZone>(vehicle: &Vehicle, now: &DateTime<Tz>) -> Vec<FormattedEntry>
where
    Tz::Offset: fmt::Display,
{
    let tz = now.timezone();
    partition_at(vehicle.maintenance_history(), now)
        .0
        .into_iter()
        .map(|m| FormattedEntry {
            id: m.id().to_string(),
            text: m.format_history(&tz),
        })
        .collect()
}

pub fn future_appointments<Tz: TimeZone>(
    vehicle: &Vehicle,
    now: &DateTime<Tz>,
) -> Vec<FormattedEntry>
where
    Tz::Offset: fmt::Display,
{
    let tz = now.timezone();
    partition_at(vehicle.maintenance_history(), now)
        .1
        .into_iter()
        .rev()
        .map(|m| FormattedEntry {
            id: m.id().to_string(),
            text: m.format_appointment(&tz),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueWhen {
    Today,
    Tomorrow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueSoonAlert {
    pub when: DueWhen,
    pub vehicle_id: String,
    pub vehicle_kind: VehicleType,
    pub model: String,
    pub record_id: String,
    pub service_type: String,
    /// Local `HH:MM` of the appointment.
    pub time: String,
}

impl fmt::Display for DueSoonAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.when {
            DueWhen::Today => "TODAY",
            DueWhen::Tomorrow => "TOMORROW",
        };
        write!(
            f,
            "{}: {} {} - {} at {}",
            label, self.vehicle_kind, self.model, self.service_type, self.time
        )
    }
}

/// Future appointments falling on `now`'s calendar date or the next one, in `now`'s zone.
pub fn due_soon_alerts<'a, Tz, I>(vehicles: I, now: &DateTime<Tz>) -> Vec<DueSoonAlert>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    I: IntoIterator<Item = &'a Vehicle>,
{
    let tz = now.timezone();
    let today = now.date_naive();
    let tomorrow = today.succ_opt();

    let mut alerts = Vec::new();
    for vehicle in vehicles {
        for record in vehicle.maintenance_history() {
            if !record.is_after(now) {
                continue;
            }
            let local = record.timestamp().with_timezone(&tz);
            let date = local.date_naive();
            let when = if date == today {
                DueWhen::Today
            } else if Some(date) == tomorrow {
                DueWhen::Tomorrow
            } else {
                continue;
            };
            alerts.push(DueSoonAlert {
                when,
                vehicle_id: vehicle.id().to_string(),
                vehicle_kind: vehicle.kind(),
                model: vehicle.model().to_string(),
                record_id: record.id().to_string(),
                service_type: record.service_type().to_string(),
                time: local.format("%H:%M").to_string(),
            });
        }
    }
    alerts
}

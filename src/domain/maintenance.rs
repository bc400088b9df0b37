use crate::domain::generate_id;
use crate::utils::error::{GarageError, Result};
use crate::utils::validation::{require_non_negative, require_text};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a service timestamp.
///
/// RFC 3339 input carries its own offset. Input without one (`2024-03-01 14:30`,
/// `2024-03-01T14:30`, or a bare `2024-03-01` meaning midnight) is read as wall
/// clock time in `tz`. Returns `None` when nothing matches or the wall clock
/// time does not exist in `tz`.
pub fn parse_timestamp<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Renders an amount the way Brazilian receipts do: `R$ 1.234,50`.
pub fn format_brl(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, fraction)
}

/// One service event in a vehicle's maintenance ledger.
///
/// Values only exist after passing validation and are never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRecord {
    id: String,
    timestamp: DateTime<Utc>,
    service_type: String,
    cost: f64,
    description: String,
}

impl MaintenanceRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        service_type: &str,
        cost: f64,
        description: Option<&str>,
    ) -> Result<Self> {
        let service_type = require_text("service type", service_type)?;
        let cost = require_non_negative("cost", cost)?;

        Ok(Self {
            id: generate_id("m"),
            timestamp,
            service_type,
            cost,
            description: description.map(str::trim).unwrap_or_default().to_string(),
        })
    }

    /// Same as [`MaintenanceRecord::new`], reading zone-less timestamps as UTC.
    pub fn parse(
        timestamp: &str,
        service_type: &str,
        cost: f64,
        description: Option<&str>,
    ) -> Result<Self> {
        let timestamp = parse_timestamp(timestamp, &Utc).ok_or_else(|| {
            GarageError::validation("timestamp", format!("'{}' is not a valid date", timestamp))
        })?;
        Self::new(timestamp, service_type, cost, description)
    }

    /// Keeps a previously assigned id, e.g. when rebuilding from storage.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.trim().is_empty() {
            self.id = id;
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn description(&self) -> Option<&str> {
        if self.description.is_empty() {
            None
        } else {
            Some(&self.description)
        }
    }

    pub fn is_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.timestamp > now.with_timezone(&Utc)
    }

    /// History line, e.g. `Oil change on 05/02/2024 - R$ 150,00 (synthetic)`.
    pub fn format_history<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        let date = self.timestamp.with_timezone(tz).format("%d/%m/%Y");
        let mut text = format!("{} on {} - {}", self.service_type, date, format_brl(self.cost));
        if let Some(description) = self.description() {
            text.push_str(&format!(" ({})", description));
        }
        text
    }

    /// Appointment line, e.g. `Inspection scheduled for 20/10/2026 09:00 - Note: bring papers`.
    pub fn format_appointment<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        let when = self.timestamp.with_timezone(tz).format("%d/%m/%Y %H:%M");
        let mut text = format!("{} scheduled for {}", self.service_type, when);
        if let Some(description) = self.description() {
            text.push_str(&format!(" - Note: {}", description));
        }
        text
    }
}

/// Most recent first. Stable, so records sharing a timestamp keep insertion order.
pub fn sort_newest_first(records: &mut [MaintenanceRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

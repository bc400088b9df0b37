//! Flat, tagged records for persisting vehicles.
//!
//! Field names follow the garage's original storage format (`tipoVeiculo`,
//! `modelo`, `historicoManutencao`, ...), so files written by earlier versions
//! keep loading. Reading is deliberately forgiving: numbers may arrive as
//! strings, flags may be missing, and malformed maintenance entries are
//! skipped one by one instead of failing the whole vehicle.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "data", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "tipo", default)]
    pub service_type: Option<String>,
    #[serde(rename = "custo", default, deserialize_with = "lenient_number")]
    pub cost: Option<f64>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "tipoVeiculo", default)]
    pub kind: Option<String>,
    #[serde(rename = "modelo", default)]
    pub model: Option<String>,
    #[serde(rename = "cor", default)]
    pub color: Option<String>,
    #[serde(rename = "ligado", default, deserialize_with = "truthy_flag")]
    pub ignition_on: bool,
    #[serde(
        rename = "velocidade",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed: Option<f64>,
    #[serde(
        rename = "turboAtivado",
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub turbo_on: Option<bool>,
    #[serde(
        rename = "capacidadeCarga",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<f64>,
    #[serde(
        rename = "cargaAtual",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_load: Option<f64>,
    #[serde(
        rename = "historicoManutencao",
        default,
        deserialize_with = "lenient_entries"
    )]
    pub maintenance: Vec<MaintenanceEntry>,
}

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0),
        Some(Value::String(s)) => s.trim().parse::<bool>().ok(),
        _ => None,
    })
}

pub(crate) fn truthy_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_flag(deserializer)?.unwrap_or(false))
}

/// Any scalar as display text; `null`, blanks and nested values read as absent.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<MaintenanceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<MaintenanceEntry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed maintenance entry: {}", e);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_and_flags_from_loose_json() {
        let record: VehicleRecord = serde_json::from_value(json!({
            "tipoVeiculo": "Caminhao",
            "ligado": 1,
            "velocidade": "12.5",
            "capacidadeCarga": null,
            "cargaAtual": [1],
            "historicoManutencao": [{"id": "m-1", "custo": "80"}, "garbage"]
        }))
        .unwrap();

        assert!(record.ignition_on);
        assert_eq!(record.speed, Some(12.5));
        assert_eq!(record.capacity, None);
        assert_eq!(record.current_load, None);
        assert_eq!(record.maintenance.len(), 1);
        assert_eq!(record.maintenance[0].cost, Some(80.0));
    }

    #[test]
    fn test_missing_history_is_empty() {
        let record: VehicleRecord =
            serde_json::from_value(json!({"tipoVeiculo": "Carro", "ligado": null})).unwrap();
        assert!(!record.ignition_on);
        assert!(record.maintenance.is_empty());
    }
}

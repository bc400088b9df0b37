use crate::domain::ports::Storage;
use crate::domain::record::{lenient_text, truthy_flag};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Extra dealer-side information about a vehicle, kept in a separate JSON catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub id: String,
    #[serde(rename = "valorFipe", default, deserialize_with = "lenient_text")]
    pub fipe_value: Option<String>,
    #[serde(rename = "recallPendente", default, deserialize_with = "truthy_flag")]
    pub recall_pending: bool,
    #[serde(rename = "recallDetalhe", default, deserialize_with = "lenient_text")]
    pub recall_detail: Option<String>,
    #[serde(
        rename = "ultimaRevisaoConcessionaria",
        default,
        deserialize_with = "lenient_text"
    )]
    pub last_dealer_service: Option<String>,
    #[serde(rename = "dicaManutencao", default, deserialize_with = "lenient_text")]
    pub maintenance_tip: Option<String>,
    #[serde(rename = "componenteComumFalha", default, deserialize_with = "lenient_text")]
    pub common_failure: Option<String>,
}

impl fmt::Display for VehicleDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());
        writeln!(f, "FIPE value: {}", or_na(&self.fipe_value))?;
        match (&self.recall_pending, &self.recall_detail) {
            (true, Some(detail)) => writeln!(f, "Pending recall: yes ({})", detail)?,
            (true, None) => writeln!(f, "Pending recall: yes")?,
            (false, _) => writeln!(f, "Pending recall: no")?,
        }
        writeln!(f, "Last dealer service: {}", or_na(&self.last_dealer_service))?;
        writeln!(f, "Tip: {}", or_na(&self.maintenance_tip))?;
        write!(f, "Common failure: {}", or_na(&self.common_failure))
    }
}

/// Read-only lookup over the details catalog file.
pub struct DetailsCatalog<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> DetailsCatalog<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    /// Details for `vehicle_id`. Any problem reading the catalog is logged and
    /// treated as "no details".
    pub async fn find(&self, vehicle_id: &str) -> Option<VehicleDetails> {
        tracing::debug!("Looking up details for {} in {}", vehicle_id, self.file_name);
        let bytes = match self.storage.read_file(&self.file_name).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Details catalog {} unavailable: {}", self.file_name, e);
                return None;
            }
        };

        let entries = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::error!("Details catalog {} is not a JSON array", self.file_name);
                return None;
            }
            Err(e) => {
                tracing::error!("Details catalog {} is not valid JSON: {}", self.file_name, e);
                return None;
            }
        };

        entries
            .into_iter()
            .filter(|entry| entry.get("id").and_then(Value::as_str) == Some(vehicle_id))
            .find_map(|entry| match serde_json::from_value::<VehicleDetails>(entry) {
                Ok(details) => Some(details),
                Err(e) => {
                    tracing::warn!("Malformed details entry for {}: {}", vehicle_id, e);
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{GarageError, Result};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, data: &str) {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.as_bytes().to_vec());
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                GarageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_find_details_by_id() {
        let storage = MockStorage::default();
        storage
            .put(
                "details.json",
                r#"[
                    {"id": "v-1", "valorFipe": "R$ 95.000,00", "recallPendente": true,
                     "recallDetalhe": "Airbag", "dicaManutencao": "Check tyres"},
                    {"id": "v-2", "valorFipe": "R$ 300.000,00"}
                ]"#,
            )
            .await;
        let catalog = DetailsCatalog::new(storage, "details.json");

        let details = catalog.find("v-1").await.unwrap();
        assert!(details.recall_pending);
        assert_eq!(details.recall_detail.as_deref(), Some("Airbag"));
        assert!(details.to_string().contains("Pending recall: yes (Airbag)"));
        assert!(details.to_string().contains("Common failure: N/A"));

        assert!(catalog.find("v-3").await.is_none());
    }

    #[tokio::test]
    async fn test_unusable_catalog_means_no_details() {
        let storage = MockStorage::default();
        let catalog = DetailsCatalog::new(storage.clone(), "details.json");
        assert!(catalog.find("v-1").await.is_none());

        storage.put("details.json", r#"{"id": "v-1"}"#).await;
        assert!(catalog.find("v-1").await.is_none());

        storage.put("details.json", "not json").await;
        assert!(catalog.find("v-1").await.is_none());
    }

    #[tokio::test]
    async fn test_loosely_typed_entries_still_show() {
        let storage = MockStorage::default();
        storage
            .put(
                "details.json",
                r#"[
                    {"id": "v-1", "valorFipe": 95000, "recallPendente": null,
                     "ultimaRevisaoConcessionaria": "", "dicaManutencao": null},
                    {"id": "v-2", "valorFipe": "R$ 1", "recallPendente": 1,
                     "recallDetalhe": 42}
                ]"#,
            )
            .await;
        let catalog = DetailsCatalog::new(storage, "details.json");

        let details = catalog.find("v-1").await.unwrap();
        assert_eq!(details.fipe_value.as_deref(), Some("95000"));
        assert!(!details.recall_pending);
        assert!(details.last_dealer_service.is_none());
        assert!(details.to_string().contains("Tip: N/A"));

        let details = catalog.find("v-2").await.unwrap();
        assert!(details.recall_pending);
        assert!(details.to_string().contains("Pending recall: yes (42)"));
    }
}

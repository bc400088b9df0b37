use thiserror::Error;

#[derive(Error, Debug)]
pub enum GarageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Unknown vehicle type: {tag}")]
    UnknownVehicleType { tag: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Validation,
    Data,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GarageError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GarageError::IoError(_) | GarageError::StorageError { .. } => ErrorCategory::Io,
            GarageError::ConfigError { .. }
            | GarageError::ConfigValidationError { .. }
            | GarageError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GarageError::ValidationError { .. } => ErrorCategory::Validation,
            GarageError::SerializationError(_) | GarageError::UnknownVehicleType { .. } => {
                ErrorCategory::Data
            }
            GarageError::NotFound { .. } => ErrorCategory::Lookup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GarageError::IoError(_) | GarageError::StorageError { .. } => {
                "Check that the data directory exists and is writable"
            }
            GarageError::SerializationError(_) => {
                "The garage file is not valid JSON; restore it from a backup or remove it"
            }
            GarageError::ConfigError { .. }
            | GarageError::ConfigValidationError { .. }
            | GarageError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line options"
            }
            GarageError::ValidationError { .. } => "Correct the input values and try again",
            GarageError::UnknownVehicleType { .. } => {
                "Use one of the vehicle types: Carro, CarroEsportivo, Caminhao"
            }
            GarageError::NotFound { .. } => "List the garage to see the available ids",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GarageError::IoError(e) => format!("Could not access the garage data: {}", e),
            GarageError::SerializationError(_) => "The garage data is corrupted".to_string(),
            GarageError::ValidationError { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GarageError>;

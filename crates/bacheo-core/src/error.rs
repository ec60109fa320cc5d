//! Error types for Bacheo

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacheoError {
    // Geometry validation errors
    #[error("At least 3 numeric measurements are required, found {found}")]
    InsufficientMeasurements { found: usize },

    #[error("A GPS fix (lat, lng) is required to register a bache")]
    MissingAnchor,

    #[error("Invalid coordinates ({lat}, {lng}): latitude must be within ±90 and longitude within ±180")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("Unknown curb side '{token}'")]
    InvalidCurbSide { token: String },

    #[error("Curb side '{side}' does not apply to a {forma}")]
    InapplicableCurbSide { side: String, forma: String },

    // Lifecycle errors
    #[error("Status cannot go back from '{current}' to '{requested}'")]
    StatusRegression { current: String, requested: String },

    #[error("Unknown status '{token}'. Use registrado, iniciado, en-proceso, or terminado")]
    UnknownStatus { token: String },

    #[error("Unknown evidence phase '{token}'. Use before, during, or after")]
    UnknownEvidencePhase { token: String },

    #[error("Bache not found: {id}")]
    BacheNotFound { id: String },

    // Calculator errors
    #[error("Invalid calculator input for {field}: {reason}")]
    InvalidCalculatorInput { field: String, reason: String },

    // Collaborator errors
    #[error("Storage error: {reason}")]
    Storage { reason: String },

    #[error("Reverse geocoding failed: {reason}")]
    Geocoding { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BacheoError {
    /// Whether the error is a caller-side validation problem rather than a
    /// collaborator or environment failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BacheoError::InsufficientMeasurements { .. }
                | BacheoError::MissingAnchor
                | BacheoError::InvalidCoordinates { .. }
                | BacheoError::InvalidCurbSide { .. }
                | BacheoError::InapplicableCurbSide { .. }
                | BacheoError::UnknownStatus { .. }
                | BacheoError::UnknownEvidencePhase { .. }
                | BacheoError::InvalidCalculatorInput { .. }
        )
    }
}

impl From<serde_json::Error> for BacheoError {
    fn from(err: serde_json::Error) -> Self {
        BacheoError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BacheoError>;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bacheo_core::error::BacheoError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into(), details: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into(), details: None }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self { status: StatusCode::CONFLICT, message: message.into(), details: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message, details: self.details };
        (self.status, Json(body)).into_response()
    }
}

impl From<BacheoError> for ApiError {
    fn from(err: BacheoError) -> Self {
        match &err {
            e if e.is_validation() => Self::bad_request("Invalid request").with_details(err.to_string()),
            BacheoError::BacheNotFound { .. } => {
                Self::not_found("Bache not found").with_details(err.to_string())
            }
            BacheoError::StatusRegression { .. } => {
                Self::conflict("Status cannot go back").with_details(err.to_string())
            }
            _ => {
                tracing::error!(error = %err, "Request failed");
                Self::internal("Internal error").with_details(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(BacheoError::MissingAnchor).status, StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(BacheoError::BacheNotFound { id: "x".into() }).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(BacheoError::StatusRegression {
                current: "terminado".into(),
                requested: "iniciado".into()
            })
            .status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(BacheoError::Storage { reason: "down".into() }).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

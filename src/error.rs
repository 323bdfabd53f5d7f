use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
///
/// Every failure in the estimation pipeline is one of these kinds. The kind
/// survives all the way to the HTTP boundary, where it selects the status code.
#[derive(Debug, Error)]
pub enum AppError {
    /// Profile, fuel type or place name outside what the service accepts
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A place name produced no geocoding candidate
    #[error("Geocoding failed: {0}")]
    Geocoding(String),
    /// The optimizer returned no usable route
    #[error("Routing failed: {0}")]
    Routing(String),
    /// The fuel price page could not be retrieved
    #[error("Failed to fetch fuel prices: {0}")]
    Fetch(String),
    /// No usable price for the requested fuel type
    #[error("Fuel price not found: {0}")]
    PriceNotFound(String),
    /// Profile x fuel type missing from the consumption table
    #[error("Unsupported combination: {0}")]
    UnsupportedCombination(String),
    /// Geocoding/routing provider answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },
    /// Transport-level failure talking to the routing provider
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error surfaces as
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::PriceNotFound(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedCombination(_) => StatusCode::BAD_REQUEST,
            Self::Geocoding(_) => StatusCode::NOT_FOUND,
            Self::Routing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::HttpRequest(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable name, used in response bodies and metric labels
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Geocoding(_) => "geocoding_error",
            Self::Routing(_) => "routing_error",
            Self::Fetch(_) => "fetch_error",
            Self::PriceNotFound(_) => "price_not_found",
            Self::UnsupportedCombination(_) => "unsupported_combination",
            Self::Upstream { .. } => "upstream_error",
            Self::HttpRequest(_) => "http_request_error",
            Self::Config(_) => "config_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "detail": self.to_string(),
            "error_type": self.error_type(),
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::Geocoding("No results for 'Atlantis'".to_string());
        assert_eq!(error.to_string(), "Geocoding failed: No results for 'Atlantis'");
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(AppError::InvalidInput("x".to_string()).error_type(), "invalid_input");
        assert_eq!(AppError::PriceNotFound("x".to_string()).error_type(), "price_not_found");
        assert_eq!(AppError::Fetch("x".to_string()).error_type(), "fetch_error");
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(AppError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::PriceNotFound("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UnsupportedCombination("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Geocoding("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Routing("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::Fetch("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Upstream {
                status: StatusCode::FORBIDDEN,
                message: "bad key".into()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_response() {
        let error = AppError::PriceNotFound("no price for diesel".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error_type"], "price_not_found");
        assert_eq!(body["detail"], "Fuel price not found: no price for diesel");
    }
}

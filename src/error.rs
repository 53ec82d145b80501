use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while talking to the upstream recipe provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request never produced a response (connect failure, timeout, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Spoonacular API error: {0}")]
    Status(u16),

    /// The response body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Request-level failures of the search endpoint
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Ingredients parameter is required")]
    MissingIngredients,

    /// The query string could not be decoded at all
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("API key not configured")]
    MissingApiKey,

    /// The initial find-by-ingredients call failed; no partial results
    #[error("Failed to fetch recipes")]
    UpstreamSearch(#[source] ProviderError),
}

/// JSON body sent for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SearchError {
    pub fn status(&self) -> StatusCode {
        match self {
            SearchError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SearchError::MissingIngredients | SearchError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            SearchError::MissingApiKey | SearchError::UpstreamSearch(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> ErrorBody {
        let details = match self {
            SearchError::UpstreamSearch(source) => Some(source.to_string()),
            _ => None,
        };

        ErrorBody {
            error: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Errors seen by the terminal front end when calling the proxy
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to reach the proxy or read its response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy answered with an error payload
    #[error("{message}")]
    Proxy { status: u16, message: String },

    /// Search was requested without any ingredients
    #[error("Add at least one ingredient before searching")]
    NoIngredients,
}

/// Errors that abort startup
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SearchError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            SearchError::MissingIngredients.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SearchError::MissingApiKey.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SearchError::UpstreamSearch(ProviderError::Status(503)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_failure_carries_details() {
        let body = SearchError::UpstreamSearch(ProviderError::Status(402)).body();
        assert_eq!(body.error, "Failed to fetch recipes");
        assert_eq!(body.details.as_deref(), Some("Spoonacular API error: 402"));
    }

    #[test]
    fn test_config_failure_is_a_startup_error() {
        let err = StartupError::from(config::ConfigError::NotFound("server.port".into()));
        assert!(matches!(err, StartupError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error: "));
    }

    #[test]
    fn test_client_errors_omit_details() {
        let json = serde_json::to_value(SearchError::MissingIngredients.body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Ingredients parameter is required"})
        );
    }
}

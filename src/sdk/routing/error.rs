use serde::Deserialize;
use std::num::ParseFloatError;
use thiserror::Error;

// Body OSRM sends alongside a non-success status
#[derive(Deserialize, Debug)]
pub struct OsrmErrorPayload {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Coordinate in response is not a number: {0}")]
    InvalidNumber(#[from] ParseFloatError),

    // Structured error from the routing service
    #[error("API Error ({code}): {message}")]
    ApiError { code: String, message: String },

    // Non-success status whose body isn't the expected JSON
    #[error("Unstructured API Error: {0}")]
    RawApiError(String),

    #[error("No results for {0}")]
    EmptyResult(String),

    #[error("Location access denied")]
    GeolocationDenied,

    #[error("Location is not available on this device")]
    GeolocationUnavailable,
}

/// The three ways an outbound call can fail, as far as the planner cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    EmptyResult,
    GeolocationDenied,
}

impl RoutingError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RoutingError::EmptyResult(_) => FailureKind::EmptyResult,
            RoutingError::GeolocationDenied | RoutingError::GeolocationUnavailable => {
                FailureKind::GeolocationDenied
            }
            _ => FailureKind::Network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_body_counts_as_network_failure() {
        let err: RoutingError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert_eq!(err.kind(), FailureKind::Network);

        let err: RoutingError = "north".parse::<f64>().unwrap_err().into();
        assert_eq!(err.kind(), FailureKind::Network);
    }

    #[test]
    fn unavailable_is_reported_as_denied() {
        assert_eq!(RoutingError::GeolocationUnavailable.kind(), FailureKind::GeolocationDenied);
        assert_eq!(
            RoutingError::EmptyResult("Atlantis".into()).kind(),
            FailureKind::EmptyResult
        );
    }

    #[test]
    fn payload_parses_without_message() {
        let payload: OsrmErrorPayload = serde_json::from_str(r#"{"code":"NoRoute"}"#).unwrap();
        assert_eq!(payload.code, "NoRoute");
        assert!(payload.message.is_empty());
    }
}

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::requests::RequestServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Request(RequestServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Request(err) => write!(f, "request error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Request(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Request(RequestServiceError::NotWithinBusinessHours) => {
                StatusCode::FORBIDDEN
            }
            AppError::Request(RequestServiceError::InvalidContent(_)) => StatusCode::BAD_REQUEST,
            AppError::Request(RequestServiceError::Persistence(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RequestServiceError> for AppError {
    fn from(value: RequestServiceError) -> Self {
        Self::Request(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::requests::StoreError;

    #[test]
    fn request_errors_map_to_client_statuses() {
        let denied = AppError::from(RequestServiceError::NotWithinBusinessHours).into_response();
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let failed = AppError::from(RequestServiceError::Persistence(StoreError::Unavailable(
            "offline".to_string(),
        )))
        .into_response();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn display_prefixes_error_kind() {
        let err = AppError::from(ConfigError::InvalidPort);
        assert_eq!(
            err.to_string(),
            "configuration error: APP_PORT must be a valid u16"
        );
    }
}

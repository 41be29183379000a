use crate::models::ErrorResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Message returned whenever any of the three preference fields is absent.
pub const MISSING_PARAMETERS: &str = "Missing required parameters: genres, length, topics";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The caller supplied incomplete or malformed preferences.
    #[error("{0}")]
    Validation(String),

    /// The completion provider failed, was unreachable, or answered with an
    /// unusable body.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn missing_parameters() -> Self {
        ApiError::Validation(MISSING_PARAMETERS.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(message) => ErrorResponse {
                error: message.clone(),
                details: None,
            },
            ApiError::Upstream(details) => ErrorResponse {
                error: "Failed to get recommendations".to_string(),
                details: Some(details.clone()),
            },
            ApiError::ConfigError(details) | ApiError::InternalError(details) => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(details.clone()),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Upstream(format!("Malformed upstream response: {}", err))
    }
}

impl From<::config::ConfigError> for ApiError {
    fn from(err: ::config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(format!("{:#}", err))
    }
}

//! API error type and its HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use ticketdesk_core::TicketError;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Ticket not found")]
    NotFound,

    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },
}

impl ApiError {
    /// Validation failure with a single message.
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Validation {
            errors: vec![message.clone()],
            message,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::NotFound => ErrorResponse {
                detail: ApiError::NotFound.to_string(),
                errors: None,
            },
            ApiError::Validation { message, errors } => {
                tracing::debug!("Rejected request: {} ({:?})", message, errors);
                ErrorResponse {
                    detail: message,
                    errors: Some(errors),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<TicketError> for ApiError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound(_) => ApiError::NotFound,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |e| format!("{}: {}", field, describe(e)))
            })
            .collect();
        messages.sort();

        ApiError::Validation {
            message: "Validation failed".to_string(),
            errors: messages,
        }
    }
}

/// Human readable text for one failed field check.
fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match (error.params.get("min"), error.params.get("max")) {
        (Some(min), Some(max)) if error.code == "length" => {
            format!("must be between {} and {} characters", min, max)
        }
        _ => format!("invalid value ({})", error.code),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => {
                format!("Invalid JSON syntax: {}", err.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            other => other.body_text(),
        };
        ApiError::validation(message)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(format!("Invalid query parameter: {}", rejection.body_text()))
    }
}

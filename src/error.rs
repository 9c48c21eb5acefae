//! Application error type and its HTTP representation.
//!
//! Every error carries a human-readable message and a JSON `details` object.
//! Responses share one body shape:
//!
//! ```json
//! { "error": { "code": "invalid_url", "message": "Invalid URL", "details": {} } }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload sent under the `error` key.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Target URL is missing or not a valid absolute URL.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Requested short code fails the `^[A-Za-z0-9]{1,10}$` pattern.
    #[error("{message}")]
    InvalidCodeFormat { message: String, details: Value },

    /// Validity window is outside the accepted range.
    #[error("{message}")]
    InvalidValidity { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Alias exists but its expiry has passed.
    #[error("{message}")]
    Expired { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Code generation gave up after the configured number of draws.
    #[error("{message}")]
    CapacityExhausted { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_code_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCodeFormat {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_validity(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidValidity {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn capacity_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CapacityExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. }
            | Self::InvalidCodeFormat { .. }
            | Self::InvalidValidity { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Expired { .. } => StatusCode::GONE,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::CapacityExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code used in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidCodeFormat { .. } => "invalid_code_format",
            Self::InvalidValidity { .. } => "invalid_validity",
            Self::NotFound { .. } => "not_found",
            Self::Expired { .. } => "expired",
            Self::Unauthorized { .. } => "unauthorized",
            Self::CapacityExhausted { .. } => "capacity_exhausted",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into its serializable payload without consuming it.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = self.parts();
        ErrorInfo {
            code: self.code(),
            message: message.clone(),
            details: details.clone(),
        }
    }

    fn parts(&self) -> (&String, &Value) {
        match self {
            Self::InvalidUrl { message, details }
            | Self::InvalidCodeFormat { message, details }
            | Self::InvalidValidity { message, details }
            | Self::NotFound { message, details }
            | Self::Expired { message, details }
            | Self::Unauthorized { message, details }
            | Self::CapacityExhausted { message, details }
            | Self::Internal { message, details } => (message, details),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        if errors.field_errors().contains_key("validity") {
            AppError::invalid_validity("Invalid validity", details)
        } else if errors.field_errors().contains_key("shortcode") {
            AppError::invalid_code_format("Invalid shortcode format", details)
        } else {
            AppError::invalid_url("Invalid URL", details)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

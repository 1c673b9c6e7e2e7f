// ABOUTME: Unified error types for the Fitbit activity API client
// ABOUTME: Defines ErrorCode classes, AppError with status context, and conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the client returns [`AppResult`]. Errors carry an
//! [`ErrorCode`] that classifies the failure, a human-readable message, the
//! HTTP status returned by Fitbit (when one was received), and an optional
//! source error for chaining.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the client
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No token is available for the request
    AuthRequired,
    /// Fitbit rejected the access token
    AuthInvalid,
    /// The access token expired and could not be refreshed
    AuthExpired,
    /// The token lacks the scope required by the endpoint
    PermissionDenied,

    // Validation
    /// Caller supplied an invalid argument
    InvalidInput,

    // Resources
    /// Fitbit reported that the resource does not exist
    ResourceNotFound,

    // External Services
    /// Fitbit returned an unexpected error response
    ExternalServiceError,
    /// Fitbit could not be reached or returned a server error
    ExternalServiceUnavailable,
    /// The OAuth token endpoint rejected the request
    ExternalAuthFailed,
    /// Fitbit rate limit exceeded
    ExternalRateLimited,

    // Configuration
    /// Required configuration is missing
    ConfigMissing,
    /// Configuration is present but invalid
    ConfigInvalid,

    // Internal
    /// Reading or writing local storage failed
    StorageError,
    /// JSON encoding or decoding failed
    SerializationError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// HTTP status code that corresponds to this class of error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::ConfigInvalid => 400,
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired => 401,
            Self::PermissionDenied => 403,
            Self::ResourceNotFound => 404,
            Self::ExternalRateLimited => 429,
            Self::ExternalServiceError | Self::ExternalAuthFailed => 502,
            Self::ExternalServiceUnavailable => 503,
            Self::ConfigMissing
            | Self::StorageError
            | Self::SerializationError
            | Self::InternalError => 500,
        }
    }

    /// User-friendly description of this error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::AuthExpired => "The authentication token has expired",
            Self::PermissionDenied => "The token does not grant permission for this action",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "The Fitbit API returned an error",
            Self::ExternalServiceUnavailable => "The Fitbit API is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with the Fitbit token endpoint failed",
            Self::ExternalRateLimited => "Fitbit API rate limit exceeded",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Unified error type for the client
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// HTTP status returned by Fitbit, when the error came from a response
    pub status_code: Option<u16>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status_code: None,
            source: None,
        }
    }

    /// Attach the HTTP status code received from Fitbit
    #[must_use]
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status for this error: the one Fitbit sent, or the code's default
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.status_code.unwrap_or_else(|| self.code.http_status())
    }

    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "No OAuth2 token available")
    }

    /// Invalid authentication
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Authentication expired
    pub fn auth_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthExpired, message)
    }

    /// Insufficient scope
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Missing configuration value
    pub fn config_missing(key: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("{} is not configured", key.into()),
        )
    }

    /// Invalid configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization failure
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service unreachable or failing
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Token endpoint rejected the request
    pub fn external_auth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalAuthFailed, message)
    }

    /// Rate limit exceeded, with the `Retry-After` delay when Fitbit sent one
    #[must_use]
    pub fn rate_limited(retry_after_secs: Option<u64>) -> Self {
        let message = retry_after_secs.map_or_else(
            || "Fitbit rate limit exceeded".to_owned(),
            |secs| format!("Fitbit rate limit exceeded, retry after {secs} seconds"),
        );
        Self::new(ErrorCode::ExternalRateLimited, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(format!("Invalid JSON: {error}")).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::config_invalid(format!("Invalid URL: {error}")).with_source(error)
    }
}

#[cfg(feature = "http-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let app_error = if error.is_timeout() || error.is_connect() {
            Self::external_unavailable("Fitbit", format!("Request failed: {error}"))
        } else if error.is_decode() {
            Self::serialization(format!("Failed to decode Fitbit response: {error}"))
        } else {
            Self::external_service("Fitbit", format!("Request failed: {error}"))
        };

        match error.status() {
            Some(status) => app_error.with_status_code(status.as_u16()),
            None => app_error,
        }
        .with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::ExternalRateLimited.http_status(), 429);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_received_status_overrides_default() {
        let error = AppError::external_service("Fitbit", "teapot").with_status_code(418);
        assert_eq!(error.http_status(), 418);
        assert_eq!(AppError::auth_required().http_status(), 401);
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::config_missing("FITBIT_CLIENT_ID");
        assert_eq!(
            error.to_string(),
            "Required configuration is missing: FITBIT_CLIENT_ID is not configured"
        );
    }

    #[test]
    fn test_rate_limited_message() {
        assert!(AppError::rate_limited(Some(120))
            .message
            .contains("retry after 120 seconds"));
        assert_eq!(
            AppError::rate_limited(None).message,
            "Fitbit rate limit exceeded"
        );
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ExternalRateLimited).unwrap();
        assert_eq!(json, "\"EXTERNAL_RATE_LIMITED\"");
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = AppError::from(json_error);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(std::error::Error::source(&error).is_some());
    }
}

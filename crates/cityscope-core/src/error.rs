//! Centralized error types for Cityscope.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Errors from the provider crates and the orchestrator convert into this
/// type. Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Lookup(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { status: 401 | 403, .. } => {
                "The provider rejected the request. Check your API keys."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Failures of a single place lookup, as seen by the person searching.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    #[error("Weather unavailable: {0}")]
    WeatherUnavailable(String),

    #[error("Search failed for {category}: {message}")]
    SearchFailed { category: String, message: String },
}

impl LookupError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::PlaceNotFound(_) => "We couldn't find that place. Try another search.",
            LookupError::WeatherUnavailable(_) => "Weather is unavailable for this place right now.",
            LookupError::SearchFailed { .. } => "Some nearby places couldn't be loaded.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let lookup_err = LookupError::PlaceNotFound("Atlantis".into());
        let app_err: AppError = lookup_err.into();
        assert!(matches!(
            app_err,
            AppError::Lookup(LookupError::PlaceNotFound(_))
        ));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Network(NetworkError::Timeout);
        assert_eq!(
            app_err.user_message(),
            "The request timed out. Please try again."
        );
    }

    #[test]
    fn test_server_error_messages_by_status() {
        let unavailable = NetworkError::ServerError {
            status: 503,
            message: "down".into(),
        };
        assert!(unavailable.user_message().contains("try again later"));

        let denied = NetworkError::ServerError {
            status: 401,
            message: "bad key".into(),
        };
        assert!(denied.user_message().contains("API keys"));
    }

    #[test]
    fn test_search_failed_display_names_category() {
        let err = LookupError::SearchFailed {
            category: "restaurants".into(),
            message: "500".into(),
        };
        assert!(err.to_string().contains("restaurants"));
    }
}

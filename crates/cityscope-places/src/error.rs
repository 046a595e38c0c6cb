//! Places-specific error types.

use cityscope_core::NetworkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The lookup task ended without producing a result.
    #[error("Lookup interrupted: {0}")]
    Interrupted(String),
}

impl PlacesError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::InvalidResponse(_) => "The places service sent an unexpected response.",
            Self::Interrupted(_) => "The place lookup stopped unexpectedly. Please try again.",
        }
    }
}

/// Why a query could not be resolved to a location.
///
/// Callers upstream of the resolver treat every variant the same way; the
/// reason exists for logs and diagnostics.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("No candidates for query")]
    NoCandidates,

    #[error("Provider returned status {0}")]
    ProviderStatus(String),

    #[error("Provider request failed: {0}")]
    Provider(#[from] PlacesError),
}

impl ResolutionError {
    /// Short machine-readable reason code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::NoCandidates => "no_candidates",
            Self::ProviderStatus(_) => "provider_status",
            Self::Provider(_) => "provider_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = PlacesError::Network(NetworkError::Timeout);
        assert!(err.user_message().contains("timed out"));

        let err = PlacesError::InvalidResponse("truncated".into());
        assert!(err.user_message().contains("unexpected"));

        let err = PlacesError::Interrupted("task panicked".into());
        assert!(err.user_message().contains("stopped"));
    }

    #[test]
    fn test_resolution_reason_codes() {
        assert_eq!(ResolutionError::EmptyQuery.reason_code(), "empty_query");
        assert_eq!(ResolutionError::NoCandidates.reason_code(), "no_candidates");
        assert_eq!(
            ResolutionError::ProviderStatus("REQUEST_DENIED".into()).reason_code(),
            "provider_status"
        );
        let wrapped: ResolutionError = PlacesError::InvalidResponse("x".into()).into();
        assert_eq!(wrapped.reason_code(), "provider_error");
    }
}

use cityscope_core::{AppError, LookupError};

use crate::error::EnrichError;

impl From<EnrichError> for AppError {
    fn from(e: EnrichError) -> Self {
        match e {
            EnrichError::ResolutionFailed { query, .. } => {
                AppError::Lookup(LookupError::PlaceNotFound(query))
            }
            EnrichError::WeatherFailed { location, source } => AppError::Lookup(
                LookupError::WeatherUnavailable(format!("{}: {}", location, source)),
            ),
            EnrichError::CategoryFailed {
                category, source, ..
            } => AppError::Lookup(LookupError::SearchFailed {
                category: category.label().to_string(),
                message: source.to_string(),
            }),
            EnrichError::ClientSetup(msg) => {
                AppError::Other(anyhow::anyhow!("HTTP client setup failed: {}", msg))
            }
        }
    }
}

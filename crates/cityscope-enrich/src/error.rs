//! Enrichment failures.

use cityscope_places::{Category, PlacesError, ResolutionError};
use cityscope_weather::WeatherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    /// Aborts the whole query; the view is cleared.
    #[error("Could not resolve '{query}': {source}")]
    ResolutionFailed {
        query: String,
        source: ResolutionError,
    },

    #[error("Weather fetch failed for {location}: {source}")]
    WeatherFailed {
        location: String,
        source: WeatherError,
    },

    #[error("Search for {category} failed for {location}: {source}")]
    CategoryFailed {
        category: Category,
        location: String,
        source: PlacesError,
    },

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

impl EnrichError {
    /// Field-local failures leave the rest of the view intact.
    pub fn is_field_local(&self) -> bool {
        matches!(self, Self::WeatherFailed { .. } | Self::CategoryFailed { .. })
    }
}

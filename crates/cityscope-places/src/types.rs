//! Place types and provider response shapes.

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A place resolved from free text: the first candidate the provider returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub formatted_address: String,
    pub coordinates: Coordinates,
}

/// One entry of a category search, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub name: String,
    pub formatted_address: String,
}

/// An autocomplete prediction for partially typed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub description: String,
    pub place_id: String,
}

/// The fixed category partitions searched around a resolved place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Restaurants,
    HistoricalSites,
    PlacesOfInterest,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Restaurants,
        Category::HistoricalSites,
        Category::PlacesOfInterest,
    ];

    /// Phrase prepended to the location name when searching.
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Restaurants => "restaurants",
            Self::HistoricalSites => "historical sites",
            Self::PlacesOfInterest => "places of interest",
        }
    }

    /// Heading for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Restaurants => "Restaurants",
            Self::HistoricalSites => "Historical Sites",
            Self::PlacesOfInterest => "Places of Interest",
        }
    }

    /// Provider query text, e.g. "restaurants in Berlin".
    pub fn query_for(self, location_name: &str) -> String {
        format!("{} in {}", self.phrase(), location_name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.phrase())
    }
}

// API Response Types

/// Find-place-from-text response.
#[derive(Debug, Deserialize)]
pub struct FindPlaceResponse {
    pub status: String,
    #[serde(default)]
    pub candidates: Vec<ApiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct ApiCandidate {
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    pub geometry: ApiGeometry,
}

#[derive(Debug, Deserialize)]
pub struct ApiGeometry {
    pub location: Coordinates,
}

/// Text search response. `results` is optional on error payloads.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    pub results: Option<Vec<ApiSearchResult>>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiSearchResult {
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
}

/// Autocomplete response.
#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<ApiPrediction>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPrediction {
    pub description: String,
    #[serde(default)]
    pub place_id: String,
}

impl From<ApiCandidate> for Location {
    fn from(api: ApiCandidate) -> Self {
        Self {
            name: api.name,
            formatted_address: api.formatted_address,
            coordinates: api.geometry.location,
        }
    }
}

impl From<ApiSearchResult> for PlaceSummary {
    fn from(api: ApiSearchResult) -> Self {
        Self {
            name: api.name,
            formatted_address: api.formatted_address,
        }
    }
}

impl From<ApiPrediction> for Suggestion {
    fn from(api: ApiPrediction) -> Self {
        Self {
            description: api.description,
            place_id: api.place_id,
        }
    }
}

//! Free-text query to a single location.

use tracing::instrument;

use crate::client::PlacesClient;
use crate::error::ResolutionError;
use crate::types::Location;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Resolves queries with the find-place endpoint, taking the first candidate.
#[derive(Debug, Clone)]
pub struct PlaceResolver {
    client: PlacesClient,
}

impl PlaceResolver {
    pub fn new(client: PlacesClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, query: &str) -> Result<Location, ResolutionError> {
        if query.trim().is_empty() {
            return Err(ResolutionError::EmptyQuery);
        }

        let response = self.client.find_place(query).await?;

        match response.status.as_str() {
            STATUS_OK => {}
            STATUS_ZERO_RESULTS => return Err(ResolutionError::NoCandidates),
            other => return Err(ResolutionError::ProviderStatus(other.to_string())),
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ResolutionError::NoCandidates)?;

        let location = Location::from(candidate);
        tracing::info!(
            "Resolved '{}' to {} ({}, {})",
            query,
            location.name,
            location.coordinates.lat,
            location.coordinates.lng
        );
        Ok(location)
    }
}

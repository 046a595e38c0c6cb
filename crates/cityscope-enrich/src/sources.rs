//! Provider ports the orchestrator depends on.

use std::sync::Arc;

use async_trait::async_trait;
use cityscope_core::Config;
use cityscope_places::{
    Category, CategorySearch, Location, PlaceResolver, PlaceSummary, PlacesClient, PlacesError,
    ResolutionError,
};
use cityscope_weather::{WeatherError, WeatherProvider, WeatherSnapshot};

use crate::error::EnrichError;

#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Location, ResolutionError>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_weather(&self, location_name: &str) -> Result<WeatherSnapshot, WeatherError>;
}

#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn search(
        &self,
        location_name: &str,
        category: Category,
    ) -> Result<Vec<PlaceSummary>, PlacesError>;
}

#[async_trait]
impl LocationSource for PlaceResolver {
    async fn resolve(&self, query: &str) -> Result<Location, ResolutionError> {
        PlaceResolver::resolve(self, query).await
    }
}

#[async_trait]
impl WeatherSource for WeatherProvider {
    async fn current_weather(&self, location_name: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch_current(location_name).await
    }
}

#[async_trait]
impl CategorySource for CategorySearch {
    async fn search(
        &self,
        location_name: &str,
        category: Category,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        self.fetch_category(location_name, category).await
    }
}

/// The set of providers one orchestrator talks to.
#[derive(Clone)]
pub struct Sources {
    pub location: Arc<dyn LocationSource>,
    pub weather: Arc<dyn WeatherSource>,
    pub categories: Arc<dyn CategorySource>,
}

impl Sources {
    pub fn new(
        location: impl LocationSource + 'static,
        weather: impl WeatherSource + 'static,
        categories: impl CategorySource + 'static,
    ) -> Self {
        Self {
            location: Arc::new(location),
            weather: Arc::new(weather),
            categories: Arc::new(categories),
        }
    }

    /// Build the real HTTP-backed providers from configuration.
    pub fn from_config(config: &Config) -> Result<Self, EnrichError> {
        let places = PlacesClient::from_config(&config.providers)
            .map_err(|e| EnrichError::ClientSetup(e.to_string()))?;
        let weather = WeatherProvider::from_config(&config.providers)
            .map_err(|e| EnrichError::ClientSetup(e.to_string()))?;
        let search =
            CategorySearch::new(places.clone()).with_max_results(config.search.max_results_per_category);

        Ok(Self::new(PlaceResolver::new(places), weather, search))
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources").finish_non_exhaustive()
    }
}

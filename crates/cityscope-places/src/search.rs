//! Category searches around a resolved location.

use tracing::instrument;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::{Category, PlaceSummary};

#[derive(Debug, Clone)]
pub struct CategorySearch {
    client: PlacesClient,
    /// 0 keeps every result.
    max_results: usize,
}

impl CategorySearch {
    pub fn new(client: PlacesClient) -> Self {
        Self {
            client,
            max_results: 0,
        }
    }

    /// Cap the number of results kept per category, in provider order.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Run the "<phrase> in <name>" search for one category.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_category(
        &self,
        location_name: &str,
        category: Category,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        let query = category.query_for(location_name);
        let mut places = self.client.text_search(&query).await?;

        if self.max_results > 0 {
            places.truncate(self.max_results);
        }

        tracing::debug!("{} results for '{}'", places.len(), query);
        Ok(places)
    }
}

//! Places API client: find-place, text search and autocomplete.

use std::sync::Arc;

use cityscope_core::{NetworkError, ProvidersConfig, ReqwestErrorExt};
use tracing::instrument;

use crate::error::PlacesError;
use crate::types::*;

const FIND_PLACE_FIELDS: &str = "name,formatted_address,geometry";

#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Arc<reqwest::Client>,
    api_key: String,
    base_url: String,
}

impl PlacesClient {
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Result<Self, PlacesError> {
        Self::build(api_key, base_url, None)
    }

    /// Build a client from provider settings, including the optional timeout.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, PlacesError> {
        Self::build(
            &config.google_api_key,
            &config.places_base_url,
            config.request_timeout(),
        )
    }

    fn build(
        api_key: &str,
        base_url: &str,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, PlacesError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| e.into_network_error())?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up candidates for free text. The raw response is returned so the
    /// caller can interpret `status`.
    #[instrument(skip(self), level = "info")]
    pub async fn find_place(&self, input: &str) -> Result<FindPlaceResponse, PlacesError> {
        let url = format!(
            "{}/findplacefromtext/json?input={}&inputtype=textquery&fields={}&key={}",
            self.base_url,
            urlencoding::encode(input),
            FIND_PLACE_FIELDS,
            urlencoding::encode(&self.api_key),
        );

        self.get_json(&url).await
    }

    /// Free-text search, e.g. "restaurants in Berlin". A response without a
    /// results list yields an empty vector.
    #[instrument(skip(self), level = "info")]
    pub async fn text_search(&self, query: &str) -> Result<Vec<PlaceSummary>, PlacesError> {
        let url = format!(
            "{}/textsearch/json?query={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key),
        );

        let resp: TextSearchResponse = self.get_json(&url).await?;
        if let Some(status) = resp.status.as_deref() {
            tracing::debug!("Text search status: {}", status);
        }

        Ok(resp
            .results
            .unwrap_or_default()
            .into_iter()
            .map(PlaceSummary::from)
            .collect())
    }

    /// City suggestions for partially typed input. Blank input makes no call.
    #[instrument(skip(self), level = "info")]
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<Suggestion>, PlacesError> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/autocomplete/json?input={}&types={}&key={}",
            self.base_url,
            urlencoding::encode(input),
            urlencoding::encode("(cities)"),
            urlencoding::encode(&self.api_key),
        );

        let resp: AutocompleteResponse = self.get_json(&url).await?;
        if let Some(status) = resp.status.as_deref() {
            tracing::debug!("Autocomplete status: {}", status);
        }

        Ok(resp.predictions.into_iter().map(Suggestion::from).collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, PlacesError> {
        tracing::debug!("GET {}", redact_key(url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        self.handle_response(response).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, PlacesError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| PlacesError::InvalidResponse(format!("JSON parse error: {}", e)))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(PlacesError::Network(NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            }))
        }
    }
}

/// Drop the `key=` value from a URL before it reaches the logs.
fn redact_key(url: &str) -> String {
    match url.find("key=") {
        Some(idx) => {
            let rest = &url[idx + 4..];
            let end = rest.find('&').map(|i| idx + 4 + i).unwrap_or(url.len());
            format!("{}REDACTED{}", &url[..idx + 4], &url[end..])
        }
        None => url.to_string(),
    }
}

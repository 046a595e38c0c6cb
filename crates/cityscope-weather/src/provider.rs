use crate::types::{CurrentWeatherResponse, WeatherError, WeatherSnapshot};
use cityscope_core::{NetworkError, ProvidersConfig, ReqwestErrorExt};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Result<Self, WeatherError> {
        Self::build(api_key, base_url, None)
    }

    pub fn from_config(config: &ProvidersConfig) -> Result<Self, WeatherError> {
        Self::build(
            &config.openweather_api_key,
            &config.weather_base_url,
            config.request_timeout(),
        )
    }

    fn build(
        api_key: &str,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
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

    /// Current conditions for a location name, in metric units.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(&self, location_name: &str) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!(
            "{}/weather?q={}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(location_name),
            urlencoding::encode(&self.api_key),
        );
        tracing::debug!("Fetching weather for {}", location_name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::Network(NetworkError::ServerError {
                status: status.as_u16(),
                message,
            }));
        }

        let body: CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))?;

        let snapshot = WeatherSnapshot::try_from(body)?;
        tracing::info!(
            "Weather for {}: {:.1}°C, {}",
            location_name,
            snapshot.temperature_c,
            snapshot.description
        );
        Ok(snapshot)
    }
}

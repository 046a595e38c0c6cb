use chrono::{DateTime, Utc};
use cityscope_core::NetworkError;
use serde::{Deserialize, Serialize};

const ICON_URL_BASE: &str = "http://openweathermap.org/img/wn";

/// Current conditions for a named location, converted to display units.
///
/// Built once from a provider response and never mutated; a later fetch
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub observed_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    pub wind_kmh: f64,
    pub pressure_hpa: i32,
    pub humidity_pct: u8,
    pub visibility_km: f64,
    pub icon_id: String,
    pub station_name: String,
    pub country_code: String,
}

impl WeatherSnapshot {
    pub fn temperature_rounded(&self) -> i64 {
        round_half_up(self.temperature_c)
    }

    pub fn feels_like_rounded(&self) -> i64 {
        round_half_up(self.feels_like_c)
    }

    pub fn wind_kmh_rounded(&self) -> i64 {
        round_half_up(self.wind_kmh)
    }

    /// Condition icon URL, or `None` when the provider sent no icon.
    pub fn icon_url(&self) -> Option<String> {
        if self.icon_id.is_empty() {
            None
        } else {
            Some(format!("{}/{}@2x.png", ICON_URL_BASE, self.icon_id))
        }
    }

    /// Short observation date, e.g. "Nov 14".
    pub fn observed_label(&self) -> String {
        self.observed_at.format("%b %-d").to_string()
    }
}

/// Halves round towards positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// API Response Types

/// Current weather response (metric units).
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sys: ApiSys,
    pub main: ApiMain,
    #[serde(default)]
    pub wind: ApiWind,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    pub visibility: Option<f64>,
    pub dt: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiSys {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiMain {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: i32,
    pub humidity: u8,
}

/// Wind speed in m/s.
#[derive(Debug, Default, Deserialize)]
pub struct ApiWind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct ApiCondition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl TryFrom<CurrentWeatherResponse> for WeatherSnapshot {
    type Error = WeatherError;

    fn try_from(api: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        let observed_at = DateTime::from_timestamp(api.dt, 0)
            .ok_or_else(|| WeatherError::Parse(format!("Invalid observation time: {}", api.dt)))?;

        let (description, icon_id) = match api.weather.into_iter().next() {
            Some(condition) => (capitalize_first(&condition.description), condition.icon),
            None => (String::new(), String::new()),
        };

        Ok(Self {
            observed_at,
            temperature_c: api.main.temp,
            feels_like_c: api.main.feels_like,
            description,
            wind_kmh: api.wind.speed * 3.6,
            pressure_hpa: api.main.pressure,
            humidity_pct: api.main.humidity,
            visibility_km: api.visibility.unwrap_or(0.0) / 1000.0,
            icon_id,
            station_name: api.name,
            country_code: api.sys.country,
        })
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Parse error: {0}")]
    Parse(String),
    /// The fetch task ended without producing a result.
    #[error("Weather fetch interrupted: {0}")]
    Interrupted(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::Parse(_) => "The weather service sent an unexpected response.",
            Self::Interrupted(_) => "The weather lookup stopped unexpectedly. Please try again.",
        }
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const GOOGLE_API_KEY_ENV: &str = "CITYSCOPE_GOOGLE_API_KEY";
pub const OPENWEATHER_API_KEY_ENV: &str = "CITYSCOPE_OPENWEATHER_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    #[serde(skip)]
    pub config_dir: PathBuf,

    /// External provider endpoints and credentials
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Category search settings
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Key for the find-place, text-search and autocomplete endpoints
    #[serde(default)]
    pub google_api_key: String,

    /// Key for the current-weather endpoint
    #[serde(default)]
    pub openweather_api_key: String,

    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,

    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// Per-request timeout. 0 disables the timeout entirely, so a call
    /// may stay pending for as long as the provider keeps it open.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl ProvidersConfig {
    /// The HTTP timeout to apply, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            google_api_key: String::new(),
            openweather_api_key: String::new(),
            places_base_url: default_places_base_url(),
            weather_base_url: default_weather_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keep at most this many results per category, in provider order (0 = all)
    #[serde(default)]
    pub max_results_per_category: usize,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cityscope");

        Self {
            config_dir,
            providers: ProvidersConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config.with_env_overrides());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(config.with_env_overrides())
    }

    /// Load configuration (default location or `path`) and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Environment variables take precedence over keys stored on disk
    fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(GOOGLE_API_KEY_ENV) {
            tracing::debug!("Using Google API key from {}", GOOGLE_API_KEY_ENV);
            self.providers.google_api_key = key;
        }
        if let Ok(key) = std::env::var(OPENWEATHER_API_KEY_ENV) {
            tracing::debug!("Using OpenWeather API key from {}", OPENWEATHER_API_KEY_ENV);
            self.providers.openweather_api_key = key;
        }
        self
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(
            &self.providers.places_base_url,
            "providers.places_base_url",
            &mut result,
        );
        validate_url(
            &self.providers.weather_base_url,
            "providers.weather_base_url",
            &mut result,
        );

        if self.providers.google_api_key.trim().is_empty() {
            result.add_warning(
                "providers.google_api_key",
                format!(
                    "Not set - place lookups will be rejected (set {} or edit the config file)",
                    GOOGLE_API_KEY_ENV
                ),
            );
        }

        if self.providers.openweather_api_key.trim().is_empty() {
            result.add_warning(
                "providers.openweather_api_key",
                format!(
                    "Not set - weather will be unavailable (set {} or edit the config file)",
                    OPENWEATHER_API_KEY_ENV
                ),
            );
        }

        if self.providers.request_timeout_secs == 0 {
            result.add_warning(
                "providers.request_timeout_secs",
                "Request timeout disabled - provider calls may never complete",
            );
        } else if self.providers.request_timeout_secs > 300 {
            result.add_warning(
                "providers.request_timeout_secs",
                "Request timeout is unusually long (>300s)",
            );
        }

        result
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("cityscope");

        Ok(config_dir.join("config.toml"))
    }
}

/// Validate a URL field
fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

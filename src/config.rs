//! Configuration management for the `VoyageAI` application
//!
//! Handles loading configuration from `.env`, a TOML file and environment
//! variables, and validates every setting before a search is made.

use crate::{Result, VoyageError};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the Places API key
pub const PLACES_API_KEY_VAR: &str = "PLACES_API_KEY";
/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Root configuration structure for the `VoyageAI` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoyageConfig {
    /// Places search API configuration
    #[serde(default)]
    pub places: PlacesConfig,
    /// Generative-language API configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Search cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default search settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Places search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// API key, falls back to `PLACES_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Per-attempt request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Total attempts per search call, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_min_wait_ms")]
    pub retry_min_wait_ms: u64,
    #[serde(default = "default_retry_max_wait_ms")]
    pub retry_max_wait_ms: u64,
}

/// Gemini API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key, falls back to `GEMINI_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// In-memory search cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum cached responses, 0 disables the cache
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    /// Entry lifetime in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    #[serde(default = "default_radius")]
    pub radius_meters: u32,
}

// Default value functions
fn default_places_base_url() -> String {
    "https://places.googleapis.com/v1".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_min_wait_ms() -> u64 {
    4_000
}

fn default_retry_max_wait_ms() -> u64 {
    10_000
}

fn default_cache_capacity() -> usize {
    100
}

fn default_cache_ttl() -> u64 {
    3_600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_min_rating() -> f64 {
    4.0
}

fn default_radius() -> u32 {
    3_000
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            timeout_seconds: default_timeout(),
            max_attempts: default_max_attempts(),
            retry_min_wait_ms: default_retry_min_wait_ms(),
            retry_max_wait_ms: default_retry_max_wait_ms(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_seconds: default_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            min_rating: default_min_rating(),
            radius_meters: default_radius(),
        }
    }
}

impl PlacesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl GeminiConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl VoyageConfig {
    /// Load configuration from the default file location and the environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with VOYAGEAI_ prefix
        builder = builder.add_source(
            Environment::with_prefix("VOYAGEAI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| VoyageError::config(format!("Failed to build configuration: {e}")))?;

        let mut config: VoyageConfig = settings
            .try_deserialize()
            .map_err(|e| VoyageError::config(format!("Failed to read configuration: {e}")))?;

        config.apply_env_keys();
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("voyageai").join("config.toml"))
    }

    /// Fill API keys from the plain variables the `.env` file provides
    fn apply_env_keys(&mut self) {
        if self.places.api_key.is_none() {
            self.places.api_key = std::env::var(PLACES_API_KEY_VAR).ok();
        }
        if self.gemini.api_key.is_none() {
            self.gemini.api_key = std::env::var(GEMINI_API_KEY_VAR).ok();
        }
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_timeout();
        }
        if self.places.max_attempts == 0 {
            self.places.max_attempts = default_max_attempts();
        }
        if self.gemini.base_url.is_empty() {
            self.gemini.base_url = default_gemini_base_url();
        }
        if self.gemini.model.is_empty() {
            self.gemini.model = default_gemini_model();
        }
        if self.gemini.timeout_seconds == 0 {
            self.gemini.timeout_seconds = default_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Both keys are required; the messages are shown to the user verbatim
    pub fn validate_api_keys(&self) -> Result<()> {
        if self.places.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(VoyageError::config(
                "Google Places API key is missing. Please check your .env file.",
            ));
        }

        if self.gemini.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(VoyageError::config(
                "Gemini API key is missing. Please check your .env file.",
            ));
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.places.timeout_seconds > 300 || self.gemini.timeout_seconds > 300 {
            return Err(VoyageError::config("API timeout cannot exceed 300 seconds"));
        }

        if self.places.max_attempts > 10 {
            return Err(VoyageError::config("Places API max attempts cannot exceed 10"));
        }

        if self.places.retry_min_wait_ms > self.places.retry_max_wait_ms {
            return Err(VoyageError::config(
                "Retry minimum wait cannot exceed the maximum wait",
            ));
        }

        if self.cache.ttl_seconds > 7 * 24 * 60 * 60 {
            return Err(VoyageError::config("Cache TTL cannot exceed one week"));
        }

        if !(0.5..=4.5).contains(&self.defaults.min_rating) {
            return Err(VoyageError::config(
                "Default minimum rating must be between 0.5 and 4.5",
            ));
        }

        if !(500..=50_000).contains(&self.defaults.radius_meters) {
            return Err(VoyageError::config(
                "Default search radius must be between 500 and 50000 meters",
            ));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(VoyageError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(VoyageError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        for (name, url) in [
            ("Places", &self.places.base_url),
            ("Gemini", &self.gemini.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(VoyageError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                )));
            }
        }

        Ok(())
    }
}

//! Configuration management for `Viajarte`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ViajarteError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `Viajarte`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViajarteConfig {
    /// Trip store configuration
    pub store: StoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Itinerary planning settings
    pub itinerary: ItineraryConfig,
}

/// Trip store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend (memory or fjall)
    #[serde(default = "default_store_backend")]
    pub backend: String,
    /// Data directory of the fjall backend
    #[serde(default = "default_store_path")]
    pub path: String,
    /// Collection holding trips
    #[serde(default = "default_trips_collection")]
    pub trips_collection: String,
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

/// Itinerary planning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryConfig {
    /// Stay length for trips without start or end date
    #[serde(default = "default_stay_days")]
    pub default_stay_days: u32,
    /// Radius for nearby city suggestions
    #[serde(default = "default_suggestion_radius")]
    pub suggestion_radius_km: u32,
    /// Maximum number of nearby suggestions
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: u32,
}

const STORE_BACKENDS: [&str; 2] = ["memory", "fjall"];

// Default value functions
fn default_store_backend() -> String {
    "fjall".to_string()
}

fn default_store_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("viajarte").join("store"))
        .unwrap_or_else(|| PathBuf::from("viajarte-store"))
        .to_string_lossy()
        .into_owned()
}

fn default_trips_collection() -> String {
    crate::store::repository::TRIPS_COLLECTION.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_stay_days() -> u32 {
    crate::itinerary::DEFAULT_STAY_DAYS
}

fn default_suggestion_radius() -> u32 {
    1000
}

fn default_max_suggestions() -> u32 {
    crate::geo::DEFAULT_SUGGESTION_LIMIT as u32
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: default_store_path(),
            trips_collection: default_trips_collection(),
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

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self {
            default_stay_days: default_stay_days(),
            suggestion_radius_km: default_suggestion_radius(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl ViajarteConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // VIAJARTE_STORE__BACKEND=memory
        builder = builder.add_source(
            Environment::with_prefix("VIAJARTE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ViajarteConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("viajarte").join("config.toml"))
    }

    /// Create the store data directory if it doesn't exist
    pub fn ensure_store_dir(&self) -> crate::Result<PathBuf> {
        let path = PathBuf::from(&self.store.path);
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.store.backend.is_empty() {
            self.store.backend = default_store_backend();
        }
        if self.store.path.is_empty() {
            self.store.path = default_store_path();
        }
        if self.store.trips_collection.is_empty() {
            self.store.trips_collection = default_trips_collection();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.itinerary.default_stay_days == 0 {
            self.itinerary.default_stay_days = default_stay_days();
        }
        if self.itinerary.suggestion_radius_km == 0 {
            self.itinerary.suggestion_radius_km = default_suggestion_radius();
        }
        if self.itinerary.max_suggestions == 0 {
            self.itinerary.max_suggestions = default_max_suggestions();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.itinerary.default_stay_days > 60 {
            return Err(ViajarteError::config("Default stay cannot exceed 60 days").into());
        }

        if self.itinerary.suggestion_radius_km > 20_000 {
            return Err(
                ViajarteError::config("Suggestion radius cannot exceed 20000 km").into(),
            );
        }

        if self.itinerary.max_suggestions > default_max_suggestions() {
            return Err(ViajarteError::config(format!(
                "Maximum suggestions cannot exceed {}",
                default_max_suggestions()
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ViajarteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ViajarteError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !STORE_BACKENDS.contains(&self.store.backend.as_str()) {
            return Err(ViajarteError::config(format!(
                "Invalid store backend '{}'. Must be one of: {}",
                self.store.backend,
                STORE_BACKENDS.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATA_FILE="assistencia.csv"
//! export LISTEN="0.0.0.0:3000"
//! ```
//!
//! ## Optional Variables
//!
//! - `DATA_FILE` - Partner table path (default: `assistencia.csv`)
//! - `DATA_DELIMITER` - Single-byte field delimiter (default: `,`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `MAP_CENTER_LAT` / `MAP_CENTER_LON` - Default map center (default: center of Brazil)
//! - `MAP_ZOOM` - Default zoom level, 1 to 18 (default: 4)
//! - `STATIC_DIR` - Directory served under `/static` (default: `static`)

use anyhow::{Context, Result};
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// Default view of the map when no bounds fitting is requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_lat: -14.2350,
            center_lon: -51.9253,
            zoom: 4,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: String,
    /// Raw `DATA_DELIMITER` value; must be exactly one ASCII character.
    pub data_delimiter: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub map: MapSettings,
    pub static_dir: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let data_file = env::var("DATA_FILE").unwrap_or_else(|_| "assistencia.csv".to_string());
        let data_delimiter = env::var("DATA_DELIMITER").unwrap_or_else(|_| ",".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        let defaults = MapSettings::default();
        let map = MapSettings {
            center_lat: parse_var("MAP_CENTER_LAT")?.unwrap_or(defaults.center_lat),
            center_lon: parse_var("MAP_CENTER_LON")?.unwrap_or(defaults.center_lon),
            zoom: parse_var("MAP_ZOOM")?.unwrap_or(defaults.zoom),
        };

        Ok(Self {
            data_file,
            data_delimiter,
            listen_addr,
            log_level,
            log_format,
            map,
            static_dir,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data_file` is empty
    /// - `data_delimiter` is not a single ASCII character
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the map center or zoom is out of range
    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            anyhow::bail!("DATA_FILE must not be empty");
        }

        if self.delimiter().is_none() {
            anyhow::bail!(
                "DATA_DELIMITER must be a single ASCII character, got '{}'",
                self.data_delimiter
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !(-90.0..=90.0).contains(&self.map.center_lat) {
            anyhow::bail!(
                "MAP_CENTER_LAT must be between -90 and 90, got {}",
                self.map.center_lat
            );
        }

        if !(-180.0..=180.0).contains(&self.map.center_lon) {
            anyhow::bail!(
                "MAP_CENTER_LON must be between -180 and 180, got {}",
                self.map.center_lon
            );
        }

        if !(1..=18).contains(&self.map.zoom) {
            anyhow::bail!("MAP_ZOOM must be between 1 and 18, got {}", self.map.zoom);
        }

        Ok(())
    }

    /// Replaces the data file and delimiter where an override is given.
    pub fn with_data_source(mut self, file: Option<String>, delimiter: Option<char>) -> Self {
        if let Some(file) = file {
            self.data_file = file;
        }
        if let Some(delimiter) = delimiter {
            self.data_delimiter = delimiter.to_string();
        }
        self
    }

    /// The delimiter as a byte, if it is a single ASCII character.
    pub fn delimiter(&self) -> Option<u8> {
        match self.data_delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Some(*byte),
            _ => None,
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Data file: {}", self.data_file);
        tracing::info!("  Data delimiter: '{}'", self.data_delimiter);
        tracing::info!(
            "  Map center: {}, {} (zoom {})",
            self.map.center_lat,
            self.map.center_lon,
            self.map.zoom
        );
        tracing::info!("  Static dir: {}", self.static_dir);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses an optional environment variable, failing on malformed values.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value '{value}'")),
        Err(_) => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

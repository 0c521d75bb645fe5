//! Catalog seed configuration loading from config.toml
//!
//! The platforms and brands listed in config.toml are inserted on startup when
//! they are missing. Rows that already exist are left as they are, so fees
//! edited at runtime survive a restart.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Sales platforms to seed
    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,
    /// Brands to seed
    #[serde(default)]
    pub brands: Vec<BrandConfig>,
}

/// Configuration for a single sales platform
#[derive(Debug, Deserialize, Clone)]
pub struct PlatformConfig {
    /// Unique platform name (e.g. "X")
    pub name: String,
    /// Percentage fee, `10.00` meaning 10%
    pub fee_percentage: Decimal,
    /// Flat fee per sale
    #[serde(default)]
    pub fixed_fee: Decimal,
}

/// Configuration for a single brand
#[derive(Debug, Deserialize, Clone)]
pub struct BrandConfig {
    /// Unique brand name
    pub name: String,
}

/// Loads catalog seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses catalog seed configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads catalog seed configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

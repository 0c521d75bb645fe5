/// Database configuration and connection management
pub mod database;

/// Platform and brand seed configuration from config.toml
pub mod catalog;

/// Staff user configuration from environment variables
pub mod staff;

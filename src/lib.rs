//! Habr-Harvest: a topic-flow article harvester
//!
//! This crate walks the paginated topic listings of a Habr-style site,
//! extracts structured article fields, deduplicates the results and exports
//! them to a CSV file.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for Habr-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Failed to extract article from {url}: {source}")]
    Extraction {
        url: String,
        source: ExtractionError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Article field extraction errors
///
/// Each mandatory field fails with its own variant so that logs say which
/// part of the page template was missing.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("title heading not found")]
    MissingTitle,

    #[error("publication timestamp not found")]
    MissingDate,

    #[error("malformed publication timestamp '{value}': {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error("article body not found")]
    MissingBody,

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Result type alias for Habr-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, Harvester};
pub use model::{Article, TextType, Topic};
pub use output::{export_collection, ArticleCollection};

//! Output handler traits and types
//!
//! This module defines the trait interface for article sinks and the
//! errors they report.

use crate::model::Article;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode tags: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Column names of an exported article table, in row order
pub const ARTICLE_COLUMNS: [&str; 7] = [
    "name",
    "publication_date",
    "text",
    "link",
    "author",
    "tags",
    "topic",
];

/// Trait for destinations of a deduplicated article sequence
///
/// Implementations receive the whole sequence at once; the caller has
/// already removed duplicates.
pub trait ArticleSink {
    /// Writes every article, in order
    fn write_articles<'a, I>(&mut self, articles: I) -> OutputResult<usize>
    where
        I: IntoIterator<Item = &'a Article>;
}

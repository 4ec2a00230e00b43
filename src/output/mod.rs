//! Output module for collecting and exporting harvested articles
//!
//! This module handles:
//! - Accumulating articles during a run
//! - Deduplicating them by full-record equality
//! - Writing the result as a CSV table
//! - Recording harvest statistics

mod collection;
mod csv_output;
pub mod stats;
mod traits;

pub use collection::ArticleCollection;
pub use csv_output::{CsvOutputHandler, CSV_DATE_FORMAT};
pub use stats::{log_statistics, HarvestStatistics, TopicStats};
pub use traits::{ArticleSink, OutputError, OutputResult, ARTICLE_COLUMNS};

use crate::model::TextType;
use std::path::{Path, PathBuf};

/// Exports the deduplicated collection to `{output_dir}/{text_type}.csv`
///
/// The directory is created when missing and an existing file is
/// overwritten.
///
/// # Arguments
///
/// * `collection` - Articles gathered during the run
/// * `text_type` - Text type of the run, used as the file stem
/// * `output_dir` - Destination directory
///
/// # Returns
///
/// * `Ok((PathBuf, usize))` - Path of the written file and number of rows
/// * `Err(OutputError)` - Failed to create the directory or write the file
pub fn export_collection(
    collection: &ArticleCollection,
    text_type: TextType,
    output_dir: &Path,
) -> OutputResult<(PathBuf, usize)> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.csv", text_type.as_str()));

    let unique = collection.deduplicated();
    tracing::info!(
        "Exporting {} unique of {} collected articles to {}",
        unique.len(),
        collection.len(),
        path.display()
    );

    let mut handler = CsvOutputHandler::create(&path)?;
    let rows = handler.write_articles(unique)?;
    handler.into_inner()?;

    Ok((path, rows))
}

//! CSV output handler
//!
//! Writes one row per article under the fixed `ARTICLE_COLUMNS` header.
//! Missing authors become empty cells and tags are encoded as a JSON array
//! so that tag names containing commas survive a round trip.

use crate::model::Article;
use crate::output::traits::{ArticleSink, OutputError, OutputResult, ARTICLE_COLUMNS};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Timestamp layout of the `publication_date` column
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Article sink backed by a CSV writer
pub struct CsvOutputHandler<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvOutputHandler<File> {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CsvOutputHandler<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(inner),
        }
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write> ArticleSink for CsvOutputHandler<W> {
    fn write_articles<'a, I>(&mut self, articles: I) -> OutputResult<usize>
    where
        I: IntoIterator<Item = &'a Article>,
    {
        self.writer.write_record(ARTICLE_COLUMNS)?;

        let mut rows = 0;
        for article in articles {
            self.writer.write_record(article_row(article)?)?;
            rows += 1;
        }

        self.writer.flush()?;
        Ok(rows)
    }
}

/// Formats the cells of one article row
fn article_row(article: &Article) -> OutputResult<[String; 7]> {
    Ok([
        article.title().to_string(),
        article
            .publication_date()
            .format(CSV_DATE_FORMAT)
            .to_string(),
        article.body().to_string(),
        article.link().to_string(),
        article.author().unwrap_or_default().to_string(),
        serde_json::to_string(article.tags())?,
        article.topic().as_str().to_string(),
    ])
}

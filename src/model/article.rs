use crate::model::Topic;
use chrono::NaiveDateTime;

/// A single article extracted from the site
///
/// Articles are built once by the extractor and never mutated afterwards.
/// Equality and hashing cover every field, which is what export-time
/// deduplication relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Article {
    title: String,
    publication_date: NaiveDateTime,
    body: String,
    link: String,
    author: Option<String>,
    tags: Vec<String>,
    topic: Topic,
}

impl Article {
    /// Creates a new article from already-normalized field values
    pub fn new(
        title: impl Into<String>,
        publication_date: NaiveDateTime,
        body: impl Into<String>,
        link: impl Into<String>,
        author: Option<String>,
        tags: Vec<String>,
        topic: Topic,
    ) -> Self {
        Self {
            title: title.into(),
            publication_date,
            body: body.into(),
            link: link.into(),
            author,
            tags,
            topic,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publication_date(&self) -> NaiveDateTime {
        self.publication_date
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Source URL the article was fetched from
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }
}

//! Run-scoped article accumulator
//!
//! The orchestrator appends every successfully extracted article here.
//! Duplicates are kept while crawling and only collapsed on export.

use crate::model::Article;
use std::collections::HashSet;

/// Append-only sequence of articles gathered during one run
#[derive(Debug, Default, Clone)]
pub struct ArticleCollection {
    articles: Vec<Article>,
}

impl ArticleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an article, keeping duplicates
    pub fn push(&mut self, article: Article) {
        self.articles.push(article);
    }

    /// Number of articles appended so far, duplicates included
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// All appended articles in insertion order
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Returns the unique articles in first-seen order
    ///
    /// Two articles are the same only when every field matches, so two
    /// snapshots of one link with different text both survive.
    pub fn deduplicated(&self) -> Vec<&Article> {
        let mut seen = HashSet::with_capacity(self.articles.len());
        self.articles
            .iter()
            .filter(|article| seen.insert(*article))
            .collect()
    }
}

impl Extend<Article> for ArticleCollection {
    fn extend<T: IntoIterator<Item = Article>>(&mut self, iter: T) {
        self.articles.extend(iter);
    }
}

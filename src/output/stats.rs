//! Harvest statistics
//!
//! Counters collected while crawling a topic, and their run-level totals.

use crate::model::{TextType, Topic};

/// Counters for one topic crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicStats {
    pub topic: Topic,

    /// Listing pages requested
    pub pages_scanned: u32,

    /// Listing pages that returned no article links
    pub empty_pages: u32,

    /// Listing pages whose fetch failed after all retries
    pub listing_failures: u32,

    /// Article links discovered across all listing pages
    pub links_found: u64,

    /// Articles appended to the collection
    pub articles_added: u64,

    /// Article pages that failed to fetch or extract
    pub article_failures: u64,
}

impl TopicStats {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            pages_scanned: 0,
            empty_pages: 0,
            listing_failures: 0,
            links_found: 0,
            articles_added: 0,
            article_failures: 0,
        }
    }
}

/// Run-level statistics
#[derive(Debug, Clone)]
pub struct HarvestStatistics {
    pub text_type: TextType,

    /// Per-topic counters in crawl order
    pub topics: Vec<TopicStats>,

    /// Rows written after deduplication
    pub exported_rows: usize,
}

impl HarvestStatistics {
    pub fn new(text_type: TextType) -> Self {
        Self {
            text_type,
            topics: Vec::new(),
            exported_rows: 0,
        }
    }

    pub fn total_articles(&self) -> u64 {
        self.topics.iter().map(|t| t.articles_added).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.topics.iter().map(|t| t.article_failures).sum()
    }

    pub fn total_links(&self) -> u64 {
        self.topics.iter().map(|t| t.links_found).sum()
    }
}

/// Logs one topic's counters
pub fn log_topic_stats(stats: &TopicStats) {
    tracing::info!(
        "Topic {}: {} pages ({} empty, {} failed), {} links, {} articles added, {} failed",
        stats.topic,
        stats.pages_scanned,
        stats.empty_pages,
        stats.listing_failures,
        stats.links_found,
        stats.articles_added,
        stats.article_failures
    );
}

/// Logs the run summary
pub fn log_statistics(stats: &HarvestStatistics) {
    tracing::info!("=== Harvest Statistics ({}) ===", stats.text_type);
    for topic in &stats.topics {
        log_topic_stats(topic);
    }
    tracing::info!(
        "Total: {} links, {} articles collected, {} failed, {} rows exported",
        stats.total_links(),
        stats.total_articles(),
        stats.total_failures(),
        stats.exported_rows
    );
}

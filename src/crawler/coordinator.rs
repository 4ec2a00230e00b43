//! Harvest coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the other crawler pieces
//! together:
//! - Building listing URLs for a topic and text type
//! - Fetching listing pages and discovering article links
//! - Fetching and extracting each article
//! - Accumulating results and per-topic statistics
//!
//! Failures are contained at the smallest scope: a failed listing page
//! yields no links and a failed article is skipped. Neither stops the loop.

use crate::config::Config;
use crate::crawler::extractor::extract_article;
use crate::crawler::fetcher::{build_http_client, fetch_page, RetryPolicy};
use crate::crawler::parser::discover_links;
use crate::model::{Article, TextType, Topic};
use crate::output::stats::log_topic_stats;
use crate::output::{
    export_collection, log_statistics, ArticleCollection, HarvestStatistics, TopicStats,
};
use crate::HarvestError;
use reqwest::Client;
use std::path::{Path, PathBuf};

/// Main harvester structure
pub struct Harvester {
    config: Config,
    client: Client,
    policy: RetryPolicy,
}

impl Harvester {
    /// Creates a new harvester instance
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Successfully created harvester
    /// * `Err(HarvestError)` - Failed to build the HTTP client
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, config.fetch.timeout())?;
        let policy = RetryPolicy::from(&config.fetch);

        Ok(Self {
            config,
            client,
            policy,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the URL of one listing page
    ///
    /// Pages are numbered from 1.
    pub fn listing_url(&self, topic: Topic, text_type: TextType, page: u32) -> String {
        format!(
            "{}/ru/flows/{}/{}/page{}",
            self.config.site.base_url.trim_end_matches('/'),
            topic,
            text_type,
            page
        )
    }

    /// Crawls a topic given by name
    ///
    /// Both names are validated before any request is made; on an unknown
    /// name nothing is appended to `collection`.
    ///
    /// # Returns
    ///
    /// * `Ok(TopicStats)` - The topic was crawled
    /// * `Err(HarvestError::InvalidArgument)` - Unknown topic or text type
    pub async fn crawl_topic_by_name(
        &self,
        topic: &str,
        text_type: &str,
        collection: &mut ArticleCollection,
    ) -> Result<TopicStats, HarvestError> {
        let text_type: TextType = text_type.parse()?;
        let topic: Topic = topic.parse()?;
        Ok(self.crawl_topic(topic, text_type, collection).await)
    }

    /// Crawls every listing page of a topic
    ///
    /// Scans pages `1..=max_pages`. An empty page does not end the scan
    /// unless `stop-on-empty-page` is set. Every successfully extracted
    /// article is appended to `collection`.
    pub async fn crawl_topic(
        &self,
        topic: Topic,
        text_type: TextType,
        collection: &mut ArticleCollection,
    ) -> TopicStats {
        let max_pages = self.config.crawl.max_pages;
        let mut stats = TopicStats::new(topic);

        tracing::info!("Crawling topic {} ({})", topic, text_type);

        for page in 1..=max_pages {
            tracing::info!("Scanning listing page {} / {}", page, max_pages);
            stats.pages_scanned += 1;

            let listing_url = self.listing_url(topic, text_type, page);
            let links = match self.fetch_listing(&listing_url).await {
                Some(links) => links,
                None => {
                    stats.listing_failures += 1;
                    Vec::new()
                }
            };

            stats.links_found += links.len() as u64;

            if links.is_empty() {
                stats.empty_pages += 1;
                if self.config.crawl.stop_on_empty_page {
                    tracing::info!("No articles on page {}, ending topic {}", page, topic);
                    break;
                }
                continue;
            }

            let total = links.len();
            for (index, link) in links.iter().enumerate() {
                tracing::info!("Harvesting article {} / {}: {}", index + 1, total, link);

                match self.harvest_article(link, topic).await {
                    Ok(article) => {
                        collection.push(article);
                        stats.articles_added += 1;
                        tracing::info!("Added article to collection");
                    }
                    Err(e) => {
                        stats.article_failures += 1;
                        tracing::error!("{}", e);
                    }
                }
            }
        }

        log_topic_stats(&stats);
        stats
    }

    /// Crawls every configured topic for the configured text type
    pub async fn crawl_all(&self, collection: &mut ArticleCollection) -> HarvestStatistics {
        let text_type = self.config.crawl.text_type;
        let mut statistics = HarvestStatistics::new(text_type);

        for &topic in &self.config.crawl.topics {
            let stats = self.crawl_topic(topic, text_type, collection).await;
            statistics.topics.push(stats);
        }

        statistics
    }

    /// Fetches a listing page and returns its article links
    ///
    /// Returns `None` when the page could not be fetched.
    async fn fetch_listing(&self, url: &str) -> Option<Vec<String>> {
        match fetch_page(&self.client, url, &self.policy).await.into_body(url) {
            Ok(body) => {
                let links = discover_links(&body, &self.config.site.base_url);
                tracing::debug!("Found {} article links on {}", links.len(), url);
                Some(links)
            }
            Err(e) => {
                tracing::error!("Skipping listing page: {}", e);
                None
            }
        }
    }

    /// Fetches and extracts a single article
    async fn harvest_article(&self, url: &str, topic: Topic) -> Result<Article, HarvestError> {
        let body = fetch_page(&self.client, url, &self.policy)
            .await
            .into_body(url)?;

        extract_article(&body, url, topic).map_err(|source| HarvestError::Extraction {
            url: url.to_string(),
            source,
        })
    }
}

/// Runs a complete harvest
///
/// This function orchestrates the whole run:
///
/// 1. Build the harvester and an empty collection
/// 2. Crawl each configured topic in order
/// 3. Export the deduplicated collection to `{output}/{text-type}.csv`
/// 4. Log run statistics
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok((PathBuf, HarvestStatistics))` - Path of the exported file and run counters
/// * `Err(HarvestError)` - Client construction or export failed
///
/// # Example
///
/// ```no_run
/// use habr_harvest::config::Config;
/// use habr_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (path, stats) = run_harvest(Config::default()).await?;
/// println!("{} rows written to {}", stats.exported_rows, path.display());
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<(PathBuf, HarvestStatistics), HarvestError> {
    let harvester = Harvester::new(config)?;
    let mut collection = ArticleCollection::new();

    let start_time = std::time::Instant::now();
    let mut statistics = harvester.crawl_all(&mut collection).await;

    let output_dir = Path::new(&harvester.config().output.directory);
    let (path, rows) = export_collection(&collection, statistics.text_type, output_dir)?;
    statistics.exported_rows = rows;

    log_statistics(&statistics);
    tracing::info!(
        "Harvest completed in {:?}, wrote {}",
        start_time.elapsed(),
        path.display()
    );

    Ok((path, statistics))
}

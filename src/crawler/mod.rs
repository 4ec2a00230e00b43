//! Crawler module for listing traversal and article extraction
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with retry logic
//! - Listing page parsing and article link discovery
//! - Article field extraction
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod parser;

pub use coordinator::{run_harvest, Harvester};
pub use extractor::{
    collapse_whitespace, extract_article, normalize_title, parse_publication_date, BodyRule,
    BODY_RULES, DATE_FORMAT,
};
pub use fetcher::{build_http_client, fetch_page, FetchResult, RetryPolicy};
pub use parser::discover_links;

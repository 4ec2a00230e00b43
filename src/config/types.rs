use crate::model::{TextType, Topic};
use serde::Deserialize;
use std::time::Duration;

/// Browser identification sent with every request; the site rejects
/// clients that do not look like a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/79.0.3945.79 Safari/537.36";

/// Main configuration structure for Habr-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host prepended to listing paths and relative article links
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://habr.com".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Additional attempts after the first failed request
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed pause between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default)]
    pub retry_delay_ms: u64,

    /// Per-request timeout; the HTTP client default applies when unset
    #[serde(rename = "timeout-secs", default)]
    pub timeout_secs: Option<u64>,
}

impl FetchConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: 0,
            timeout_secs: None,
        }
    }
}

fn default_max_retries() -> u32 {
    5
}

/// Crawl scope configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Number of listing pages scanned per topic
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Listing kind harvested by a run
    #[serde(rename = "text-type", default = "default_text_type")]
    pub text_type: TextType,

    /// Topics visited in order
    #[serde(default = "default_topics")]
    pub topics: Vec<Topic>,

    /// End a topic at the first listing page without article links
    #[serde(rename = "stop-on-empty-page", default)]
    pub stop_on_empty_page: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            text_type: default_text_type(),
            topics: default_topics(),
            stop_on_empty_page: false,
        }
    }
}

fn default_max_pages() -> u32 {
    50
}

fn default_text_type() -> TextType {
    TextType::News
}

fn default_topics() -> Vec<Topic> {
    Topic::ALL.to_vec()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `{text-type}.csv`
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "data".to_string(),
        }
    }
}

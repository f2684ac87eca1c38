use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// What to do when a page contains a reference that is neither
/// root-relative nor http(s)-absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinkPolicy {
    /// Abort the whole crawl and surface the error to the caller
    #[default]
    AbortCrawl,

    /// Abort only the offending page; the rest of the crawl continues
    SkipPage,
}

/// Configuration for one crawl invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from; its host defines the crawl domain
    pub seed_url: String,

    /// Maximum number of fetches in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Optional ceiling on the number of recorded pages
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Regex patterns for discovered URLs that should never be fetched
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Policy for malformed hrefs/srcs encountered during extraction
    #[serde(default)]
    pub malformed_links: MalformedLinkPolicy,
}

impl CrawlConfig {
    /// Create a configuration with default values for everything but the seed
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            max_concurrency: default_max_concurrency(),
            max_pages: None,
            user_agent: default_user_agent(),
            exclude_patterns: default_exclude_patterns(),
            malformed_links: MalformedLinkPolicy::default(),
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    5
}

/// Default User-Agent header
fn default_user_agent() -> String {
    format!("site-atlas/{}", env!("CARGO_PKG_VERSION"))
}

/// Non-document resources skipped during fan-out. Sitemaps and feeds link
/// to pages but are not pages themselves.
fn default_exclude_patterns() -> Vec<String> {
    vec![r"\.xml$".to_string()]
}

// Re-export modules
pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod ledger;
pub mod normalize;
pub mod report;
pub mod results;

// Re-export commonly used types for convenience
pub use config::{CrawlConfig, MalformedLinkPolicy};
pub use error::CrawlError;
pub use results::{CrawlResult, PageRecord};

/// Builder for one crawl invocation.
///
/// ```no_run
/// use site_atlas::Crawl;
///
/// # async fn example() -> Result<(), site_atlas::CrawlError> {
/// let pages = Crawl::new("https://example.com")
///     .with_max_concurrency(3)
///     .with_max_pages(50)
///     .run()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Crawl {
    config: CrawlConfig,
}

impl Crawl {
    /// Create a crawl of the domain the seed URL belongs to
    pub fn new(seed_url: &str) -> Self {
        Self {
            config: CrawlConfig::new(seed_url),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Set the maximum number of fetches in flight at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Stop claiming new pages once this many have been recorded
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = Some(max_pages);
        self
    }

    /// Set the User-Agent header sent with every request
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.config.user_agent = user_agent.to_string();
        self
    }

    /// Replace the default non-document exclude patterns
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config.exclude_patterns = patterns;
        self
    }

    /// Choose how malformed references found during extraction are handled
    pub fn with_malformed_link_policy(mut self, policy: MalformedLinkPolicy) -> Self {
        self.config.malformed_links = policy;
        self
    }

    /// Run the crawl to completion and return the recorded pages
    pub async fn run(self) -> Result<CrawlResult, CrawlError> {
        crawl::crawl(&self.config).await
    }
}

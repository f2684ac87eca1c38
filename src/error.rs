use thiserror::Error;

/// Errors produced while crawling a site.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL could not be parsed at all.
    #[error("invalid seed URL: {0}")]
    Seed(#[from] url::ParseError),

    /// Transport-level failure while talking to the remote host.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("URL returned status code {0}")]
    HttpStatus(u16),

    /// The server answered with something that is not an HTML document.
    #[error("URL did not return HTML content (got {0})")]
    ContentType(String),

    /// An anchor href that is neither root-relative nor http(s)-absolute.
    #[error("Invalid URL found: {0}")]
    InvalidLink(String),

    /// An image src that is neither root-relative nor http(s)-absolute.
    #[error("Invalid image URL found: {0}")]
    InvalidImage(String),

    /// An exclude pattern in the configuration is not a valid regex.
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A spawned crawl branch panicked.
    #[error("crawl task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Writing the report failed.
    #[error("report error: {0}")]
    Report(#[from] std::io::Error),
}

use crate::error::CrawlError;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// HTTP client for retrieving pages, with status and content-type validation
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher sending the given User-Agent with every request
    pub fn new(user_agent: &str) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one URL and returns its body as HTML text.
    ///
    /// Fails on transport errors, on any status of 400 or above, and on
    /// responses whose Content-Type does not declare text/html. Does not
    /// retry; the caller decides what a failed fetch means.
    pub async fn fetch_html(&self, url: &str) -> Result<String, CrawlError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(CrawlError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("text/html") {
            return Err(CrawlError::ContentType(content_type));
        }

        let body = response.text().await?;
        ::log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

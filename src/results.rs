use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The final crawl output: normalized URL key to finalized page record.
pub type CrawlResult = HashMap<String, PageRecord>;

/// Everything extracted from one fetched page. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// The exact URL the page was fetched from (not normalized)
    pub url: String,

    /// Text of the first h1 element, empty if the page has none
    pub h1: String,

    /// First paragraph, preferring one inside the first main element
    pub first_paragraph: String,

    /// Absolute link targets in document order, duplicates preserved
    pub outgoing_links: Vec<String>,

    /// Absolute image targets in document order, duplicates preserved
    pub image_urls: Vec<String>,
}

impl PageRecord {
    /// Create a new page record
    pub fn new(
        url: String,
        h1: String,
        first_paragraph: String,
        outgoing_links: Vec<String>,
        image_urls: Vec<String>,
    ) -> Self {
        Self {
            url,
            h1,
            first_paragraph,
            outgoing_links,
            image_urls,
        }
    }
}

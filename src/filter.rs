use regex::Regex;
use url::Url;

/// Decides which discovered URLs enter the crawl.
///
/// Two rules apply, in order: the URL must share the seed's host (crawls
/// never leave the starting domain), and it must not match any of the
/// exclude patterns (non-document resources such as sitemaps).
#[derive(Debug)]
pub struct UrlFilter {
    seed_host: String,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a filter scoped to the seed's host with the given exclude patterns
    pub fn new(seed: &Url, exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            seed_host: seed.host_str().unwrap_or_default().to_lowercase(),
            exclude_regexes,
        })
    }

    /// Determine if a discovered URL should be crawled
    pub fn should_crawl(&self, url: &Url) -> bool {
        if !self.is_in_domain(url) {
            return false;
        }

        let url_str = url.as_str();
        for regex in &self.exclude_regexes {
            if regex.is_match(url_str) {
                return false;
            }
        }

        true
    }

    /// Check if a URL shares the seed's host. Being off-domain is a normal
    /// skip, never an error.
    fn is_in_domain(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => host.eq_ignore_ascii_case(&self.seed_host),
            None => false,
        }
    }
}

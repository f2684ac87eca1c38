use crate::config::{CrawlConfig, MalformedLinkPolicy};
use crate::error::CrawlError;
use crate::extract::extract_page;
use crate::fetch::Fetcher;
use crate::filter::UrlFilter;
use crate::ledger::{ClaimOutcome, VisitedLedger};
use crate::normalize::normalize_url;
use crate::results::CrawlResult;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Everything a crawl branch needs, shared across all spawned tasks.
/// The ledger mutex and the semaphore are the only synchronization in the
/// whole crawl; the semaphore is never acquired while the ledger is locked.
struct CrawlContext {
    filter: UrlFilter,
    fetcher: Fetcher,
    ledger: VisitedLedger,
    limiter: Semaphore,
    max_pages: Option<usize>,
    malformed_links: MalformedLinkPolicy,
}

/// Crawls every same-domain page reachable from the configured seed and
/// returns the finalized page records keyed by normalized URL.
pub async fn crawl(config: &CrawlConfig) -> Result<CrawlResult, CrawlError> {
    let seed = Url::parse(&config.seed_url)?;
    let filter = UrlFilter::new(&seed, &config.exclude_patterns)?;
    let fetcher = Fetcher::new(&config.user_agent)?;

    ::log::info!(
        "Starting crawl of {} (concurrency {}, page budget {:?})",
        seed,
        config.max_concurrency,
        config.max_pages
    );

    let ctx = Arc::new(CrawlContext {
        filter,
        fetcher,
        ledger: VisitedLedger::new(),
        limiter: Semaphore::new(config.max_concurrency),
        max_pages: config.max_pages,
        malformed_links: config.malformed_links,
    });

    crawl_page(Arc::clone(&ctx), seed).await?;

    let result = ctx.ledger.snapshot().await;
    ::log::info!("Crawl complete: {} pages recorded", result.len());
    Ok(result)
}

/// One branch of the crawl: claim the URL, fetch it, extract it, record it,
/// then fan out into a child branch per discovered link.
///
/// The branch does not complete until every child it spawned has completed.
/// Returned boxed because the recursion goes through spawned tasks.
fn crawl_page(
    ctx: Arc<CrawlContext>,
    url: Url,
) -> Pin<Box<dyn Future<Output = Result<(), CrawlError>> + Send>> {
    Box::pin(async move {
        if !ctx.filter.should_crawl(&url) {
            ::log::debug!("Skipping {}: outside crawl scope", url);
            return Ok(());
        }

        let key = normalize_url(&url);
        match ctx.ledger.try_claim(&key, ctx.max_pages).await {
            ClaimOutcome::Claimed => {}
            ClaimOutcome::AlreadySeen => {
                ::log::debug!("Skipping {}: already visited", url);
                return Ok(());
            }
            ClaimOutcome::BudgetExhausted => {
                ::log::debug!("Skipping {}: page budget reached", url);
                return Ok(());
            }
        }

        // The claim lock is gone by now; waiting for a fetch slot while
        // holding it would stall every other branch.
        let permit = ctx.limiter.acquire().await.unwrap();

        ::log::info!("Crawling {}", url);
        let html = match ctx.fetcher.fetch_html(url.as_str()).await {
            Ok(html) => html,
            Err(err) => {
                // Recoverable: this branch ends, siblings are unaffected
                ::log::warn!("Failed to fetch {}: {}", url, err);
                drop(permit);
                ctx.ledger.release(&key).await;
                return Ok(());
            }
        };

        let record = match extract_page(&html, &url) {
            Ok(record) => record,
            Err(err) => {
                drop(permit);
                match ctx.malformed_links {
                    MalformedLinkPolicy::AbortCrawl => {
                        ::log::error!("Aborting crawl at {}: {}", url, err);
                        return Err(err);
                    }
                    MalformedLinkPolicy::SkipPage => {
                        // The claim stays in place so the page is not
                        // refetched if another page links to it too.
                        ::log::warn!("Skipping {}: {}", url, err);
                        return Ok(());
                    }
                }
            }
        };
        drop(permit);

        ::log::debug!(
            "Extracted {}: {} links, {} images",
            url,
            record.outgoing_links.len(),
            record.image_urls.len()
        );
        let links = record.outgoing_links.clone();
        ctx.ledger.record(&key, record).await;

        let mut children = JoinSet::new();
        for link in links {
            // Outgoing links were resolved during extraction, so they parse
            let Ok(next) = Url::parse(&link) else { continue };
            children.spawn(crawl_page(Arc::clone(&ctx), next));
        }

        // Structured join: drain every child even if one of them failed,
        // then report the first failure
        let mut outcome = Ok(());
        while let Some(joined) = children.join_next().await {
            let branch_result = match joined {
                Ok(result) => result,
                Err(join_err) => Err(CrawlError::from(join_err)),
            };
            if let Err(err) = branch_result {
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        outcome
    })
}

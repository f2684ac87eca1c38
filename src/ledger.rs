use crate::results::{CrawlResult, PageRecord};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// State of one normalized URL inside the ledger
#[derive(Debug, Clone)]
enum PageSlot {
    /// A task owns the fetch for this key but has not finished it
    Claimed,

    /// The page was fetched and extracted
    Recorded(PageRecord),
}

/// Outcome of trying to claim a URL for fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The caller now owns the fetch for this key
    Claimed,

    /// Another task already owns or finished this key
    AlreadySeen,

    /// The page budget is exhausted; no new claims are admitted
    BudgetExhausted,
}

/// Shared registry of every page the crawl has seen.
///
/// The single source of truth for "already visited". All operations run
/// under one mutex, so the check-and-insert in `try_claim` is atomic: two
/// tasks can never both observe a key as absent. The page-budget check
/// happens under the same lock for the same reason.
#[derive(Debug, Default)]
pub struct VisitedLedger {
    slots: Mutex<HashMap<String, PageSlot>>,
}

impl VisitedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a key for exclusive fetching.
    ///
    /// If `max_pages` is set, the budget check counts claims as well as
    /// recorded pages: every admitted fetch may become a record, so admitting
    /// more than the budget could overshoot it. Failed fetches release their
    /// claim and hand the budget room back. Fetches already in flight are
    /// never cut short.
    pub async fn try_claim(&self, key: &str, max_pages: Option<usize>) -> ClaimOutcome {
        let mut slots = self.slots.lock().await;

        if let Some(limit) = max_pages {
            if slots.len() >= limit {
                return ClaimOutcome::BudgetExhausted;
            }
        }

        if slots.contains_key(key) {
            return ClaimOutcome::AlreadySeen;
        }
        slots.insert(key.to_string(), PageSlot::Claimed);
        ClaimOutcome::Claimed
    }

    /// Finalize a previously claimed key with its page record
    pub async fn record(&self, key: &str, record: PageRecord) {
        let mut slots = self.slots.lock().await;
        slots.insert(key.to_string(), PageSlot::Recorded(record));
    }

    /// Remove a claim after a failed fetch.
    ///
    /// Link discovery only runs over already-fetched pages, so within one
    /// crawl nothing re-queues a released key; the removal matters only if
    /// re-queuing is ever added.
    pub async fn release(&self, key: &str) {
        let mut slots = self.slots.lock().await;
        slots.remove(key);
    }

    /// The finalized-only view: recorded pages, placeholders excluded
    pub async fn snapshot(&self) -> CrawlResult {
        let slots = self.slots.lock().await;
        slots
            .iter()
            .filter_map(|(key, slot)| match slot {
                PageSlot::Recorded(record) => Some((key.clone(), record.clone())),
                PageSlot::Claimed => None,
            })
            .collect()
    }
}

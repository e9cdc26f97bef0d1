//! Paged retrieval of a player's match ids.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::error::AppError;
use crate::riot::{Region, RiotClient};

/// Hard upper bound of Match-v5 `count` per request.
pub const MAX_MATCH_IDS_PER_REQUEST: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    pub max_matches: u32,
    pub batch_size: u32,
    pub delay: Duration,
}

impl HistoryOptions {
    /// `batch_size` is clamped to `1..=100`.
    pub fn new(max_matches: u32, batch_size: u32, delay: Duration) -> Self {
        Self {
            max_matches,
            batch_size: batch_size.clamp(1, MAX_MATCH_IDS_PER_REQUEST),
            delay,
        }
    }
}

/// Why paging stopped.
#[derive(Debug)]
pub enum HistoryEnd {
    /// The requested number of ids was reached.
    CeilingReached,
    /// The player has no further matches.
    Exhausted,
    /// A page request failed; the ids gathered so far are kept.
    Failed(AppError),
}

#[derive(Debug)]
pub struct MatchHistory {
    /// Most recent first.
    pub ids: Vec<String>,
    pub batches: u32,
    pub end: HistoryEnd,
}

#[instrument(skip(client, options), fields(max = options.max_matches))]
pub async fn fetch_match_history(
    client: &RiotClient,
    region: Region,
    puuid: &str,
    options: &HistoryOptions,
) -> MatchHistory {
    let mut ids = Vec::new();
    let mut batches = 0;
    let mut start = 0;

    let end = loop {
        if start >= options.max_matches {
            break HistoryEnd::CeilingReached;
        }

        let count = options.batch_size.min(options.max_matches - start);
        info!(
            "📜 Fetching match ids {}-{}/{}",
            start + 1,
            start + count,
            options.max_matches
        );

        let page = match client.get_match_ids(region, puuid, start, count).await {
            Ok(page) => page,
            Err(e) => {
                warn!(
                    error = %e,
                    status = ?e.status(),
                    start,
                    "📜 ⚠️ Match id page failed, keeping partial history"
                );
                break HistoryEnd::Failed(e);
            }
        };
        batches += 1;

        let received = page.len() as u32;
        ids.extend(page.into_iter().take(count as usize));

        if received < count {
            debug!(received, requested = count, "📜 Short page, history exhausted");
            break HistoryEnd::Exhausted;
        }

        start += count;
        if start < options.max_matches {
            tokio::time::sleep(options.delay).await;
        }
    };

    info!(total = ids.len(), batches, "📜 Match history collected");

    MatchHistory { ids, batches, end }
}

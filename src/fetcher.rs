use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::riot::{MatchRecord, Region, RiotClient};

#[derive(Debug, Default)]
pub struct FetchedMatches {
    /// Successful fetches, in request order.
    pub records: Vec<MatchRecord>,
    pub failed: Vec<String>,
}

/// Fetch every match sequentially. A failed match is logged and skipped;
/// `delay` follows every request whatever its outcome.
#[instrument(skip_all, fields(count = match_ids.len()))]
pub async fn fetch_matches(
    client: &RiotClient,
    region: Region,
    match_ids: &[String],
    delay: Duration,
) -> FetchedMatches {
    let mut fetched = FetchedMatches::default();
    let total = match_ids.len();

    for (i, match_id) in match_ids.iter().enumerate() {
        info!("⚔️ Fetching match {}/{}: {}", i + 1, total, match_id);

        match client.get_match_raw(region, match_id).await {
            Ok(record) => fetched.records.push(record),
            Err(e) => {
                warn!(
                    error = %e,
                    status = ?e.status(),
                    match_id = %match_id,
                    "⚔️ ⚠️ Match fetch failed, skipping"
                );
                fetched.failed.push(match_id.clone());
            }
        }

        tokio::time::sleep(delay).await;
    }

    info!(
        fetched = fetched.records.len(),
        failed = fetched.failed.len(),
        "⚔️ Match details collected"
    );

    fetched
}

use chrono::Local;
use tracing::{info, instrument, warn};

use crate::config::{Config, RiotId};
use crate::error::AppError;
use crate::export::{self, ExportReport};
use crate::extract;
use crate::fetcher;
use crate::history::{self, HistoryEnd};
use crate::riot::RiotClient;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub puuid: String,
    pub match_ids: usize,
    pub failed_matches: Vec<String>,
    pub export: ExportReport,
}

/// Resolve the player, list their matches, fetch, extract and export.
///
/// Account lookup, summoner lookup and an empty history abort the run before
/// anything is written. Individual match failures only shrink the output.
#[instrument(
    skip(client, config, riot_id),
    fields(riot_id = %riot_id, platform = %config.platform)
)]
pub async fn run(
    client: &RiotClient,
    config: &Config,
    riot_id: &RiotId,
) -> Result<RunSummary, AppError> {
    let platform = config.platform;
    let region = platform.to_region();

    info!("🔎 Resolving {}", riot_id);
    let account = client
        .get_account_by_riot_id(region, &riot_id.game_name, &riot_id.tag_line)
        .await?;
    info!(puuid = %account.puuid, "🔎 Account resolved");

    let summoner = client
        .get_summoner_by_puuid(platform, &account.puuid)
        .await?;
    info!(
        level = summoner.summoner_level,
        profile_icon = summoner.profile_icon_id,
        "🔎 Summoner found"
    );

    let history =
        history::fetch_match_history(client, region, &account.puuid, &config.history_options())
            .await;
    if let HistoryEnd::Failed(e) = &history.end {
        warn!(
            error = %e,
            kept = history.ids.len(),
            "📜 ⚠️ Continuing with partial history"
        );
    }
    if history.ids.is_empty() {
        return Err(AppError::EmptyMatchHistory(riot_id.to_string()));
    }

    let fetched =
        fetcher::fetch_matches(client, region, &history.ids, config.detail_delay).await;

    let rows = extract::extract_rows(&fetched.records, &account.puuid);

    let stem = export::output_stem(riot_id, &Local::now());
    let export = export::export(&config.output_dir, &stem, &fetched.records, rows)?;

    Ok(RunSummary {
        puuid: account.puuid,
        match_ids: history.ids.len(),
        failed_matches: fetched.failed,
        export,
    })
}

use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::MatchRecord;

impl RiotClient {
    /// Up to `count` match ids of `puuid` from offset `start`, most recent
    /// first.
    pub async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        start: u32,
        count: u32,
    ) -> Result<Vec<String>, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?start={}&count={}",
            self.region_url(region),
            puuid,
            start,
            count
        );

        self.get(&url).await
    }

    /// Full match payload for `match_id`, kept exactly as received.
    /// [`MatchRecord::decode`] gives the typed view.
    pub async fn get_match_raw(
        &self,
        region: Region,
        match_id: &str,
    ) -> Result<MatchRecord, AppError> {
        let url = format!("{}/lol/match/v5/matches/{}", self.region_url(region), match_id);

        let raw = self.get(&url).await?;

        Ok(MatchRecord {
            match_id: match_id.to_string(),
            raw,
        })
    }
}

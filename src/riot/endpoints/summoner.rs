use crate::error::AppError;
use crate::riot::{Platform, RiotClient, SummonerDto};

impl RiotClient {
    /// Summoner profile of `puuid`, served by the platform host.
    pub async fn get_summoner_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<SummonerDto, AppError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_url(platform),
            puuid
        );

        self.get(&url).await
    }
}

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::AppError;
use crate::riot::region::{Platform, Region};

const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// Thin Riot API client: one authenticated `GET` helper shared by every endpoint.
#[derive(Debug, Clone)]
pub struct RiotClient {
    http: reqwest::Client,
    api_key: String,
    /// Replaces both platform and regional hosts when set (mock servers).
    base_url: Option<String>,
}

impl RiotClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Route every request to `base_url` instead of `*.api.riotgames.com`.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
            ..Self::new(api_key)
        }
    }

    /// Send requests through `http` (custom pool or TLS settings).
    pub fn with_http(self, http: reqwest::Client) -> Self {
        Self { http, ..self }
    }

    pub(crate) fn platform_url(&self, platform: Platform) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| platform.base_url())
    }

    pub(crate) fn region_url(&self, region: Region) -> String {
        self.base_url.clone().unwrap_or_else(|| region.base_url())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        trace!(url, "🛰️ GET");

        let res = self
            .http
            .get(url)
            .header(RIOT_TOKEN_HEADER, &self.api_key)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            status => {
                let message = res.text().await.unwrap_or_default();
                Err(AppError::RiotApi {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_override_replaces_every_route() {
        let client = RiotClient::with_base_url("key", "http://127.0.0.1:8080/");

        assert_eq!(client.platform_url(Platform::TR1), "http://127.0.0.1:8080");
        assert_eq!(client.region_url(Region::Europe), "http://127.0.0.1:8080");
    }

    #[test]
    fn default_routes_follow_riot_hosts() {
        let client = RiotClient::new("key");

        assert_eq!(
            client.platform_url(Platform::EUW1),
            "https://euw1.api.riotgames.com"
        );
        assert_eq!(
            client.region_url(Region::Americas),
            "https://americas.api.riotgames.com"
        );
    }

    #[tokio::test]
    async fn request_propagates_reqwest_error() {
        let client = RiotClient::new("RGAPI-INVALID-KEY");

        let res: Result<(), AppError> = client.get("ht!tp://invalid-url").await;

        assert!(matches!(res, Err(AppError::Http(_))));
    }
}

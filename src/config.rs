use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;
use crate::history::{HistoryOptions, MAX_MATCH_IDS_PER_REQUEST};
use crate::riot::Platform;

const DEFAULT_PLATFORM: Platform = Platform::TR1;
const DEFAULT_MAX_MATCHES: u32 = 500;
const DEFAULT_HISTORY_DELAY_MS: u64 = 1_500;
const DEFAULT_DETAIL_DELAY_MS: u64 = 1_200;
const DEFAULT_OUTPUT_DIR: &str = ".";

/// Riot ID of the player to export (`Name#Tag`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

impl RiotId {
    pub fn new(game_name: &str, tag_line: &str) -> Result<Self, AppError> {
        let game_name = game_name.trim();
        let tag_line = tag_line.trim().trim_start_matches('#');

        if game_name.is_empty() || tag_line.is_empty() {
            return Err(AppError::InvalidRiotId(format!("{game_name}#{tag_line}")));
        }

        Ok(Self {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }
}

impl FromStr for RiotId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (game_name, tag_line) = s
            .rsplit_once('#')
            .ok_or_else(|| AppError::InvalidRiotId(s.to_string()))?;

        Self::new(game_name, tag_line)
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

/// Run parameters. Credentials may be missing here and get completed
/// interactively by [`crate::prompt`].
#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: Option<String>,
    pub riot_id: Option<RiotId>,
    pub platform: Platform,
    pub max_matches: u32,
    pub batch_size: u32,
    pub history_delay: Duration,
    pub detail_delay: Duration,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            riot_api_key: None,
            riot_id: None,
            platform: DEFAULT_PLATFORM,
            max_matches: DEFAULT_MAX_MATCHES,
            batch_size: MAX_MATCH_IDS_PER_REQUEST,
            history_delay: Duration::from_millis(DEFAULT_HISTORY_DELAY_MS),
            detail_delay: Duration::from_millis(DEFAULT_DETAIL_DELAY_MS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let riot_api_key = var("RIOT_API_KEY").map(|k| k.trim().to_string());

        let riot_id = match (var("RIOT_ID"), var("RIOT_GAME_NAME"), var("RIOT_TAG_LINE")) {
            (Some(id), _, _) => Some(id.parse::<RiotId>()?),
            (None, Some(name), Some(tag)) => Some(RiotId::new(&name, &tag)?),
            _ => None,
        };

        let platform = match var("RIOT_PLATFORM") {
            Some(p) => p.parse::<Platform>()?,
            None => defaults.platform,
        };

        let max_matches = var("MAX_MATCHES")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.max_matches);

        let batch_size = var("MATCH_IDS_BATCH_SIZE")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.batch_size);

        let history_delay = var("MATCH_IDS_DELAY_MS")
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.history_delay);

        let detail_delay = var("MATCH_DETAIL_DELAY_MS")
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.detail_delay);

        let output_dir = var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        Ok(Self {
            riot_api_key,
            riot_id,
            platform,
            max_matches,
            batch_size,
            history_delay,
            detail_delay,
            output_dir,
        })
    }

    pub fn history_options(&self) -> HistoryOptions {
        HistoryOptions::new(self.max_matches, self.batch_size, self.history_delay)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert!(config.riot_api_key.is_none());
        assert!(config.riot_id.is_none());
        assert_eq!(config.platform, Platform::TR1);
        assert_eq!(config.max_matches, 500);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.history_delay, Duration::from_millis(1_500));
        assert_eq!(config.detail_delay, Duration::from_millis(1_200));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn values_are_read_and_bad_numbers_fall_back() {
        let config = config_from(&[
            ("RIOT_API_KEY", " RGAPI-123 "),
            ("RIOT_GAME_NAME", "Le Conservateur"),
            ("RIOT_TAG_LINE", "3012"),
            ("RIOT_PLATFORM", "euw"),
            ("MAX_MATCHES", "150"),
            ("MATCH_IDS_BATCH_SIZE", "fifty"),
            ("MATCH_DETAIL_DELAY_MS", "0"),
            ("OUTPUT_DIR", "exports"),
        ])
        .unwrap();

        assert_eq!(config.riot_api_key.as_deref(), Some("RGAPI-123"));
        assert_eq!(
            config.riot_id,
            Some(RiotId::new("Le Conservateur", "3012").unwrap())
        );
        assert_eq!(config.platform, Platform::EUW1);
        assert_eq!(config.max_matches, 150);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.detail_delay, Duration::ZERO);
        assert_eq!(config.output_dir, PathBuf::from("exports"));
    }

    #[test]
    fn riot_id_variable_wins_over_split_form() {
        let config = config_from(&[
            ("RIOT_ID", "Chalop#3012"),
            ("RIOT_GAME_NAME", "Other"),
            ("RIOT_TAG_LINE", "EUW"),
        ])
        .unwrap();

        assert_eq!(config.riot_id.unwrap().to_string(), "Chalop#3012");
    }

    #[test]
    fn invalid_platform_is_an_error() {
        assert!(matches!(
            config_from(&[("RIOT_PLATFORM", "moon")]),
            Err(AppError::InvalidRegion(_))
        ));
    }

    #[test]
    fn riot_id_parsing() {
        let id: RiotId = "Some Name#TR1".parse().unwrap();
        assert_eq!(id.game_name, "Some Name");
        assert_eq!(id.tag_line, "TR1");

        assert!(matches!(
            "NoTag".parse::<RiotId>(),
            Err(AppError::InvalidRiotId(_))
        ));
        assert!(matches!(
            "#Tag".parse::<RiotId>(),
            Err(AppError::InvalidRiotId(_))
        ));
        assert!(matches!(
            RiotId::new("Name", "  "),
            Err(AppError::InvalidRiotId(_))
        ));
        assert_eq!(RiotId::new("Name", "#EUW").unwrap().tag_line, "EUW");
    }
}

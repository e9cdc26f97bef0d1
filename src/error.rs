use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Player not found: {game_name}#{tag_line}")]
    PlayerNotFound { game_name: String, tag_line: String },

    #[error("Invalid Riot ID: {0:?} (expected Name#Tag)")]
    InvalidRiotId(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No match history found for {0}")]
    EmptyMatchHistory(String),
}

impl AppError {
    /// HTTP status carried by the error, if the Riot API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::RiotApi { status, .. } => Some(*status),
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_reported_for_api_answers() {
        let rate_limited = AppError::RiotApi {
            status: 429,
            message: "Rate limit exceeded".into(),
        };
        let io = AppError::Io(std::io::Error::other("disk full"));

        assert_eq!(rate_limited.status(), Some(429));
        assert_eq!(io.status(), None);
        assert_eq!(AppError::EmptyMatchHistory("a#b".into()).status(), None);
    }
}

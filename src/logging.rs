//! Console logging for a run, optionally mirrored to daily log files.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

use crate::error::AppError;

const DEFAULT_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "riot-match-export.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flushes the file writer when the process exits.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where and how much to log, read from `RUST_LOG`, `LOG_DIR` and
/// `LOG_MAX_FILES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub dir: Option<PathBuf>,
    /// Rolled files kept in `dir`; unbounded when `None`.
    pub max_files: Option<usize>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            filter: non_blank("RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            dir: non_blank("LOG_DIR").map(PathBuf::from),
            max_files: non_blank("LOG_MAX_FILES")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0),
        }
    }
}

/// Install the global subscriber from the process environment (`.env`
/// included).
pub fn init() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_with(&LogSettings::from_env())
}

pub fn init_with(settings: &LogSettings) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_new(&settings.filter)
        .map_err(|e| AppError::Config(format!("invalid log filter {:?}: {e}", settings.filter)))?;

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_target(false)
        .with_ansi(true)
        .with_level(true);

    let installed = match &settings.dir {
        Some(dir) => {
            let stdout = std::io::stdout.with_max_level(Level::INFO);
            let writer = stdout.and(file_writer(dir, settings.max_files)?);
            builder.with_writer(writer).try_init()
        }
        None => builder.try_init(),
    };
    installed.map_err(|e| AppError::Config(format!("logger already installed: {e}")))?;

    tracing::debug!(settings = ?settings, "logger initialized");

    Ok(())
}

fn file_writer(dir: &Path, max_files: Option<usize>) -> Result<NonBlocking, AppError> {
    let mut appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX);

    if let Some(n) = max_files {
        appender = appender.max_log_files(n);
    }

    let appender = appender
        .build(dir)
        .map_err(|e| AppError::Config(format!("cannot open log directory {}: {e}", dir.display())))?;

    let (writer, guard) = non_blocking(appender);
    FILE_GUARD
        .set(guard)
        .map_err(|_| AppError::Config("log file writer already set up".into()))?;

    Ok(writer)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> LogSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LogSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_info_on_stdout_only() {
        let s = settings(&[("LOG_DIR", "  ")]);

        assert_eq!(s.filter, "info");
        assert_eq!(s.dir, None);
        assert_eq!(s.max_files, None);
    }

    #[test]
    fn reads_file_logging_variables() {
        let s = settings(&[
            ("RUST_LOG", "riot_match_export=debug"),
            ("LOG_DIR", "/var/log/riot"),
            ("LOG_MAX_FILES", " 7 "),
        ]);

        assert_eq!(s.filter, "riot_match_export=debug");
        assert_eq!(s.dir, Some(PathBuf::from("/var/log/riot")));
        assert_eq!(s.max_files, Some(7));
    }

    #[test]
    fn unusable_retention_is_ignored() {
        assert_eq!(settings(&[("LOG_MAX_FILES", "0")]).max_files, None);
        assert_eq!(settings(&[("LOG_MAX_FILES", "many")]).max_files, None);
    }

    #[test]
    fn bad_filter_is_a_config_error() {
        let s = LogSettings {
            filter: "riot_match_export=loudest".to_string(),
            dir: None,
            max_files: None,
        };

        assert!(matches!(init_with(&s), Err(AppError::Config(_))));
    }
}

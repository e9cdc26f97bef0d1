use std::io;
use std::process::ExitCode;

use riot_match_export::config::Config;
use riot_match_export::error::AppError;
use riot_match_export::riot::RiotClient;
use riot_match_export::{logging, pipeline, prompt};
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "❌ Run aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let cli_riot_id = std::env::args().nth(1);

    let credentials = prompt::resolve_credentials(
        &config,
        cli_riot_id.as_deref(),
        io::stdin().lock(),
        io::stdout(),
    )?;

    info!("🐙 Starting export for {}", credentials.riot_id);

    let client = RiotClient::new(credentials.api_key);
    let summary = pipeline::run(&client, &config, &credentials.riot_id).await?;

    if !summary.failed_matches.is_empty() {
        warn!(
            failed = summary.failed_matches.len(),
            "⚠️ Some matches could not be fetched"
        );
    }
    if let Some(path) = &summary.export.archive {
        info!(
            matches = summary.export.archived_matches,
            "✅ Raw archive: {}",
            path.display()
        );
    }
    if let Some(path) = &summary.export.summary {
        info!(
            rows = summary.export.summary_rows,
            "✅ Summary: {}",
            path.display()
        );
    }

    Ok(())
}

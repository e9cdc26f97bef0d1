//! Interactive completion of the credentials missing from the environment.

use std::io::{BufRead, Write};

use crate::config::{Config, RiotId};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub riot_id: RiotId,
}

/// Riot ID precedence: `cli_riot_id`, then the configuration, then a prompt.
/// The API key comes from the configuration or a prompt.
pub fn resolve_credentials<R, W>(
    config: &Config,
    cli_riot_id: Option<&str>,
    mut input: R,
    mut output: W,
) -> Result<Credentials, AppError>
where
    R: BufRead,
    W: Write,
{
    let api_key = match &config.riot_api_key {
        Some(key) => key.clone(),
        None => {
            let key = ask(&mut input, &mut output, "Riot API key: ")?;
            if key.is_empty() {
                return Err(AppError::Config("a Riot API key is required".into()));
            }
            key
        }
    };

    let riot_id = match (cli_riot_id, &config.riot_id) {
        (Some(arg), _) => arg.parse::<RiotId>()?,
        (None, Some(id)) => id.clone(),
        (None, None) => {
            let game_name = ask(&mut input, &mut output, "Game name: ")?;
            let tag_line = ask(&mut input, &mut output, "Tag line: ")?;
            RiotId::new(&game_name, &tag_line)?
        }
    };

    Ok(Credentials { api_key, riot_id })
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, AppError> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line.trim().to_string())
}

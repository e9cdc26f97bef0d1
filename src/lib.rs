//! Export a League of Legends player's match history from the Riot API.
//!
//! The run is a single sequential pipeline: resolve the Riot ID, list match
//! ids, fetch each match, extract the player's row, then write a verbatim
//! JSON archive and an `.xlsx` summary.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetcher;
pub mod history;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod riot;

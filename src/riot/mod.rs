mod client;
mod endpoints;
mod region;
mod types;

pub use client::RiotClient;
pub use region::{Platform, Region};
pub use types::{
    AccountDto, InfoDto, MatchDto, MatchRecord, MetadataDto, ParticipantDto, SummonerDto,
};

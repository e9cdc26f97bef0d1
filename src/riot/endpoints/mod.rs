mod account;
mod match_v5;
mod summoner;

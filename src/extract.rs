use tracing::{debug, warn};

use crate::riot::{MatchDto, MatchRecord};

/// Flattened statistics of the tracked player in one match.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRow {
    pub match_id: String,
    /// Epoch milliseconds.
    pub game_creation: i64,
    pub queue_id: i32,
    pub game_mode: String,
    pub game_version: String,
    pub game_duration_secs: i64,
    pub game_duration_minutes: f64,
    pub champion_name: String,
    pub team_position: String,
    pub team_id: i32,
    pub win: bool,
    pub champ_level: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub kda: f64,
    pub gold_earned: i64,
    pub damage_to_champions: i64,
    pub damage_per_minute: f64,
    pub lane_minions: i32,
    pub neutral_minions: i32,
    pub total_minions: i32,
    pub cs_per_minute: f64,
    pub vision_score: i32,
    pub wards_placed: i32,
    pub wards_killed: i32,
    pub team_kills: i32,
    pub kill_participation: f64,
    pub first_blood: bool,
}

/// Row for `puuid` in `match_data`, or `None` when they did not play in it.
pub fn extract_row(match_data: &MatchDto, puuid: &str) -> Option<ExtractedRow> {
    let participant = match_data.participant_info_of(puuid)?;
    let info = &match_data.info;
    let duration = info.game_duration;
    let team_kills = match_data.team_kills(participant.team_id);

    Some(ExtractedRow {
        match_id: match_data.metadata.match_id.clone(),
        game_creation: info.game_creation,
        queue_id: info.queue_id,
        game_mode: info.game_mode.clone(),
        game_version: info.game_version.clone(),
        game_duration_secs: duration,
        game_duration_minutes: info.duration_minutes(),
        champion_name: participant.champion_name.clone(),
        team_position: participant.team_position.clone(),
        team_id: participant.team_id,
        win: participant.win,
        champ_level: participant.champ_level,
        kills: participant.kills,
        deaths: participant.deaths,
        assists: participant.assists,
        kda: participant.kda_ratio(),
        gold_earned: participant.gold_earned,
        damage_to_champions: participant.total_damage_dealt_to_champions,
        damage_per_minute: participant.damage_per_minute(duration),
        lane_minions: participant.total_minions_killed,
        neutral_minions: participant.neutral_minions_killed,
        total_minions: participant.cs_total(),
        cs_per_minute: participant.cs_per_minute(duration),
        vision_score: participant.vision_score,
        wards_placed: participant.wards_placed,
        wards_killed: participant.wards_killed,
        team_kills,
        kill_participation: participant.kill_participation(team_kills),
        first_blood: participant.took_first_blood(),
    })
}

/// One row per record in which `puuid` took part. Records that cannot be
/// decoded or do not contain the player are skipped with a warning.
pub fn extract_rows(records: &[MatchRecord], puuid: &str) -> Vec<ExtractedRow> {
    let rows: Vec<ExtractedRow> = records
        .iter()
        .filter_map(|record| {
            let match_data = match record.decode() {
                Ok(m) => m,
                Err(e) => {
                    warn!(
                        error = %e,
                        match_id = %record.match_id,
                        "🧮 ⚠️ Undecodable match, skipping"
                    );
                    return None;
                }
            };

            let row = extract_row(&match_data, puuid);
            if row.is_none() {
                warn!(
                    match_id = %record.match_id,
                    "🧮 ⚠️ Player not found in match, skipping"
                );
            }
            row
        })
        .collect();

    debug!(rows = rows.len(), records = records.len(), "🧮 Rows extracted");

    rows
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(match_id: &str, duration: i64, participants: serde_json::Value) -> MatchRecord {
        MatchRecord {
            match_id: match_id.into(),
            raw: json!({
                "metadata": { "matchId": match_id },
                "info": {
                    "gameCreation": 1_700_000_000_000_i64,
                    "gameDuration": duration,
                    "queueId": 420,
                    "gameMode": "CLASSIC",
                    "gameVersion": "14.24.632.8043",
                    "participants": participants,
                }
            }),
        }
    }

    #[test]
    fn row_carries_counters_and_derived_metrics() {
        let records = [record(
            "TR1_1",
            1800,
            json!([
                {
                    "puuid": "me", "teamId": 100, "championName": "Lux",
                    "teamPosition": "MIDDLE", "win": true, "champLevel": 16,
                    "kills": 4, "deaths": 2, "assists": 6,
                    "goldEarned": 12000, "totalDamageDealtToChampions": 27000,
                    "totalMinionsKilled": 200, "neutralMinionsKilled": 16,
                    "visionScore": 30, "wardsPlaced": 12, "wardsKilled": 3,
                    "firstBloodKill": false, "firstBloodAssist": true
                },
                { "puuid": "ally", "teamId": 100, "kills": 16 },
                { "puuid": "enemy", "teamId": 200, "kills": 8 }
            ]),
        )];

        let rows = extract_rows(&records, "me");

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.match_id, "TR1_1");
        assert_eq!(row.champion_name, "Lux");
        assert_eq!(row.game_duration_minutes, 30.0);
        assert_eq!(row.kda, 5.0);
        assert_eq!(row.total_minions, 216);
        assert_eq!(row.cs_per_minute, 7.2);
        assert_eq!(row.damage_per_minute, 900.0);
        assert_eq!(row.team_kills, 20);
        assert_eq!(row.kill_participation, 0.5);
        assert!(row.first_blood);
        assert!(row.win);
    }

    #[test]
    fn zero_deaths_uses_raw_takedowns() {
        let records = [record(
            "TR1_2",
            1200,
            json!([{ "puuid": "me", "teamId": 100, "kills": 5, "deaths": 0, "assists": 3 }]),
        )];

        let rows = extract_rows(&records, "me");

        assert_eq!(rows[0].kda, 8.0);
    }

    #[test]
    fn zero_duration_and_zero_team_kills_do_not_divide() {
        let records = [record(
            "TR1_3",
            0,
            json!([{
                "puuid": "me", "teamId": 100,
                "totalMinionsKilled": 10, "totalDamageDealtToChampions": 500
            }]),
        )];

        let row = &extract_rows(&records, "me")[0];

        assert_eq!(row.cs_per_minute, 0.0);
        assert_eq!(row.damage_per_minute, 0.0);
        assert_eq!(row.team_kills, 0);
        assert_eq!(row.kill_participation, 0.0);
        assert!(!row.first_blood);
    }

    #[test]
    fn matches_without_the_player_are_dropped() {
        let records = [
            record("TR1_4", 900, json!([{ "puuid": "someone-else" }])),
            record("TR1_5", 900, json!([{ "puuid": "me" }])),
            MatchRecord {
                match_id: "TR1_6".into(),
                raw: json!({ "info": { "participants": "not-a-list" } }),
            },
        ];

        let rows = extract_rows(&records, "me");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].match_id, "TR1_5");
    }
}

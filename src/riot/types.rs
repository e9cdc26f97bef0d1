use serde::Deserialize;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

// ============================================================================
// Summoner-v4
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummonerDto {
    pub puuid: String,
    pub profile_icon_id: i32,
    pub summoner_level: i64,
    pub revision_date: i64,
}

// ============================================================================
// Match-v5
// ============================================================================

/// A match exactly as the API returned it, kept for the raw archive.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub match_id: String,
    pub raw: serde_json::Value,
}

impl MatchRecord {
    /// Typed view over the fields the extractor reads.
    pub fn decode(&self) -> Result<MatchDto, serde_json::Error> {
        MatchDto::deserialize(&self.raw)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

impl MatchDto {
    pub fn participant_info_of(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }

    /// Sum of kills of every participant on `team_id`.
    pub fn team_kills(&self, team_id: i32) -> i32 {
        self.info
            .participants
            .iter()
            .filter(|p| p.team_id == team_id)
            .map(|p| p.kills)
            .sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataDto {
    pub match_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoDto {
    pub game_creation: i64,
    pub game_duration: i64,
    pub queue_id: i32,
    pub game_mode: String,
    pub game_version: String,
    pub participants: Vec<ParticipantDto>,
}

impl InfoDto {
    pub fn duration_minutes(&self) -> f64 {
        self.game_duration as f64 / 60.0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantDto {
    pub puuid: String,
    pub team_id: i32,
    pub champion_name: String,
    pub team_position: String,
    pub win: bool,
    pub champ_level: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub gold_earned: i64,
    pub total_damage_dealt_to_champions: i64,
    pub total_minions_killed: i32,
    pub neutral_minions_killed: i32,
    pub vision_score: i32,
    pub wards_placed: i32,
    pub wards_killed: i32,
    pub first_blood_kill: bool,
    pub first_blood_assist: bool,
}

impl ParticipantDto {
    pub fn kda_ratio(&self) -> f64 {
        if self.deaths == 0 {
            (self.kills + self.assists) as f64
        } else {
            (self.kills + self.assists) as f64 / self.deaths as f64
        }
    }

    pub fn cs_total(&self) -> i32 {
        self.total_minions_killed + self.neutral_minions_killed
    }

    pub fn cs_per_minute(&self, game_duration_secs: i64) -> f64 {
        per_minute(self.cs_total() as f64, game_duration_secs)
    }

    pub fn damage_per_minute(&self, game_duration_secs: i64) -> f64 {
        per_minute(
            self.total_damage_dealt_to_champions as f64,
            game_duration_secs,
        )
    }

    pub fn kill_participation(&self, team_kills: i32) -> f64 {
        if team_kills == 0 {
            0.0
        } else {
            (self.kills + self.assists) as f64 / team_kills as f64
        }
    }

    pub fn took_first_blood(&self) -> bool {
        self.first_blood_kill || self.first_blood_assist
    }
}

fn per_minute(value: f64, game_duration_secs: i64) -> f64 {
    if game_duration_secs <= 0 {
        0.0
    } else {
        value / (game_duration_secs as f64 / 60.0)
    }
}

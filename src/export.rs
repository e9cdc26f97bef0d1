//! Output files: verbatim JSON archive and the per-match spreadsheet.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::{error, info, instrument, warn};

use crate::config::RiotId;
use crate::error::AppError;
use crate::extract::ExtractedRow;
use crate::riot::MatchRecord;

const SUMMARY_SHEET: &str = "Matches";

const COLUMNS: [&str; 29] = [
    "Match ID",
    "Created (ms)",
    "Queue",
    "Mode",
    "Version",
    "Duration (s)",
    "Duration (min)",
    "Champion",
    "Position",
    "Team",
    "Win",
    "Level",
    "Kills",
    "Deaths",
    "Assists",
    "KDA",
    "Gold",
    "Damage",
    "Damage/min",
    "Lane Minions",
    "Neutral Minions",
    "Total Minions",
    "CS/min",
    "Vision Score",
    "Wards Placed",
    "Wards Killed",
    "Team Kills",
    "Kill Participation",
    "First Blood",
];

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
}

impl ExtractedRow {
    fn cells(&self) -> [Cell<'_>; 29] {
        [
            Cell::Text(&self.match_id),
            Cell::Number(self.game_creation as f64),
            Cell::Number(self.queue_id as f64),
            Cell::Text(&self.game_mode),
            Cell::Text(&self.game_version),
            Cell::Number(self.game_duration_secs as f64),
            Cell::Number(self.game_duration_minutes),
            Cell::Text(&self.champion_name),
            Cell::Text(&self.team_position),
            Cell::Number(self.team_id as f64),
            Cell::Bool(self.win),
            Cell::Number(self.champ_level as f64),
            Cell::Number(self.kills as f64),
            Cell::Number(self.deaths as f64),
            Cell::Number(self.assists as f64),
            Cell::Number(self.kda),
            Cell::Number(self.gold_earned as f64),
            Cell::Number(self.damage_to_champions as f64),
            Cell::Number(self.damage_per_minute),
            Cell::Number(self.lane_minions as f64),
            Cell::Number(self.neutral_minions as f64),
            Cell::Number(self.total_minions as f64),
            Cell::Number(self.cs_per_minute),
            Cell::Number(self.vision_score as f64),
            Cell::Number(self.wards_placed as f64),
            Cell::Number(self.wards_killed as f64),
            Cell::Number(self.team_kills as f64),
            Cell::Number(self.kill_participation),
            Cell::Bool(self.first_blood),
        ]
    }
}

/// `{name}_{tag}_{YYYYmmdd_HHMMSS}`, safe to use as a file name.
pub fn output_stem<Tz: TimeZone>(riot_id: &RiotId, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}_{}",
        sanitize(&riot_id.game_name),
        sanitize(&riot_id.tag_line),
        at.format("%Y%m%d_%H%M%S")
    )
}

fn sanitize(part: &str) -> String {
    part.chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Most recent match first.
pub fn sort_rows(rows: &mut [ExtractedRow]) {
    rows.sort_by(|a, b| b.game_creation.cmp(&a.game_creation));
}

pub fn write_raw_archive(path: &Path, records: &[MatchRecord]) -> Result<(), AppError> {
    let matches: Vec<&serde_json::Value> = records.iter().map(|r| &r.raw).collect();

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &matches)?;
    writer.flush()?;

    Ok(())
}

/// Rows are written in the given order; see [`sort_rows`].
pub fn write_summary(path: &Path, rows: &[ExtractedRow]) -> Result<(), AppError> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SUMMARY_SHEET)?;
        write_header(sheet)?;
        for (i, row) in rows.iter().enumerate() {
            write_row(sheet, i as u32 + 1, row)?;
        }
    }

    workbook.save(path)?;

    Ok(())
}

fn write_header(sheet: &mut Worksheet) -> Result<(), AppError> {
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    Ok(())
}

fn write_row(sheet: &mut Worksheet, row_idx: u32, row: &ExtractedRow) -> Result<(), AppError> {
    for (col, cell) in row.cells().into_iter().enumerate() {
        let col = col as u16;
        match cell {
            Cell::Text(v) => sheet.write_string(row_idx, col, v)?,
            Cell::Number(v) => sheet.write_number(row_idx, col, v)?,
            Cell::Bool(v) => sheet.write_boolean(row_idx, col, v)?,
        };
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub archive: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    /// Set when the archive was written but the summary was not.
    pub summary_error: Option<AppError>,
    pub archived_matches: usize,
    pub summary_rows: usize,
}

/// Writes `matches_{stem}.json` then `summary_{stem}.xlsx` into `dir`.
///
/// The archive is written first and stays on disk whatever happens to the
/// summary; a summary failure is reported in [`ExportReport::summary_error`].
/// Nothing is written when `records` is empty.
#[instrument(skip(records, rows), fields(matches = records.len(), rows = rows.len()))]
pub fn export(
    dir: &Path,
    stem: &str,
    records: &[MatchRecord],
    mut rows: Vec<ExtractedRow>,
) -> Result<ExportReport, AppError> {
    if records.is_empty() {
        warn!("💾 No match data collected, nothing to write");
        return Ok(ExportReport::default());
    }

    fs::create_dir_all(dir)?;

    let archive_path = dir.join(format!("matches_{stem}.json"));
    write_raw_archive(&archive_path, records)?;
    info!(path = %archive_path.display(), "💾 Raw archive written");

    let mut report = ExportReport {
        archive: Some(archive_path),
        archived_matches: records.len(),
        ..Default::default()
    };

    sort_rows(&mut rows);
    let summary_path = dir.join(format!("summary_{stem}.xlsx"));
    match write_summary(&summary_path, &rows) {
        Ok(()) => {
            info!(path = %summary_path.display(), rows = rows.len(), "💾 Summary written");
            report.summary = Some(summary_path);
            report.summary_rows = rows.len();
        }
        Err(e) => {
            error!(error = %e, "💾 ❌ Summary export failed, raw archive kept");
            report.summary_error = Some(e);
        }
    }

    Ok(report)
}

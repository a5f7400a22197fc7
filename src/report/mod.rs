pub mod json;
pub mod md;

use crate::engine::leaderboard::Leaderboard;
use crate::engine::{GroupMatches, HandicapRow, StrokeTable};
use crate::error::{Result, ScoringError};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Which snapshot and settings a report was computed from.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub event: &'a str,
    pub snapshot_sha256: &'a str,
    pub net_max_over_par: i32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportBody<'a> {
    Handicaps(&'a [HandicapRow]),
    Strokes(&'a [StrokeTable]),
    Leaderboard(&'a Leaderboard),
    Matches(&'a [GroupMatches]),
}

pub fn render(context: &ReportContext, body: ReportBody, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(context, body).map_err(ScoringError::Json),
        OutputFormat::Md => Ok(md::to_markdown(context, body)),
    }
}

/// Score relative to par the way a scoreboard shows it: `E`, `+3`, `-2`.
pub fn to_par(differential: i32) -> String {
    match differential {
        0 => "E".to_string(),
        d if d > 0 => format!("+{d}"),
        d => d.to_string(),
    }
}

use crate::engine::net::net_score;
use crate::engine::points::{lower_wins, Points};
use crate::engine::strokes::strokes_on_hole;
use crate::error::{Result, ScoringError};
use crate::types::course::{Course, Hole};
use crate::types::event::MatchFormat;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One player's side of a match: playing handicap plus posted gross scores.
#[derive(Debug, Clone)]
pub struct MatchPlayer {
    pub id: String,
    pub name: String,
    pub playing_handicap: i32,
    pub card: BTreeMap<u8, i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Running match score after a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lead {
    AllSquare,
    Up { side: Side, by: Points },
}

impl Lead {
    fn between(a: Points, b: Points) -> Self {
        match a.cmp(&b) {
            std::cmp::Ordering::Equal => Self::AllSquare,
            std::cmp::Ordering::Greater => Self::Up {
                side: Side::A,
                by: Points::from_halves(a.halves() - b.halves()),
            },
            std::cmp::Ordering::Less => Self::Up {
                side: Side::B,
                by: Points::from_halves(b.halves() - a.halves()),
            },
        }
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllSquare => f.write_str("AS"),
            Self::Up { side, by } => write!(f, "{side} {by} UP"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HoleResult {
    pub hole: u8,
    pub par: i32,
    pub side_a_net: Vec<i32>,
    pub side_b_net: Vec<i32>,
    pub side_a_points: Points,
    pub side_b_points: Points,
    pub detail: String,
    /// Absent for stroke play, which has no hole-by-hole match score.
    pub lead: Option<Lead>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    A,
    B,
    Halved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchPoints {
    pub side_a: Points,
    pub side_b: Points,
    pub winner: Winner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrokeTotals {
    pub side_a: i32,
    pub side_b: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub format: MatchFormat,
    pub label_a: String,
    pub label_b: String,
    pub side_a: Vec<String>,
    pub side_b: Vec<String>,
    pub holes: Vec<HoleResult>,
    pub side_a_points: Points,
    pub side_b_points: Points,
    /// Net totals over scored holes, stroke play only.
    pub stroke_totals: Option<StrokeTotals>,
    pub status: MatchStatus,
    /// The 1 / 0 / half split, only once every hole is in.
    pub final_points: Option<MatchPoints>,
}

impl MatchResult {
    pub fn holes_played(&self) -> usize {
        self.holes.len()
    }

    /// Current running score, `None` for stroke play or before the first hole.
    pub fn current_lead(&self) -> Option<Lead> {
        self.holes.last().and_then(|hole| hole.lead)
    }
}

struct HoleScore {
    side_a: Points,
    side_b: Points,
    detail: String,
}

/// Resolve a match between two sides on a course.
///
/// A hole counts only once every player has posted a score on it, so a
/// partially entered round yields an in-progress result.
pub fn resolve_match(
    format: MatchFormat,
    side_a: &[MatchPlayer],
    side_b: &[MatchPlayer],
    course: &Course,
    max_over_par: i32,
) -> Result<MatchResult> {
    let expected = format.players_per_side();
    if side_a.len() != expected || side_b.len() != expected {
        return Err(ScoringError::FormatArity {
            format: format.to_string(),
            expected,
            side_a: side_a.len(),
            side_b: side_b.len(),
        });
    }

    let course_holes = course.holes_in_order();
    let mut holes = Vec::new();
    let mut side_a_points = Points::ZERO;
    let mut side_b_points = Points::ZERO;
    let mut stroke_a = 0;
    let mut stroke_b = 0;

    for hole in &course_holes {
        let (Some(a_nets), Some(b_nets)) = (
            side_nets(side_a, hole, max_over_par)?,
            side_nets(side_b, hole, max_over_par)?,
        ) else {
            continue;
        };

        let score = score_hole(format, &a_nets, &b_nets);
        side_a_points += score.side_a;
        side_b_points += score.side_b;
        stroke_a += a_nets[0];
        stroke_b += b_nets[0];

        holes.push(HoleResult {
            hole: hole.number,
            par: hole.par,
            side_a_net: a_nets,
            side_b_net: b_nets,
            side_a_points: score.side_a,
            side_b_points: score.side_b,
            detail: score.detail,
            lead: format
                .is_hole_by_hole()
                .then(|| Lead::between(side_a_points, side_b_points)),
        });
    }

    let status = match holes.len() {
        0 => MatchStatus::NotStarted,
        n if n == course_holes.len() => MatchStatus::Complete,
        _ => MatchStatus::InProgress,
    };

    let stroke_totals = (format == MatchFormat::SinglesStroke).then_some(StrokeTotals {
        side_a: stroke_a,
        side_b: stroke_b,
    });
    if let (Some(totals), MatchStatus::Complete) = (stroke_totals, status) {
        (side_a_points, side_b_points) = lower_wins(totals.side_a, totals.side_b);
    }

    let final_points =
        (status == MatchStatus::Complete).then(|| finalize(side_a_points, side_b_points));

    tracing::debug!(
        match_format = %format,
        holes = holes.len(),
        side_a = %side_a_points,
        side_b = %side_b_points,
        "match resolved"
    );

    Ok(MatchResult {
        format,
        label_a: side_label(side_a),
        label_b: side_label(side_b),
        side_a: side_a.iter().map(|player| player.name.clone()).collect(),
        side_b: side_b.iter().map(|player| player.name.clone()).collect(),
        holes,
        side_a_points,
        side_b_points,
        stroke_totals,
        status,
        final_points,
    })
}

/// More points wins the match point; equal points split it.
pub fn finalize(side_a: Points, side_b: Points) -> MatchPoints {
    let (a, b) = match side_a.cmp(&side_b) {
        std::cmp::Ordering::Greater => (Points::ONE, Points::ZERO),
        std::cmp::Ordering::Less => (Points::ZERO, Points::ONE),
        std::cmp::Ordering::Equal => (Points::HALF, Points::HALF),
    };
    MatchPoints {
        side_a: a,
        side_b: b,
        winner: verdict(a, b),
    }
}

fn side_nets(players: &[MatchPlayer], hole: &Hole, max_over_par: i32) -> Result<Option<Vec<i32>>> {
    let mut nets = Vec::with_capacity(players.len());
    for player in players {
        let Some(&gross) = player.card.get(&hole.number) else {
            return Ok(None);
        };
        let strokes = strokes_on_hole(player.playing_handicap, hole.handicap_rank);
        nets.push(net_score(gross, strokes, hole.par, max_over_par).map_err(|_| {
            ScoringError::InvalidScore(format!(
                "{} hole {}: gross {gross} must be at least 1",
                player.name, hole.number
            ))
        })?);
    }
    Ok(Some(nets))
}

fn score_hole(format: MatchFormat, a: &[i32], b: &[i32]) -> HoleScore {
    match format {
        MatchFormat::BestBall => best_ball(a, b, false),
        MatchFormat::BestBallValidation => best_ball(a, b, true),
        MatchFormat::LowTotal => low_total(a, b),
        MatchFormat::SinglesMatch => {
            let (side_a, side_b) = lower_wins(a[0], b[0]);
            HoleScore {
                side_a,
                side_b,
                detail: format!("{} vs {}, {}", a[0], b[0], verdict_text(side_a, side_b)),
            }
        }
        MatchFormat::SinglesStroke => HoleScore {
            side_a: Points::ZERO,
            side_b: Points::ZERO,
            detail: format!("stroke play {} vs {}", a[0], b[0]),
        },
    }
}

fn best_ball(a: &[i32], b: &[i32], validate: bool) -> HoleScore {
    let (best_a, best_b) = (low(a), low(b));
    if best_a != best_b || !validate {
        let (side_a, side_b) = lower_wins(best_a, best_b);
        return HoleScore {
            side_a,
            side_b,
            detail: format!(
                "best ball {best_a} vs {best_b}, {}",
                verdict_text(side_a, side_b)
            ),
        };
    }

    // Tied best balls go to the better second ball.
    let (second_a, second_b) = (high(a), high(b));
    let (side_a, side_b) = lower_wins(second_a, second_b);
    HoleScore {
        side_a,
        side_b,
        detail: format!(
            "best ball {best_a} vs {best_b}, validation {second_a} vs {second_b}, {}",
            verdict_text(side_a, side_b)
        ),
    }
}

fn low_total(a: &[i32], b: &[i32]) -> HoleScore {
    let (low_a, low_b) = (low(a), low(b));
    let (total_a, total_b): (i32, i32) = (a.iter().sum(), b.iter().sum());
    let (low_pts_a, low_pts_b) = lower_wins(low_a, low_b);
    let (total_pts_a, total_pts_b) = lower_wins(total_a, total_b);
    HoleScore {
        side_a: low_pts_a + total_pts_a,
        side_b: low_pts_b + total_pts_b,
        detail: format!(
            "low {low_a} vs {low_b} {}; total {total_a} vs {total_b} {}",
            verdict_text(low_pts_a, low_pts_b),
            verdict_text(total_pts_a, total_pts_b)
        ),
    }
}

fn low(nets: &[i32]) -> i32 {
    nets.iter().copied().min().unwrap_or_default()
}

fn high(nets: &[i32]) -> i32 {
    nets.iter().copied().max().unwrap_or_default()
}

fn verdict(a: Points, b: Points) -> Winner {
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => Winner::A,
        std::cmp::Ordering::Less => Winner::B,
        std::cmp::Ordering::Equal => Winner::Halved,
    }
}

fn verdict_text(a: Points, b: Points) -> &'static str {
    match verdict(a, b) {
        Winner::A => "A wins",
        Winner::B => "B wins",
        Winner::Halved => "halved",
    }
}

fn side_label(players: &[MatchPlayer]) -> String {
    players
        .iter()
        .map(|player| player.name.as_str())
        .collect::<Vec<_>>()
        .join(" & ")
}

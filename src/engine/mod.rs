pub mod handicap;
pub mod leaderboard;
pub mod matches;
pub mod net;
pub mod points;
pub mod strokes;

use crate::error::{Result, ScoringError};
use crate::types::config::{PlayingHandicapBasis, Settings};
use crate::types::course::{Course, Hole, HOLES_PER_ROUND};
use crate::types::event::{Event, Group, MatchSpec};
use handicap::{course_handicap, playing_handicaps};
use matches::{resolve_match, MatchPlayer, MatchResult};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct CourseHandicapEntry {
    pub course_id: String,
    pub course: String,
    pub day: u8,
    pub tee: String,
    pub rating: f64,
    pub slope: u16,
    pub course_handicap: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HandicapRow {
    pub player_id: String,
    pub name: String,
    pub handicap_index: f64,
    pub courses: Vec<CourseHandicapEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrokeRow {
    pub player_id: String,
    pub name: String,
    pub course_handicap: i32,
    /// Strokes per hole, in hole-number order.
    pub strokes: Vec<i32>,
    pub total: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrokeTable {
    pub course_id: String,
    pub course: String,
    pub day: u8,
    pub holes: Vec<Hole>,
    pub rows: Vec<StrokeRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchHandicap {
    pub player_id: String,
    pub name: String,
    pub playing_handicap: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupMatch {
    /// Side A players then side B players, in match order.
    pub playing_handicaps: Vec<MatchHandicap>,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl GroupMatch {
    pub fn playing_handicap(&self, player_id: &str) -> Option<i32> {
        self.playing_handicaps
            .iter()
            .find(|entry| entry.player_id == player_id)
            .map(|entry| entry.playing_handicap)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupMatches {
    pub group_id: String,
    pub group: String,
    pub course: String,
    pub day: u8,
    pub matches: Vec<GroupMatch>,
}

pub fn course_handicap_for(event: &Event, player_id: &str, course: &Course) -> Result<i32> {
    let player = event.player(player_id)?;
    let tee = event.tee(player_id, &course.id)?;
    Ok(course_handicap(
        player.handicap_index,
        tee.slope,
        tee.rating,
        course.par(),
    ))
}

/// Course handicap of every player on every course they hold a tee for.
pub fn course_handicap_table(event: &Event) -> Vec<HandicapRow> {
    let courses = event.courses_by_day();
    event
        .players
        .iter()
        .map(|player| HandicapRow {
            player_id: player.id.clone(),
            name: player.name.clone(),
            handicap_index: player.handicap_index,
            courses: courses
                .iter()
                .filter_map(|course| {
                    let tee = event.tee(&player.id, &course.id).ok()?;
                    Some(CourseHandicapEntry {
                        course_id: course.id.clone(),
                        course: course.name.clone(),
                        day: course.day,
                        tee: tee.tee.clone(),
                        rating: tee.rating,
                        slope: tee.slope,
                        course_handicap: course_handicap(
                            player.handicap_index,
                            tee.slope,
                            tee.rating,
                            course.par(),
                        ),
                    })
                })
                .collect(),
        })
        .collect()
}

/// Course-handicap stroke allocation for the field, one table per course.
pub fn stroke_tables(event: &Event, day: Option<u8>) -> Result<Vec<StrokeTable>> {
    let courses: Vec<&Course> = match day {
        Some(day) => vec![event.course_for_day(day)?],
        None => event.courses_by_day(),
    };

    courses
        .into_iter()
        .map(|course| {
            let rows = event
                .players
                .iter()
                .filter(|player| event.tee(&player.id, &course.id).is_ok())
                .map(|player| {
                    let ch = course_handicap_for(event, &player.id, course)?;
                    let strokes: Vec<i32> = strokes::allocate(ch, course)
                        .into_iter()
                        .map(|(_, strokes)| strokes)
                        .collect();
                    Ok(StrokeRow {
                        player_id: player.id.clone(),
                        name: player.name.clone(),
                        course_handicap: ch,
                        total: strokes.iter().sum(),
                        strokes,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(StrokeTable {
                course_id: course.id.clone(),
                course: course.name.clone(),
                day: course.day,
                holes: course.holes_in_order(),
                rows,
            })
        })
        .collect()
}

/// Resolve every match of every group, optionally limited to one day.
pub fn resolve_group_matches(
    event: &Event,
    settings: &Settings,
    day: Option<u8>,
) -> Result<Vec<GroupMatches>> {
    let mut resolved = Vec::new();
    for group in &event.groups {
        let course = event.course(&group.course)?;
        if day.is_some_and(|day| day != course.day) {
            continue;
        }

        let course_handicaps = group
            .players
            .iter()
            .map(|player| Ok((player.clone(), course_handicap_for(event, player, course)?)))
            .collect::<Result<BTreeMap<String, i32>>>()?;

        let mut matches = Vec::new();
        for spec in match_specs(group) {
            matches.push(resolve_spec(
                event,
                group,
                &spec,
                course,
                &course_handicaps,
                settings,
            )?);
        }

        resolved.push(GroupMatches {
            group_id: group.id.clone(),
            group: group.name.clone(),
            course: course.name.clone(),
            day: course.day,
            matches,
        });
    }
    Ok(resolved)
}

/// The group's configured matches, or when none are configured and the
/// group has exactly enough players, the first half against the second.
fn match_specs(group: &Group) -> Vec<MatchSpec> {
    if !group.matches.is_empty() {
        return group.matches.clone();
    }
    let per_side = group.format.players_per_side();
    if group.players.len() != per_side * 2 {
        tracing::warn!(
            group = %group.id,
            players = group.players.len(),
            "no matches configured and group size does not fit its format"
        );
        return Vec::new();
    }
    let (side_a, side_b) = group.players.split_at(per_side);
    vec![MatchSpec {
        format: None,
        side_a: side_a.to_vec(),
        side_b: side_b.to_vec(),
        label_a: None,
        label_b: None,
    }]
}

fn resolve_spec(
    event: &Event,
    group: &Group,
    spec: &MatchSpec,
    course: &Course,
    course_handicaps: &BTreeMap<String, i32>,
    settings: &Settings,
) -> Result<GroupMatch> {
    let format = spec.format.unwrap_or(group.format);
    let basis: Vec<&String> = match settings.playing_handicap_basis {
        PlayingHandicapBasis::Match => spec.side_a.iter().chain(&spec.side_b).collect(),
        PlayingHandicapBasis::Group => group.players.iter().collect(),
    };
    let phs = playing_handicaps(basis.into_iter().filter_map(|player| {
        course_handicaps
            .get(player)
            .map(|&ch| (player.as_str(), ch))
    }));

    let side = |players: &[String]| -> Result<Vec<MatchPlayer>> {
        players
            .iter()
            .map(|id| {
                let player = event.player(id)?;
                let playing_handicap = *phs.get(id).ok_or_else(|| {
                    ScoringError::NotFound(format!("playing handicap for {id}"))
                })?;
                Ok(MatchPlayer {
                    id: id.clone(),
                    name: player.name.clone(),
                    playing_handicap,
                    card: event.card(id, &course.id),
                })
            })
            .collect()
    };
    let side_a = side(&spec.side_a)?;
    let side_b = side(&spec.side_b)?;

    let mut result = resolve_match(format, &side_a, &side_b, course, settings.net_max_over_par)?;
    if let Some(label) = &spec.label_a {
        result.label_a = label.clone();
    }
    if let Some(label) = &spec.label_b {
        result.label_b = label.clone();
    }

    Ok(GroupMatch {
        playing_handicaps: side_a
            .iter()
            .chain(&side_b)
            .map(|player| MatchHandicap {
                player_id: player.id.clone(),
                name: player.name.clone(),
                playing_handicap: player.playing_handicap,
            })
            .collect(),
        result,
    })
}

/// Gaps that do not make the event invalid but leave results incomplete.
pub fn completeness_warnings(event: &Event) -> Vec<String> {
    let mut warnings = Vec::new();
    for course in event.courses_by_day() {
        for player in &event.players {
            if event.tee(&player.id, &course.id).is_err() {
                warnings.push(format!(
                    "{} has no tee assignment on {}",
                    player.name, course.name
                ));
            }
        }
    }
    for group in &event.groups {
        let Ok(course) = event.course(&group.course) else {
            continue;
        };
        for player_id in &group.players {
            let played = event.card(player_id, &course.id).len();
            if played < HOLES_PER_ROUND {
                let name = event
                    .player(player_id)
                    .map(|player| player.name.as_str())
                    .unwrap_or(player_id.as_str());
                warnings.push(format!(
                    "{name} has {played} of {HOLES_PER_ROUND} holes on {}",
                    course.name
                ));
            }
        }
    }
    warnings
}

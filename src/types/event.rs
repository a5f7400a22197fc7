use crate::error::{Result, ScoringError};
use crate::types::course::Course;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub handicap_index: f64,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeeAssignment {
    pub player: String,
    pub course: String,
    pub tee: String,
    pub rating: f64,
    pub slope: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub player: String,
    pub course: String,
    pub hole: u8,
    pub gross: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    BestBall,
    BestBallValidation,
    LowTotal,
    SinglesMatch,
    SinglesStroke,
}

impl MatchFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestBall => "best_ball",
            Self::BestBallValidation => "best_ball_validation",
            Self::LowTotal => "low_total",
            Self::SinglesMatch => "singles_match",
            Self::SinglesStroke => "singles_stroke",
        }
    }

    pub fn players_per_side(self) -> usize {
        match self {
            Self::BestBall | Self::BestBallValidation | Self::LowTotal => 2,
            Self::SinglesMatch | Self::SinglesStroke => 1,
        }
    }

    /// Whether the format produces a running hole-by-hole match score.
    pub fn is_hole_by_hole(self) -> bool {
        !matches!(self, Self::SinglesStroke)
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSpec {
    /// Falls back to the group's format when absent.
    #[serde(default)]
    pub format: Option<MatchFormat>,
    pub side_a: Vec<String>,
    pub side_b: Vec<String>,
    #[serde(default)]
    pub label_a: Option<String>,
    #[serde(default)]
    pub label_b: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub course: String,
    pub format: MatchFormat,
    pub players: Vec<String>,
    #[serde(default)]
    pub matches: Vec<MatchSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventSettings {
    #[serde(default)]
    pub net_max_over_par: Option<i32>,
}

/// One consistent snapshot of everything the engine reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub settings: EventSettings,
    pub players: Vec<Player>,
    pub courses: Vec<Course>,
    #[serde(default)]
    pub tees: Vec<TeeAssignment>,
    #[serde(default)]
    pub scores: Vec<Score>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Event {
    pub fn player(&self, id: &str) -> Result<&Player> {
        self.players
            .iter()
            .find(|player| player.id == id)
            .ok_or_else(|| ScoringError::NotFound(format!("player {id}")))
    }

    pub fn course(&self, id: &str) -> Result<&Course> {
        self.courses
            .iter()
            .find(|course| course.id == id)
            .ok_or_else(|| ScoringError::NotFound(format!("course {id}")))
    }

    pub fn course_for_day(&self, day: u8) -> Result<&Course> {
        self.courses
            .iter()
            .find(|course| course.day == day)
            .ok_or_else(|| ScoringError::NotFound(format!("course for day {day}")))
    }

    /// Courses in play order.
    pub fn courses_by_day(&self) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.courses.iter().collect();
        courses.sort_by_key(|course| course.day);
        courses
    }

    pub fn tee(&self, player: &str, course: &str) -> Result<&TeeAssignment> {
        self.tees
            .iter()
            .find(|tee| tee.player == player && tee.course == course)
            .ok_or_else(|| {
                ScoringError::NotFound(format!("tee assignment for {player} on {course}"))
            })
    }

    /// Gross strokes keyed by hole number for one player's round.
    pub fn card(&self, player: &str, course: &str) -> BTreeMap<u8, i32> {
        self.scores
            .iter()
            .filter(|score| score.player == player && score.course == course)
            .map(|score| (score.hole, score.gross))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        ensure_unique("player", self.players.iter().map(|p| p.id.as_str()))?;
        ensure_unique("course", self.courses.iter().map(|c| c.id.as_str()))?;
        ensure_unique("group", self.groups.iter().map(|g| g.id.as_str()))?;

        if let Some(cap) = self.settings.net_max_over_par {
            if cap < 0 {
                return Err(ScoringError::DataIntegrity(format!(
                    "settings.net_max_over_par must be 0 or greater (found {cap})"
                )));
            }
        }

        let mut days = HashSet::new();
        for course in &self.courses {
            course.validate()?;
            if !days.insert(course.day) {
                return Err(ScoringError::DataIntegrity(format!(
                    "more than one course scheduled on day {}",
                    course.day
                )));
            }
        }

        for tee in &self.tees {
            self.reference(&tee.player, &tee.course, "tee assignment")?;
            if tee.slope == 0 {
                return Err(ScoringError::DataIntegrity(format!(
                    "tee assignment for {} on {} has slope 0",
                    tee.player, tee.course
                )));
            }
        }

        let mut scored = HashSet::new();
        for score in &self.scores {
            let course = self.reference(&score.player, &score.course, "score")?;
            if course.hole(score.hole).is_none() {
                return Err(ScoringError::DataIntegrity(format!(
                    "score for {} references hole {} not on course {}",
                    score.player, score.hole, score.course
                )));
            }
            if self.tee(&score.player, &score.course).is_err() {
                return Err(ScoringError::DataIntegrity(format!(
                    "{} has scores on {} but no tee assignment",
                    score.player, score.course
                )));
            }
            if score.gross < 1 {
                return Err(ScoringError::InvalidScore(format!(
                    "{} on {} hole {}: gross {} must be at least 1",
                    score.player, score.course, score.hole, score.gross
                )));
            }
            if !scored.insert((score.player.as_str(), score.course.as_str(), score.hole)) {
                return Err(ScoringError::DataIntegrity(format!(
                    "{} has more than one score on {} hole {}",
                    score.player, score.course, score.hole
                )));
            }
        }

        for group in &self.groups {
            self.course(&group.course).map_err(|_| {
                ScoringError::DataIntegrity(format!(
                    "group {} references unknown course {}",
                    group.id, group.course
                ))
            })?;
            for player in &group.players {
                self.player(player).map_err(|_| {
                    ScoringError::DataIntegrity(format!(
                        "group {} references unknown player {player}",
                        group.id
                    ))
                })?;
            }
            ensure_unique(
                &format!("player in group {}", group.id),
                group.players.iter().map(String::as_str),
            )?;
            for spec in &group.matches {
                let mut sides = HashSet::new();
                for player in spec.side_a.iter().chain(&spec.side_b) {
                    if !group.players.contains(player) {
                        return Err(ScoringError::DataIntegrity(format!(
                            "match player {player} is not in group {}",
                            group.id
                        )));
                    }
                    if !sides.insert(player.as_str()) {
                        return Err(ScoringError::DataIntegrity(format!(
                            "match player {player} appears more than once in a match of group {}",
                            group.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn reference(&self, player: &str, course: &str, what: &str) -> Result<&Course> {
        self.player(player).map_err(|_| {
            ScoringError::DataIntegrity(format!("{what} references unknown player {player}"))
        })?;
        self.course(course).map_err(|_| {
            ScoringError::DataIntegrity(format!("{what} references unknown course {course}"))
        })
    }
}

fn ensure_unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ScoringError::DataIntegrity(format!(
                "duplicate {what} id {id}"
            )));
        }
    }
    Ok(())
}

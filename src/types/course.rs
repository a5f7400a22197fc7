use crate::error::{Result, ScoringError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const HOLES_PER_ROUND: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pub number: u8,
    pub par: i32,
    /// Difficulty order within the course, 1 = hardest.
    pub handicap_rank: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    /// Event day this course is played on.
    pub day: u8,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub holes: Vec<Hole>,
}

impl Course {
    pub fn par(&self) -> i32 {
        self.holes.iter().map(|hole| hole.par).sum()
    }

    pub fn hole(&self, number: u8) -> Option<&Hole> {
        self.holes.iter().find(|hole| hole.number == number)
    }

    /// Holes ordered by hole number, independent of input order.
    pub fn holes_in_order(&self) -> Vec<Hole> {
        let mut holes = self.holes.clone();
        holes.sort_by_key(|hole| hole.number);
        holes
    }

    pub fn validate(&self) -> Result<()> {
        if self.holes.len() != HOLES_PER_ROUND {
            return Err(ScoringError::DataIntegrity(format!(
                "course {} has {} holes, expected {}",
                self.id,
                self.holes.len(),
                HOLES_PER_ROUND
            )));
        }

        let mut numbers = [false; HOLES_PER_ROUND];
        let mut ranks = [false; HOLES_PER_ROUND];
        for hole in &self.holes {
            mark_once(&mut numbers, hole.number, "hole number", &self.id)?;
            mark_once(&mut ranks, hole.handicap_rank, "handicap rank", &self.id)?;
            if !(3..=5).contains(&hole.par) {
                return Err(ScoringError::DataIntegrity(format!(
                    "course {} hole {} has par {}, expected 3, 4 or 5",
                    self.id, hole.number, hole.par
                )));
            }
        }
        Ok(())
    }
}

fn mark_once(seen: &mut [bool; HOLES_PER_ROUND], value: u8, what: &str, course: &str) -> Result<()> {
    let index = usize::from(value);
    if !(1..=HOLES_PER_ROUND).contains(&index) {
        return Err(ScoringError::DataIntegrity(format!(
            "course {course} has {what} {value} outside 1..18"
        )));
    }
    if seen[index - 1] {
        return Err(ScoringError::DataIntegrity(format!(
            "course {course} has duplicate {what} {value}"
        )));
    }
    seen[index - 1] = true;
    Ok(())
}

use crate::error::{Result, ScoringError};
use crate::types::event::Event;
use sha2::{Digest, Sha256};
use std::path::Path;

/// A validated event plus the digest of the bytes it was read from.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub event: Event,
    pub sha256: String,
}

pub fn load_event(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Err(ScoringError::NotFound(format!(
            "event file {}",
            path.display()
        )));
    }
    let bytes = std::fs::read(path)?;
    let snapshot = parse_event(&bytes)?;
    tracing::info!(
        path = %path.display(),
        sha256 = %snapshot.sha256,
        players = snapshot.event.players.len(),
        scores = snapshot.event.scores.len(),
        "event snapshot loaded"
    );
    Ok(snapshot)
}

pub fn parse_event(bytes: &[u8]) -> Result<Snapshot> {
    let event: Event = serde_json::from_slice(bytes)?;
    event.validate()?;
    Ok(Snapshot {
        event,
        sha256: sha256_hex(bytes),
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::event::{Event, Score};

    pub const DESERT_TRIP: &str = include_str!("../tests/fixtures/desert_trip.json");

    /// Eleven players, three courses, tees and groups; no scores.
    pub fn desert_trip() -> Event {
        serde_json::from_str(DESERT_TRIP).expect("fixture should parse")
    }

    /// Fill in gross scores for every player, course and hole for which
    /// `gross(player, day, hole, par)` returns a value.
    pub fn with_scores<F>(mut event: Event, gross: F) -> Event
    where
        F: Fn(&str, u8, u8, i32) -> Option<i32>,
    {
        let mut scores = Vec::new();
        for player in &event.players {
            for course in &event.courses {
                for hole in &course.holes {
                    if let Some(value) = gross(&player.id, course.day, hole.number, hole.par) {
                        scores.push(Score {
                            player: player.id.clone(),
                            course: course.id.clone(),
                            hole: hole.number,
                            gross: value,
                        });
                    }
                }
            }
        }
        event.scores = scores;
        event
    }
}

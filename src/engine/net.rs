use crate::engine::strokes::strokes_on_hole;
use crate::error::{Result, ScoringError};
use crate::types::course::Course;
use serde::Serialize;
use std::collections::BTreeMap;

/// Net score for one hole: `gross - strokes`, capped at
/// `par + strokes + max_over_par`. Scores under the cap are never clamped.
pub fn net_score(gross: i32, strokes: i32, par: i32, max_over_par: i32) -> Result<i32> {
    if gross < 1 {
        return Err(ScoringError::InvalidScore(format!(
            "gross {gross} must be at least 1"
        )));
    }
    let raw = gross - strokes;
    let cap = par + strokes + max_over_par;
    Ok(raw.min(cap))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetHole {
    pub hole: u8,
    pub par: i32,
    pub gross: i32,
    pub strokes: i32,
    pub net: i32,
}

/// Net scores for the holes of `card` that have been played, in hole order.
pub fn net_card(
    card: &BTreeMap<u8, i32>,
    course: &Course,
    handicap: i32,
    max_over_par: i32,
) -> Result<Vec<NetHole>> {
    course
        .holes_in_order()
        .iter()
        .filter_map(|hole| card.get(&hole.number).map(|&gross| (hole, gross)))
        .map(|(hole, gross)| {
            let strokes = strokes_on_hole(handicap, hole.handicap_rank);
            Ok(NetHole {
                hole: hole.number,
                par: hole.par,
                gross,
                strokes,
                net: net_score(gross, strokes, hole.par, max_over_par)?,
            })
        })
        .collect()
}

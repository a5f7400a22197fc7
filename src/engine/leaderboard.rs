use crate::engine::handicap::course_handicap;
use crate::engine::net::net_card;
use crate::error::Result;
use crate::types::config::{Settings, UnscoredPolicy};
use crate::types::event::Event;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct RoundLine {
    pub day: u8,
    pub course: String,
    pub gross: i32,
    pub net: i32,
    /// Par of the holes completed, not of the whole course.
    pub par: i32,
    pub thru: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    /// Shared by players with equal differentials; `None` when unscored.
    pub position: Option<usize>,
    pub tied: bool,
    pub player_id: String,
    pub name: String,
    pub team: Option<String>,
    pub total_gross: i32,
    pub total_net: i32,
    pub total_par: i32,
    pub differential: i32,
    pub thru: usize,
    pub rounds: Vec<RoundLine>,
}

impl LeaderboardRow {
    pub fn position_label(&self) -> String {
        match (self.position, self.tied) {
            (Some(position), true) => format!("T{position}"),
            (Some(position), false) => position.to_string(),
            (None, _) => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamTotal {
    pub team: String,
    pub differential: i32,
    pub players: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
    pub team_totals: Vec<TeamTotal>,
}

/// Tournament standings across every day, net of course-handicap strokes.
///
/// Ranked by differential (net minus par of holes played), ties ordered by
/// total gross and then name. Tied differentials share a position.
pub fn standings(event: &Event, settings: &Settings) -> Result<Leaderboard> {
    let courses = event.courses_by_day();
    let mut scored = Vec::new();
    let mut unscored = Vec::new();

    for player in &event.players {
        let mut rounds = Vec::new();
        for course in &courses {
            let card = event.card(&player.id, &course.id);
            if card.is_empty() {
                continue;
            }
            let tee = event.tee(&player.id, &course.id)?;
            let ch = course_handicap(player.handicap_index, tee.slope, tee.rating, course.par());
            let holes = net_card(&card, course, ch, settings.net_max_over_par)?;
            rounds.push(RoundLine {
                day: course.day,
                course: course.name.clone(),
                gross: holes.iter().map(|hole| hole.gross).sum(),
                net: holes.iter().map(|hole| hole.net).sum(),
                par: holes.iter().map(|hole| hole.par).sum(),
                thru: holes.len(),
            });
        }

        let total_gross = rounds.iter().map(|round| round.gross).sum();
        let total_net: i32 = rounds.iter().map(|round| round.net).sum();
        let total_par: i32 = rounds.iter().map(|round| round.par).sum();
        let row = LeaderboardRow {
            position: None,
            tied: false,
            player_id: player.id.clone(),
            name: player.name.clone(),
            team: player.team.clone(),
            total_gross,
            total_net,
            total_par,
            differential: total_net - total_par,
            thru: rounds.iter().map(|round| round.thru).sum(),
            rounds,
        };
        if row.thru == 0 {
            unscored.push(row);
        } else {
            scored.push(row);
        }
    }

    scored.sort_by(|a, b| {
        a.differential
            .cmp(&b.differential)
            .then_with(|| a.total_gross.cmp(&b.total_gross))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    assign_positions(&mut scored);

    let team_totals = team_totals(&scored);

    unscored.sort_by(|a, b| a.name.cmp(&b.name));
    let mut rows = scored;
    if settings.unscored == UnscoredPolicy::Last {
        rows.extend(unscored);
    }

    tracing::debug!(rows = rows.len(), teams = team_totals.len(), "standings computed");
    Ok(Leaderboard { rows, team_totals })
}

fn assign_positions(rows: &mut [LeaderboardRow]) {
    let mut counts = BTreeMap::<i32, usize>::new();
    for row in rows.iter() {
        *counts.entry(row.differential).or_default() += 1;
    }
    let mut position = 0;
    let mut previous = None;
    for (index, row) in rows.iter_mut().enumerate() {
        if previous != Some(row.differential) {
            position = index + 1;
            previous = Some(row.differential);
        }
        row.position = Some(position);
        row.tied = counts[&row.differential] > 1;
    }
}

fn team_totals(ranked: &[LeaderboardRow]) -> Vec<TeamTotal> {
    let mut totals = BTreeMap::<&str, (i32, usize)>::new();
    for row in ranked {
        if let Some(team) = row.team.as_deref() {
            let entry = totals.entry(team).or_default();
            entry.0 += row.differential;
            entry.1 += 1;
        }
    }
    let mut totals: Vec<TeamTotal> = totals
        .into_iter()
        .map(|(team, (differential, players))| TeamTotal {
            team: team.to_string(),
            differential,
            players,
        })
        .collect();
    totals.sort_by(|a, b| a.differential.cmp(&b.differential).then_with(|| a.team.cmp(&b.team)));
    totals
}

use crate::engine::leaderboard::Leaderboard;
use crate::engine::matches::{MatchResult, MatchStatus};
use crate::engine::{GroupMatches, HandicapRow, StrokeTable};
use crate::report::{to_par, ReportBody, ReportContext};

pub fn to_markdown(context: &ReportContext, body: ReportBody) -> String {
    let mut output = String::new();
    match body {
        ReportBody::Handicaps(rows) => handicaps(&mut output, context, rows),
        ReportBody::Strokes(tables) => strokes(&mut output, context, tables),
        ReportBody::Leaderboard(board) => leaderboard(&mut output, context, board),
        ReportBody::Matches(groups) => matches(&mut output, context, groups),
    }
    output
}

fn handicaps(output: &mut String, context: &ReportContext, rows: &[HandicapRow]) {
    output.push_str(&format!("# {} Course Handicaps\n\n", context.event));

    let mut courses: Vec<(&str, &str)> = Vec::new();
    for entry in rows.iter().flat_map(|row| &row.courses) {
        if !courses.iter().any(|(id, _)| *id == entry.course_id) {
            courses.push((entry.course_id.as_str(), entry.course.as_str()));
        }
    }

    output.push_str("| Player | Index |");
    for (_, name) in &courses {
        output.push_str(&format!(" {name} |"));
    }
    output.push_str("\n|---|---:|");
    output.push_str(&"---:|".repeat(courses.len()));
    output.push('\n');

    for row in rows {
        output.push_str(&format!("| {} | {:.1} |", row.name, row.handicap_index));
        for (id, _) in &courses {
            match row.courses.iter().find(|entry| entry.course_id == *id) {
                Some(entry) => output.push_str(&format!(" {} |", entry.course_handicap)),
                None => output.push_str(" - |"),
            }
        }
        output.push('\n');
    }
}

fn strokes(output: &mut String, context: &ReportContext, tables: &[StrokeTable]) {
    output.push_str(&format!("# {} Stroke Allocation\n", context.event));
    for table in tables {
        output.push_str(&format!("\n## Day {}: {}\n\n", table.day, table.course));

        output.push_str("| | CH |");
        for hole in &table.holes {
            output.push_str(&format!(" {} |", hole.number));
        }
        output.push_str(" Total |\n|---|---:|");
        output.push_str(&"---:|".repeat(table.holes.len() + 1));
        output.push('\n');

        output.push_str("| Par | |");
        for hole in &table.holes {
            output.push_str(&format!(" {} |", hole.par));
        }
        output.push_str(&format!(
            " {} |\n",
            table.holes.iter().map(|hole| hole.par).sum::<i32>()
        ));
        output.push_str("| Rank | |");
        for hole in &table.holes {
            output.push_str(&format!(" {} |", hole.handicap_rank));
        }
        output.push_str(" |\n");

        for row in &table.rows {
            output.push_str(&format!("| {} | {} |", row.name, row.course_handicap));
            for strokes in &row.strokes {
                output.push_str(&format!(" {strokes} |"));
            }
            output.push_str(&format!(" {} |\n", row.total));
        }
    }
}

fn leaderboard(output: &mut String, context: &ReportContext, board: &Leaderboard) {
    output.push_str(&format!("# {} Leaderboard\n\n", context.event));
    output.push_str(&format!(
        "Net capped at par + {} + strokes.\n\n",
        context.net_max_over_par
    ));

    if board.rows.is_empty() {
        output.push_str("- no scores posted\n");
        return;
    }

    output.push_str("| Pos | Player | Team | Thru | Gross | Net | To Par |\n");
    output.push_str("|---|---|---|---:|---:|---:|---:|\n");
    for row in &board.rows {
        let to_par_cell = if row.position.is_some() {
            to_par(row.differential)
        } else {
            "-".to_string()
        };
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            row.position_label(),
            row.name,
            row.team.as_deref().unwrap_or("-"),
            row.thru,
            row.total_gross,
            row.total_net,
            to_par_cell
        ));
    }

    if !board.team_totals.is_empty() {
        output.push_str("\n## Teams\n\n| Team | Players | To Par |\n|---|---:|---:|\n");
        for team in &board.team_totals {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                team.team,
                team.players,
                to_par(team.differential)
            ));
        }
    }
}

fn matches(output: &mut String, context: &ReportContext, groups: &[GroupMatches]) {
    output.push_str(&format!("# {} Matches\n", context.event));
    if groups.is_empty() {
        output.push_str("\n- no groups\n");
        return;
    }

    for group in groups {
        output.push_str(&format!(
            "\n## Day {}: {} ({})\n",
            group.day, group.group, group.course
        ));
        if group.matches.is_empty() {
            output.push_str("\n- no matches\n");
        }
        for entry in &group.matches {
            let handicaps = entry
                .playing_handicaps
                .iter()
                .map(|entry| format!("{} {}", entry.name, entry.playing_handicap))
                .collect::<Vec<_>>()
                .join(", ");
            match_section(output, &entry.result, &handicaps);
        }
    }
}

fn match_section(output: &mut String, result: &MatchResult, handicaps: &str) {
    output.push_str(&format!(
        "\n### {} vs {} ({})\n\n",
        result.label_a, result.label_b, result.format
    ));
    output.push_str(&format!(
        "- sides: {} vs {}\n",
        result.side_a.join(" & "),
        result.side_b.join(" & ")
    ));
    output.push_str(&format!("- playing handicaps: {handicaps}\n"));
    output.push_str(&format!(
        "- status: {} ({} holes)\n",
        status_text(result.status),
        result.holes_played()
    ));
    match result.stroke_totals {
        Some(totals) => output.push_str(&format!(
            "- net totals: {} vs {}\n",
            totals.side_a, totals.side_b
        )),
        None => {
            output.push_str(&format!(
                "- points: {} vs {}\n",
                result.side_a_points, result.side_b_points
            ));
            if let Some(lead) = result.current_lead() {
                output.push_str(&format!("- lead: {lead}\n"));
            }
        }
    }
    if let Some(points) = result.final_points {
        output.push_str(&format!(
            "- result: {} {} - {} {}\n",
            result.label_a, points.side_a, points.side_b, result.label_b
        ));
    }

    if result.holes.is_empty() {
        return;
    }
    output.push_str("\n| Hole | Par | A | B | Pts | Detail |\n|---:|---:|---|---|---|---|\n");
    for hole in &result.holes {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {}-{} | {} |\n",
            hole.hole,
            hole.par,
            join_nets(&hole.side_a_net),
            join_nets(&hole.side_b_net),
            hole.side_a_points,
            hole.side_b_points,
            hole.detail
        ));
    }
}

fn join_nets(nets: &[i32]) -> String {
    nets.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

fn status_text(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::NotStarted => "not started",
        MatchStatus::InProgress => "in progress",
        MatchStatus::Complete => "complete",
    }
}

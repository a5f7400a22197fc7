#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURE: &str = include_str!("fixtures/desert_trip.json");

/// Write the fixture into `dir` with a gross score for every player, course
/// and hole for which `gross(player, day, hole, par)` returns a value.
fn write_event<F>(dir: &Path, gross: F) -> PathBuf
where
    F: Fn(&str, u64, u64, i64) -> Option<i64>,
{
    let mut event: Value = serde_json::from_str(FIXTURE).expect("fixture should parse");
    let players: Vec<String> = event["players"]
        .as_array()
        .expect("players array")
        .iter()
        .map(|player| player["id"].as_str().expect("player id").to_string())
        .collect();

    let mut scores = Vec::new();
    for course in event["courses"].as_array().expect("courses array") {
        let day = course["day"].as_u64().expect("course day");
        for hole in course["holes"].as_array().expect("holes array") {
            let number = hole["number"].as_u64().expect("hole number");
            let par = hole["par"].as_i64().expect("hole par");
            for player in &players {
                if let Some(value) = gross(player, day, number, par) {
                    scores.push(json!({
                        "player": player,
                        "course": course["id"],
                        "hole": number,
                        "gross": value,
                    }));
                }
            }
        }
    }
    event["scores"] = Value::Array(scores);

    let path = dir.join("event.json");
    fs::write(&path, serde_json::to_string_pretty(&event).expect("event serializes"))
        .expect("event should write");
    path
}

fn golf() -> Command {
    Command::cargo_bin("golf-scoring").expect("binary should compile")
}

#[test]
fn leaderboard_orders_full_field_by_net_differential() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |_, _, _, par| Some(par + 2));

    let output = golf()
        .arg("leaderboard")
        .arg(&event)
        .args(["--format", "json"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&output).expect("stdout should be json");

    let order: Vec<&str> = report["leaderboard"]["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["player_id"].as_str().expect("player id"))
        .collect();
    assert_eq!(
        order,
        vec!["jauch", "chris", "gary", "ben", "eric", "matthew", "bruce", "c-pat", "ryan", "mack", "kiki"]
    );
    assert_eq!(report["net_max_over_par"], 3);
    assert_eq!(
        report["snapshot_sha256"].as_str().map(str::len),
        Some(64)
    );
}

#[test]
fn leaderboard_with_unscored_players_warns() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |player, _, _, par| {
        (player != "gary").then_some(par)
    });

    golf()
        .arg("leaderboard")
        .arg(&event)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("| - | Gary |"));

    golf()
        .arg("leaderboard")
        .arg(&event)
        .args(["--unscored", "exclude"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Gary").not());
}

#[test]
fn net_max_flag_overrides_event_setting() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |_, _, _, _| Some(15));

    let net_total = |cap: &str| -> i64 {
        let output = golf()
            .arg("leaderboard")
            .arg(&event)
            .args(["-f", "json", "--net-max", cap])
            .assert()
            .code(0)
            .get_output()
            .stdout
            .clone();
        let report: Value = serde_json::from_slice(&output).expect("stdout should be json");
        assert_eq!(report["net_max_over_par"], cap.parse::<i64>().expect("cap"));
        report["leaderboard"]["rows"]
            .as_array()
            .expect("rows")
            .iter()
            .find(|row| row["player_id"] == "ryan")
            .and_then(|row| row["total_net"].as_i64())
            .expect("ryan total")
    };

    assert_eq!(net_total("3") - net_total("2"), 54);
}

#[test]
fn config_file_cap_applies_when_event_has_none() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = write_event(dir.path(), |_, _, _, par| Some(par));
    let mut event: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("event should read"))
            .expect("event should parse");
    event["settings"] = json!({});
    fs::write(&path, event.to_string()).expect("event should write");
    fs::write(dir.path().join("golf.toml"), "[scoring]\nnet_max_over_par = 1\n")
        .expect("config should write");

    golf()
        .arg("leaderboard")
        .arg(&path)
        .args(["-f", "json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"net_max_over_par\": 1"));
}

#[test]
fn matches_report_in_progress_round() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |_, day, hole, par| {
        (day == 1 && hole <= 9).then_some(par)
    });

    golf()
        .arg("matches")
        .arg(&event)
        .args(["--day", "1"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("### USA vs Europe (best_ball_validation)"))
        .stdout(predicate::str::contains("- status: in progress (9 holes)"))
        .stdout(predicate::str::contains("Day 1 Group 2"));
}

#[test]
fn matches_json_has_final_points_once_complete() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |_, _, _, par| Some(par + 1));

    let output = golf()
        .arg("matches")
        .arg(&event)
        .args(["--day", "3", "-f", "json"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&output).expect("stdout should be json");
    let matches = report["matches"][0]["matches"].as_array().expect("matches");
    assert_eq!(matches.len(), 2);
    for entry in matches {
        assert_eq!(entry["status"], "complete");
        assert!(entry["final_points"].is_object());
    }
    assert!(matches[1]["stroke_totals"].is_object());
}

#[test]
fn validate_reports_missing_scores_as_warnings() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |player, _, hole, par| {
        (player != "ryan" || hole <= 9).then_some(par)
    });

    golf()
        .arg("validate")
        .arg(&event)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "[WARN] Ryan has 9 of 18 holes on Terra Lago North",
        ));
}

#[test]
fn validate_complete_event_is_ok() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |_, _, _, par| Some(par));

    golf()
        .arg("validate")
        .arg(&event)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("validate: ok"));
}

#[test]
fn zero_gross_is_rejected_on_load() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |player, _, hole, par| {
        Some(if player == "kiki" && hole == 3 { 0 } else { par })
    });

    golf()
        .arg("leaderboard")
        .arg(&event)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid score"));
}

#[test]
fn missing_event_file_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    golf()
        .arg("validate")
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn pair_format_with_single_players_is_arity_error() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = write_event(dir.path(), |_, _, _, par| Some(par));
    let mut event: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("event should read"))
            .expect("event should parse");
    event["groups"][0]["matches"] = json!([{ "side_a": ["ryan"], "side_b": ["kiki"] }]);
    fs::write(&path, event.to_string()).expect("event should write");

    golf()
        .arg("matches")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "format best_ball_validation expects 2 player(s) per side, got 1 vs 1",
        ));
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let dir = TempDir::new().expect("temp dir should be created");
    let event = write_event(dir.path(), |_, _, _, par| Some(par));

    golf()
        .arg("-v")
        .arg("validate")
        .arg(&event)
        .env_remove("RUST_LOG")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("event snapshot loaded"))
        .stdout(predicate::str::contains("event snapshot loaded").not());
}

#[test]
fn negative_event_cap_is_rejected_on_load() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = write_event(dir.path(), |_, _, _, par| Some(par));
    let mut event: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("event should read"))
            .expect("event should parse");
    event["settings"] = json!({ "net_max_over_par": -2 });
    fs::write(&path, event.to_string()).expect("event should write");

    golf()
        .arg("leaderboard")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("net_max_over_par must be 0 or greater"));
}

#[test]
fn player_on_both_sides_is_rejected_on_load() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = write_event(dir.path(), |_, _, _, par| Some(par));
    let mut event: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("event should read"))
            .expect("event should parse");
    event["groups"][0]["matches"][0]["side_b"] = json!(["ryan", "gary"]);
    fs::write(&path, event.to_string()).expect("event should write");

    golf()
        .arg("matches")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ryan appears more than once"));
}

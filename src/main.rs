mod cli;

use clap::Parser;
use golf_scoring::config;
use golf_scoring::engine::handicap::course_handicap;
use golf_scoring::engine::leaderboard::standings;
use golf_scoring::engine::{
    completeness_warnings, course_handicap_table, resolve_group_matches, stroke_tables,
};
use golf_scoring::error::ScoringError;
use golf_scoring::event::{load_event, Snapshot};
use golf_scoring::report::{self, ReportBody, ReportContext};
use golf_scoring::types::config::{Settings, UnscoredPolicy};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

/// Load the snapshot and resolve settings from its directory's config.
fn load(path: &Path, net_max: Option<u8>) -> Result<(Snapshot, Settings), ScoringError> {
    let snapshot = load_event(path)?;
    let event_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let loaded = config::load_config(event_dir)?;
    let settings = Settings::resolve(
        loaded.as_ref(),
        snapshot.event.settings.net_max_over_par,
        net_max.map(i32::from),
    );
    tracing::debug!(
        net_max_over_par = settings.net_max_over_par,
        basis = ?settings.playing_handicap_basis,
        unscored = ?settings.unscored,
        "settings resolved"
    );
    Ok((snapshot, settings))
}

fn context<'a>(snapshot: &'a Snapshot, settings: &Settings) -> ReportContext<'a> {
    ReportContext {
        event: &snapshot.event.name,
        snapshot_sha256: &snapshot.sha256,
        net_max_over_par: settings.net_max_over_par,
    }
}

fn run() -> Result<i32, ScoringError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Handicap(cmd) => {
            println!(
                "{}",
                course_handicap(cmd.index, cmd.slope, cmd.rating, cmd.par)
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Handicaps(cmd) => {
            let (snapshot, settings) = load(&cmd.event, None)?;
            let rows = course_handicap_table(&snapshot.event);
            let rendered = report::render(
                &context(&snapshot, &settings),
                ReportBody::Handicaps(&rows),
                output_format(&cmd.format),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Strokes(cmd) => {
            let (snapshot, settings) = load(&cmd.event, None)?;
            let tables = stroke_tables(&snapshot.event, cmd.day)?;
            let rendered = report::render(
                &context(&snapshot, &settings),
                ReportBody::Strokes(&tables),
                output_format(&cmd.format),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Leaderboard(cmd) => {
            let (snapshot, mut settings) = load(&cmd.event, cmd.net_max)?;
            if let Some(unscored) = cmd.unscored {
                settings.unscored = match unscored {
                    cli::Unscored::Last => UnscoredPolicy::Last,
                    cli::Unscored::Exclude => UnscoredPolicy::Exclude,
                };
            }
            let board = standings(&snapshot.event, &settings)?;
            let rendered = report::render(
                &context(&snapshot, &settings),
                ReportBody::Leaderboard(&board),
                output_format(&cmd.format),
            )?;
            println!("{rendered}");

            let has_unscored = board.rows.len() < snapshot.event.players.len()
                || board.rows.iter().any(|row| row.position.is_none());
            if has_unscored {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Matches(cmd) => {
            let (snapshot, settings) = load(&cmd.event, cmd.net_max)?;
            let groups = resolve_group_matches(&snapshot.event, &settings, cmd.day)?;
            let rendered = report::render(
                &context(&snapshot, &settings),
                ReportBody::Matches(&groups),
                output_format(&cmd.format),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            let (snapshot, _) = load(&cmd.event, None)?;
            let event = &snapshot.event;
            println!(
                "{}: {} players, {} courses, {} groups, {} scores",
                event.name,
                event.players.len(),
                event.courses.len(),
                event.groups.len(),
                event.scores.len()
            );
            println!("sha256: {}", snapshot.sha256);

            let warnings = completeness_warnings(event);
            if warnings.is_empty() {
                println!("validate: ok");
                return Ok(exit_code::SUCCESS);
            }
            for warning in &warnings {
                println!("[WARN] {warning}");
            }
            Ok(exit_code::WARNINGS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}

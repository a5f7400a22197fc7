use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "golf-scoring",
    version,
    about = "Net scoring, match play and leaderboards for a multi-day golf event"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Course handicap for one index on one set of tees
    Handicap(HandicapCommand),
    /// Course handicaps for the whole field on every course
    Handicaps(HandicapsCommand),
    /// Strokes received per hole from each player's course handicap
    Strokes(StrokesCommand),
    /// Tournament standings by net differential
    Leaderboard(LeaderboardCommand),
    /// Every configured match, hole by hole
    Matches(MatchesCommand),
    /// Load and validate an event file
    Validate(ValidateCommand),
}

#[derive(Args)]
pub struct HandicapCommand {
    #[arg(long, allow_negative_numbers = true)]
    pub index: f64,
    #[arg(long)]
    pub slope: u16,
    #[arg(long)]
    pub rating: f64,
    #[arg(long)]
    pub par: i32,
}

#[derive(Args)]
pub struct HandicapsCommand {
    pub event: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct StrokesCommand {
    pub event: PathBuf,
    #[arg(long)]
    pub day: Option<u8>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct LeaderboardCommand {
    pub event: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Net cap over par, overriding the event and config settings
    #[arg(long)]
    pub net_max: Option<u8>,
    #[arg(long, value_enum)]
    pub unscored: Option<Unscored>,
}

#[derive(Args)]
pub struct MatchesCommand {
    pub event: PathBuf,
    #[arg(long)]
    pub day: Option<u8>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Net cap over par, overriding the event and config settings
    #[arg(long)]
    pub net_max: Option<u8>,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub event: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Unscored {
    Last,
    Exclude,
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    #[error("invalid score: {0}")]
    InvalidScore(String),

    #[error(
        "format {format} expects {expected} player(s) per side, got {side_a} vs {side_b}"
    )]
    FormatArity {
        format: String,
        expected: usize,
        side_a: usize,
        side_b: usize,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

use std::fmt;

use thiserror::Error;

/// Pipeline stage an error originated from. Rendered into every service error
/// so the user can tell which step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Upsert,
    Query,
    Generate,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Upsert => "upsert",
            Self::Query => "query",
            Self::Generate => "generate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum GaitError {
    #[error("runner records not found at: {path}")]
    RecordsNotFound { path: String },
    #[error("runner records at {path} are malformed: {message}")]
    RecordsParse { path: String, message: String },
    #[error("no runner named '{0}'")]
    RecordNotFound(String),
    #[error("{stage} failed: {message}")]
    Service { stage: Stage, message: String },
    #[error("invalid input: {0}")]
    Input(String),
    #[error("config error: {0}")]
    Config(String),
}

impl GaitError {
    pub fn service(stage: Stage, err: impl fmt::Display) -> Self {
        Self::Service {
            stage,
            message: err.to_string(),
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Service { stage, .. } => Some(*stage),
            Self::RecordsNotFound { .. } | Self::RecordsParse { .. } => Some(Stage::Load),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Gait(#[from] GaitError),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

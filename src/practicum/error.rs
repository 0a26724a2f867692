use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong inside a single poll cycle.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("endpoint returned {status} instead of 200 OK")]
    Upstream { status: StatusCode },
    #[error("unexpected response shape: {0}")]
    Schema(String),
    #[error("unexpected homework status: {0}")]
    UnknownStatus(String),
}

impl PollError {
    pub fn schema(detail: impl Into<String>) -> Self {
        Self::Schema(detail.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Upstream { .. } => "upstream",
            Self::Schema(_) => "schema",
            Self::UnknownStatus(_) => "unknown_status",
        }
    }
}

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Review states the API reports for a homework, each with a fixed verdict phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            Self::Reviewing => "The work has been taken for review by the reviewer.",
            Self::Rejected => "The work has been reviewed: the reviewer has comments.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validated status API payload. Records stay untyped until the parser inspects them.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// Unix timestamp sent as `from_date` on the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollCursor(pub i64);

impl PollCursor {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }

    /// Cursor for the next cycle: the server's clock minus one poll interval of overlap.
    pub fn after(current_date: i64, overlap_secs: u64) -> Self {
        let overlap = i64::try_from(overlap_secs).unwrap_or(i64::MAX);
        Self(current_date.saturating_sub(overlap))
    }
}

impl fmt::Display for PollCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

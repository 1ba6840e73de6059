//! Common types for scoring: errors and innings end reasons.

use serde::{Deserialize, Serialize};

/// Why an innings is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InningsEnd {
    /// All allotted overs have been bowled.
    OversComplete,
    /// No batsman is left to replace the last dismissal.
    AllOut,
    /// The chasing side has passed the first innings total.
    TargetAchieved,
}

impl std::fmt::Display for InningsEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InningsEnd::OversComplete => write!(f, "overs complete"),
            InningsEnd::AllOut => write!(f, "all out"),
            InningsEnd::TargetAchieved => write!(f, "target achieved"),
        }
    }
}

/// Errors returned by scoring operations.
///
/// Every operation that fails leaves the state it was given untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// Contradictory or out-of-range delivery input.
    InvalidDelivery(String),
    /// A delivery was submitted after the innings ended.
    InningsOver(InningsEnd),
    /// Undo requested with an empty delivery log.
    NothingToUndo,
    /// Teams, batting order or bowling order do not meet the minimum.
    IncompleteRoster(String),
    /// Import payload was not a JSON array of match records.
    MalformedImport(String),
    /// Operation not valid in the match's current phase.
    InvalidState(String),
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::InvalidDelivery(reason) => write!(f, "Invalid delivery: {}", reason),
            ScoreError::InningsOver(end) => write!(f, "Innings is over ({})", end),
            ScoreError::NothingToUndo => write!(f, "No deliveries to undo"),
            ScoreError::IncompleteRoster(reason) => write!(f, "Incomplete roster: {}", reason),
            ScoreError::MalformedImport(reason) => write!(f, "Invalid match data format: {}", reason),
            ScoreError::InvalidState(reason) => write!(f, "Invalid match state: {}", reason),
        }
    }
}

impl std::error::Error for ScoreError {}

pub(crate) fn invalid(reason: &str) -> ScoreError {
    ScoreError::InvalidDelivery(reason.to_string())
}

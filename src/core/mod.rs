//! Core scoring engine
//!
//! Pure state transitions for a two-innings limited-overs match: the
//! delivery processor, undo, the innings lifecycle and the statistics
//! derived from the delivery log. Nothing in here does I/O.

pub mod common;
pub mod config;
pub mod delivery;
pub mod innings;
pub mod lifecycle;
pub mod model;
pub mod stats;
pub mod undo;

// Re-export commonly used types
pub use common::{InningsEnd, ScoreError};
pub use config::*;
pub use delivery::{apply, apply_at};
pub use innings::{InningsState, InningsSummary, MatchContext};
pub use lifecycle::{
    match_result, InningsPhase, InningsRecord, Margin, Match, MatchPhase, MatchResult,
    MatchStatus, MatchType,
};
pub use model::{Delivery, DeliveryInput, Player, PlayerId, RunSplit, Team, TeamId, WicketType};
pub use stats::{
    batting_card, batting_stats, best_batsman, best_bowler, bowling_card, bowling_stats,
    run_rate, strike_rate, BattingStats, BowlingStats, InningsCard, MatchSummary,
};
pub use undo::undo;

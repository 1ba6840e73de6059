//! Commonly used types and utilities for ease of import.

pub use crate::{
    apply, match_result, undo, DeliveryFeed, DeliveryInput, InningsState, Match, MatchContext,
    MatchResult, MatchStatus, MatchStore, MatchType, RandomFeed, ScoreError, ScriptFeed, Team,
    WicketType,
};

#[cfg(feature = "cli")]
pub use crate::{init_logging, parse_delivery, render_scoreboard, Autosaver, Session};

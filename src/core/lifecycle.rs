//! Match root entity and the innings lifecycle around it.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::common::{InningsEnd, ScoreError};
use super::config::{MAX_OVERS, MAX_WICKETS, NUM_INNINGS, ODI_OVERS, T20_OVERS, TEST_OVERS};
use super::delivery;
use super::innings::{InningsState, InningsSummary, MatchContext};
use super::model::{DeliveryInput, PlayerId, Team, TeamId};
use super::undo;

/// Format of the match, which sets the default overs per innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    T20,
    #[serde(rename = "ODI")]
    Odi,
    #[serde(rename = "TEST")]
    Test,
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl MatchType {
    /// Preset overs per innings; `None` for custom matches.
    pub fn default_overs(&self) -> Option<u32> {
        match self {
            MatchType::T20 => Some(T20_OVERS),
            MatchType::Odi => Some(ODI_OVERS),
            MatchType::Test => Some(TEST_OVERS),
            MatchType::Custom => None,
        }
    }
}

impl std::str::FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "T20" => Ok(MatchType::T20),
            "ODI" => Ok(MatchType::Odi),
            "TEST" => Ok(MatchType::Test),
            "CUSTOM" => Ok(MatchType::Custom),
            other => Err(format!("unknown match type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    Setup,
    InProgress,
    Completed,
}

/// Where a match is in its two-innings lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Setup,
    Innings1,
    Innings2,
    Completed,
}

/// Where the current innings is in its own lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InningsPhase {
    /// Waiting for the bowling order to be chosen.
    Setup,
    InProgress,
    /// Play is over; waiting to be frozen into the summary.
    Complete(InningsEnd),
}

/// Frozen innings, filled in as each one completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsRecord {
    #[serde(default)]
    pub inning1: Option<InningsSummary>,
    #[serde(default)]
    pub inning2: Option<InningsSummary>,
}

/// One match: both teams, the frozen innings and the live one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub timestamp: i64,
    pub match_type: MatchType,
    pub overs: u32,
    pub team1: Team,
    pub team2: Team,
    pub current_inning: u8,
    #[serde(default)]
    pub innings: InningsRecord,
    pub status: MatchStatus,
    #[serde(default)]
    pub live: Option<InningsState>,
}

impl Match {
    /// Set up a match between two teams. `team1` bats first.
    pub fn new(match_type: MatchType, overs: u32, team1: Team, team2: Team) -> Result<Self, ScoreError> {
        let now = chrono::Utc::now().timestamp_millis();
        Self::new_at(format!("match-{}", now), now, match_type, overs, team1, team2)
    }

    /// Like [`Match::new`] with an explicit id and creation time.
    pub fn new_at(
        id: impl Into<String>,
        timestamp: i64,
        match_type: MatchType,
        overs: u32,
        team1: Team,
        team2: Team,
    ) -> Result<Self, ScoreError> {
        if overs == 0 {
            return Err(ScoreError::IncompleteRoster("a match needs at least one over".into()));
        }
        if overs > MAX_OVERS {
            return Err(ScoreError::IncompleteRoster(format!(
                "{} overs is more than the {} allowed",
                overs, MAX_OVERS
            )));
        }
        for team in [&team1, &team2] {
            if !team.can_bat() {
                return Err(ScoreError::IncompleteRoster(format!(
                    "{} needs at least 2 players in batting order",
                    team.name
                )));
            }
        }
        if team1.id == team2.id {
            return Err(ScoreError::IncompleteRoster(format!(
                "both teams share the id {}",
                team1.id
            )));
        }
        Ok(Self {
            id: id.into(),
            timestamp,
            match_type,
            overs,
            team1,
            team2,
            current_inning: 1,
            innings: InningsRecord::default(),
            status: MatchStatus::Setup,
            live: None,
        })
    }

    /// Batting and bowling sides for the current innings.
    pub fn sides(&self) -> (&Team, &Team) {
        if self.current_inning == 1 {
            (&self.team1, &self.team2)
        } else {
            (&self.team2, &self.team1)
        }
    }

    pub fn context(&self) -> MatchContext {
        match (self.current_inning, &self.innings.inning1) {
            (2, Some(first)) => MatchContext::chase(self.overs, first.runs),
            _ => MatchContext::first_innings(self.overs),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        match (self.status, self.current_inning) {
            (MatchStatus::Completed, _) => MatchPhase::Completed,
            (MatchStatus::Setup, _) => MatchPhase::Setup,
            (MatchStatus::InProgress, 1) => MatchPhase::Innings1,
            (MatchStatus::InProgress, _) => MatchPhase::Innings2,
        }
    }

    pub fn innings_phase(&self) -> InningsPhase {
        match &self.live {
            None => InningsPhase::Setup,
            Some(state) => match state.end(&self.context()) {
                Some(end) => InningsPhase::Complete(end),
                None => InningsPhase::InProgress,
            },
        }
    }

    /// Why the live innings is over, if it is.
    pub fn live_end(&self) -> Option<InningsEnd> {
        self.live.as_ref().and_then(|s| s.end(&self.context()))
    }

    /// Open the current innings with the given bowling rotation.
    pub fn start_innings(&self, bowling_order: Vec<PlayerId>) -> Result<Self, ScoreError> {
        if self.status == MatchStatus::Completed {
            return Err(ScoreError::InvalidState("match is already completed".into()));
        }
        if self.live.is_some() {
            return Err(ScoreError::InvalidState(format!(
                "innings {} is already under way",
                self.current_inning
            )));
        }
        let (batting, bowling) = self.sides();
        let state = InningsState::start(batting, bowling, bowling_order)?;
        info!(
            "innings {} started: {} batting, {} bowling",
            self.current_inning, state.batting_team.name, state.bowling_team.name
        );
        let mut next = self.clone();
        next.live = Some(state);
        next.status = MatchStatus::InProgress;
        Ok(next)
    }

    fn live_state(&self) -> Result<&InningsState, ScoreError> {
        self.live
            .as_ref()
            .ok_or_else(|| ScoreError::InvalidState("no innings in progress".into()))
    }

    fn with_live(&self, state: InningsState) -> Self {
        let mut next = self.clone();
        next.live = Some(state);
        next
    }

    /// Record one delivery in the live innings.
    pub fn record(&self, input: DeliveryInput) -> Result<Self, ScoreError> {
        let state = delivery::apply(self.live_state()?, &self.context(), input)?;
        Ok(self.with_live(state))
    }

    /// [`Match::record`] with an explicit timestamp.
    pub fn record_at(&self, input: DeliveryInput, timestamp: i64) -> Result<Self, ScoreError> {
        let state = delivery::apply_at(self.live_state()?, &self.context(), input, timestamp)?;
        Ok(self.with_live(state))
    }

    pub fn undo(&self) -> Result<Self, ScoreError> {
        let state = undo::undo(self.live_state()?)?;
        Ok(self.with_live(state))
    }

    pub fn rotate_strike(&self) -> Result<Self, ScoreError> {
        let state = self.live_state()?.rotate_strike();
        Ok(self.with_live(state))
    }

    pub fn advance_bowler(&self) -> Result<Self, ScoreError> {
        let state = self.live_state()?.advance_bowler();
        Ok(self.with_live(state))
    }

    /// Freeze the live innings. After the first innings the sides swap and
    /// the match waits for the second to start; after the second the match
    /// is completed.
    pub fn complete_innings(&self) -> Result<Self, ScoreError> {
        let state = self.live_state()?;
        match state.end(&self.context()) {
            Some(end) => info!("innings {} complete ({})", self.current_inning, end),
            None => warn!(
                "innings {} closed early at {}/{} after {}.{} overs",
                self.current_inning, state.runs, state.wickets, state.current_over, state.current_ball
            ),
        }
        let summary = state.summary();
        let mut next = self.clone();
        next.live = None;
        if self.current_inning < NUM_INNINGS {
            next.innings.inning1 = Some(summary);
            next.current_inning += 1;
        } else {
            next.innings.inning2 = Some(summary);
            next.status = MatchStatus::Completed;
            if let Some(result) = match_result(&next) {
                info!("match {} completed: {}", next.id, result);
            }
        }
        Ok(next)
    }

    /// Compact binary copy of the whole match.
    pub fn snapshot(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn restore(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

/// Winning margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Margin {
    Runs(u32),
    Wickets(u32),
}

impl std::fmt::Display for Margin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (n, unit) = match self {
            Margin::Runs(n) => (n, "run"),
            Margin::Wickets(n) => (n, "wicket"),
        };
        write!(f, "by {} {}{}", n, unit, if *n == 1 { "" } else { "s" })
    }
}

/// Outcome of a completed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum MatchResult {
    #[serde(rename_all = "camelCase")]
    Won {
        winner: TeamId,
        winner_name: String,
        margin: Margin,
    },
    /// Scores level. No tie-break is applied.
    Tied { runs: u32 },
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Won { winner_name, margin, .. } => write!(f, "{} won {}", winner_name, margin),
            MatchResult::Tied { runs } => write!(f, "match tied on {}", runs),
        }
    }
}

/// Result once both innings are frozen; `None` before that.
pub fn match_result(m: &Match) -> Option<MatchResult> {
    let first = m.innings.inning1.as_ref()?;
    let second = m.innings.inning2.as_ref()?;
    let result = if second.runs > first.runs {
        MatchResult::Won {
            winner: second.batting_team.id.clone(),
            winner_name: second.batting_team.name.clone(),
            margin: Margin::Wickets(MAX_WICKETS.saturating_sub(second.wickets)),
        }
    } else if first.runs > second.runs {
        MatchResult::Won {
            winner: first.batting_team.id.clone(),
            winner_name: first.batting_team.name.clone(),
            margin: Margin::Runs(first.runs - second.runs),
        }
    } else {
        MatchResult::Tied { runs: first.runs }
    };
    Some(result)
}

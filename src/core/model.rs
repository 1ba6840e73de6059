//! Players, teams and the per-ball delivery records.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::common::{invalid, ScoreError};
use super::config::{wicket_type_by_name, MAX_RUNS_PER_BALL, MIN_BATTING_ORDER};

pub type PlayerId = String;
pub type TeamId = String;

/// A player in a team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub jersey_number: u32,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, jersey_number: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            jersey_number,
        }
    }
}

/// A team roster with its batting order and, while bowling, its bowling rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<Player>,
    pub batting_order: Vec<PlayerId>,
    #[serde(default)]
    pub bowling_order: Vec<PlayerId>,
}

impl Team {
    /// Build a team, checking that the batting order holds unique roster members.
    pub fn new(
        id: impl Into<TeamId>,
        name: impl Into<String>,
        players: Vec<Player>,
        batting_order: Vec<PlayerId>,
    ) -> Result<Self, ScoreError> {
        let team = Self {
            id: id.into(),
            name: name.into(),
            players,
            batting_order,
            bowling_order: Vec::new(),
        };
        if team.name.trim().is_empty() {
            return Err(ScoreError::IncompleteRoster("team name is empty".into()));
        }
        team.check_order(&team.batting_order, "batting order")?;
        Ok(team)
    }

    /// Team whose batting order is simply its roster order.
    pub fn with_roster_order(
        id: impl Into<TeamId>,
        name: impl Into<String>,
        players: Vec<Player>,
    ) -> Result<Self, ScoreError> {
        let order = players.iter().map(|p| p.id.clone()).collect();
        Self::new(id, name, players, order)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Player batting at `idx` in the batting order.
    pub fn batter_at(&self, idx: usize) -> Option<&Player> {
        self.batting_order.get(idx).and_then(|id| self.player(id))
    }

    /// Player bowling at `idx` in the bowling rotation.
    pub fn bowler_at(&self, idx: usize) -> Option<&Player> {
        self.bowling_order.get(idx).and_then(|id| self.player(id))
    }

    /// Copy of this team carrying `order` as its bowling rotation.
    pub fn with_bowling_order(&self, order: Vec<PlayerId>) -> Result<Self, ScoreError> {
        if order.is_empty() {
            return Err(ScoreError::IncompleteRoster(format!(
                "{} needs at least one bowler selected",
                self.name
            )));
        }
        self.check_order(&order, "bowling order")?;
        let mut team = self.clone();
        team.bowling_order = order;
        Ok(team)
    }

    /// Roster checks for an order list: unique ids, all on the roster.
    fn check_order(&self, order: &[PlayerId], what: &str) -> Result<(), ScoreError> {
        let mut seen = HashSet::new();
        for id in order {
            if !seen.insert(id.as_str()) {
                return Err(ScoreError::IncompleteRoster(format!(
                    "{} of {} lists {} twice",
                    what, self.name, id
                )));
            }
            if self.player(id).is_none() {
                return Err(ScoreError::IncompleteRoster(format!(
                    "{} of {} names unknown player {}",
                    what, self.name, id
                )));
            }
        }
        Ok(())
    }

    /// Whether the batting order is long enough to open an innings.
    pub fn can_bat(&self) -> bool {
        self.batting_order.len() >= MIN_BATTING_ORDER
    }
}

/// How a batsman was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WicketType {
    Caught,
    Bowled,
    #[serde(rename = "LBW")]
    Lbw,
    #[serde(rename = "Run Out")]
    RunOut,
    Stumped,
    #[serde(rename = "Hit Wicket")]
    HitWicket,
    #[serde(rename = "Handled Ball")]
    HandledBall,
    Obstructing,
}

impl WicketType {
    /// Display name, identical to the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            WicketType::Caught => "Caught",
            WicketType::Bowled => "Bowled",
            WicketType::Lbw => "LBW",
            WicketType::RunOut => "Run Out",
            WicketType::Stumped => "Stumped",
            WicketType::HitWicket => "Hit Wicket",
            WicketType::HandledBall => "Handled Ball",
            WicketType::Obstructing => "Obstructing",
        }
    }
}

impl std::fmt::Display for WicketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for WicketType {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        wicket_type_by_name(s)
            .ok_or_else(|| ScoreError::InvalidDelivery(format!("unknown wicket type '{}'", s)))
    }
}

/// Raw facts about one ball as entered by the scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInput {
    pub runs: u32,
    pub is_wicket: bool,
    pub wicket_type: Option<WicketType>,
    pub is_no_ball: bool,
    pub is_wide: bool,
    pub is_bye: bool,
    pub is_leg_bye: bool,
}

impl DeliveryInput {
    pub fn dot() -> Self {
        Self::default()
    }

    pub fn runs(runs: u32) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    /// Wide; `runs` are any runs taken on top of the penalty.
    pub fn wide(runs: u32) -> Self {
        Self {
            runs,
            is_wide: true,
            ..Self::default()
        }
    }

    /// No-ball; `runs` are runs off the bat.
    pub fn no_ball(runs: u32) -> Self {
        Self {
            runs,
            is_no_ball: true,
            ..Self::default()
        }
    }

    pub fn bye(runs: u32) -> Self {
        Self {
            runs,
            is_bye: true,
            ..Self::default()
        }
    }

    pub fn leg_bye(runs: u32) -> Self {
        Self {
            runs,
            is_leg_bye: true,
            ..Self::default()
        }
    }

    pub fn wicket(kind: WicketType) -> Self {
        Self::dot().with_wicket(kind)
    }

    pub fn with_wicket(mut self, kind: WicketType) -> Self {
        self.is_wicket = true;
        self.wicket_type = Some(kind);
        self
    }

    /// Counts toward the six balls of an over.
    pub fn is_legal(&self) -> bool {
        !self.is_wide && !self.is_no_ball
    }

    /// Reject contradictory flag combinations. Free-hit rules need match state
    /// and are checked by the processor.
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.runs > MAX_RUNS_PER_BALL {
            return Err(ScoreError::InvalidDelivery(format!(
                "{} runs off one ball (max {})",
                self.runs, MAX_RUNS_PER_BALL
            )));
        }
        if self.is_wicket && self.wicket_type.is_none() {
            return Err(invalid("please select a wicket type"));
        }
        if self.is_wide && self.is_no_ball {
            return Err(invalid("cannot have both wide and no-ball"));
        }
        if (self.is_bye || self.is_leg_bye) && (self.is_wide || self.is_no_ball) {
            return Err(invalid("bye/leg-bye cannot be with wide/no-ball"));
        }
        if self.is_bye && self.is_leg_bye {
            return Err(invalid("cannot have both bye and leg-bye"));
        }
        Ok(())
    }

    /// Split `runs` into (batsman, extra, total) according to the ball type.
    pub fn attribution(&self) -> RunSplit {
        if self.is_wide {
            let extra = 1 + self.runs;
            RunSplit { batsman: 0, extra, total: extra }
        } else if self.is_no_ball {
            RunSplit { batsman: self.runs, extra: 1, total: 1 + self.runs }
        } else if self.is_bye || self.is_leg_bye {
            RunSplit { batsman: 0, extra: self.runs, total: self.runs }
        } else {
            RunSplit { batsman: self.runs, extra: 0, total: self.runs }
        }
    }

    /// Runs whose parity decides strike rotation on a legal ball. Byes and
    /// leg byes credit nothing to the bat.
    pub(crate) fn rotation_runs(&self) -> u32 {
        if self.is_bye || self.is_leg_bye {
            0
        } else {
            self.runs
        }
    }
}

/// How the runs of one ball are credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSplit {
    pub batsman: u32,
    pub extra: u32,
    pub total: u32,
}

/// Immutable record of one ball in the innings log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub ball_number: u32,
    pub over: u32,
    pub ball: u32,
    pub batsman_id: PlayerId,
    pub bowler_id: PlayerId,
    pub runs: u32,
    pub total_runs: u32,
    pub extra_runs: u32,
    pub is_wicket: bool,
    pub wicket_type: Option<WicketType>,
    pub dismissed_batsman_id: Option<PlayerId>,
    pub is_no_ball: bool,
    pub is_wide: bool,
    pub is_bye: bool,
    pub is_leg_bye: bool,
    #[serde(default)]
    pub is_free_hit: bool,
    pub timestamp: i64,
}

impl Delivery {
    pub fn is_legal(&self) -> bool {
        !self.is_wide && !self.is_no_ball
    }

    /// Short scorer's notation, e.g. `4`, `1wd`, `nb2`, `2lb`, `W`.
    pub fn code(&self) -> String {
        if self.is_wicket {
            return if self.total_runs > 0 {
                format!("{}W", self.total_runs)
            } else {
                "W".to_string()
            };
        }
        if self.is_wide {
            format!("{}wd", self.extra_runs)
        } else if self.is_no_ball {
            format!("nb{}", self.runs)
        } else if self.is_bye {
            format!("{}b", self.extra_runs)
        } else if self.is_leg_bye {
            format!("{}lb", self.extra_runs)
        } else {
            self.runs.to_string()
        }
    }
}

//! Live innings state and its frozen summary.

use serde::{Deserialize, Serialize};

use super::common::{InningsEnd, ScoreError};
use super::config::{BALLS_PER_OVER, MAX_WICKETS};
use super::model::{Delivery, Player, PlayerId, Team};
use super::stats::run_rate;

/// Match-level facts the processor needs alongside the innings state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchContext {
    /// Overs allotted per innings.
    pub overs: u32,
    /// First innings total when this is the chase.
    pub chasing: Option<u32>,
}

impl MatchContext {
    pub fn first_innings(overs: u32) -> Self {
        Self { overs, chasing: None }
    }

    pub fn chase(overs: u32, first_innings_runs: u32) -> Self {
        Self {
            overs,
            chasing: Some(first_innings_runs),
        }
    }

    /// Runs needed to win, one more than the first innings total.
    pub fn target(&self) -> Option<u32> {
        self.chasing.map(|runs| runs + 1)
    }

    pub fn total_balls(&self) -> u32 {
        self.overs.saturating_mul(BALLS_PER_OVER)
    }
}

/// Live state of the innings in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsState {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub runs: u32,
    pub wickets: u32,
    #[serde(default)]
    pub extras: u32,
    pub current_over: u32,
    pub current_ball: u32,
    pub deliveries: Vec<Delivery>,
    pub striker_idx: usize,
    pub non_striker_idx: usize,
    pub bowler_idx: usize,
    #[serde(default)]
    pub next_ball_is_free_hit: bool,
}

impl InningsState {
    /// Open an innings: openers are the first two in the batting order and the
    /// first bowler in `bowling_order` takes the new ball.
    pub fn start(
        batting: &Team,
        bowling: &Team,
        bowling_order: Vec<PlayerId>,
    ) -> Result<Self, ScoreError> {
        if !batting.can_bat() {
            return Err(ScoreError::IncompleteRoster(format!(
                "{} needs at least 2 players in batting order",
                batting.name
            )));
        }
        let mut batting_team = batting.clone();
        batting_team.bowling_order.clear();
        let bowling_team = bowling.with_bowling_order(bowling_order)?;
        Ok(Self {
            batting_team,
            bowling_team,
            runs: 0,
            wickets: 0,
            extras: 0,
            current_over: 0,
            current_ball: 0,
            deliveries: Vec::new(),
            striker_idx: 0,
            non_striker_idx: 1,
            bowler_idx: 0,
            next_ball_is_free_hit: false,
        })
    }

    /// Legal balls bowled so far.
    pub fn legal_balls(&self) -> u32 {
        self.current_over * BALLS_PER_OVER + self.current_ball
    }

    pub fn balls_remaining(&self, ctx: &MatchContext) -> u32 {
        ctx.total_balls().saturating_sub(self.legal_balls())
    }

    /// Wickets that end the innings: ten, or fewer when the order runs out first.
    pub fn wicket_limit(&self) -> u32 {
        let available = self.batting_team.batting_order.len().saturating_sub(1) as u32;
        MAX_WICKETS.min(available)
    }

    pub fn is_all_out(&self) -> bool {
        self.wickets >= self.wicket_limit()
    }

    /// Why the innings is over, if it is.
    pub fn end(&self, ctx: &MatchContext) -> Option<InningsEnd> {
        if ctx.chasing.is_some_and(|first| self.runs > first) {
            Some(InningsEnd::TargetAchieved)
        } else if self.is_all_out() {
            Some(InningsEnd::AllOut)
        } else if self.balls_remaining(ctx) == 0 {
            Some(InningsEnd::OversComplete)
        } else {
            None
        }
    }

    pub fn is_over(&self, ctx: &MatchContext) -> bool {
        self.end(ctx).is_some()
    }

    pub fn striker_id(&self) -> Option<&PlayerId> {
        self.batting_team.batting_order.get(self.striker_idx)
    }

    pub fn non_striker_id(&self) -> Option<&PlayerId> {
        self.batting_team.batting_order.get(self.non_striker_idx)
    }

    pub fn bowler_id(&self) -> Option<&PlayerId> {
        self.bowling_team.bowling_order.get(self.bowler_idx)
    }

    pub fn striker(&self) -> Option<&Player> {
        self.batting_team.batter_at(self.striker_idx)
    }

    pub fn non_striker(&self) -> Option<&Player> {
        self.batting_team.batter_at(self.non_striker_idx)
    }

    pub fn bowler(&self) -> Option<&Player> {
        self.bowling_team.bowler_at(self.bowler_idx)
    }

    /// Swap striker and non-striker.
    pub fn rotate_strike(&self) -> Self {
        let mut next = self.clone();
        next.swap_ends();
        next
    }

    /// Hand the ball to the next bowler in the rotation.
    pub fn advance_bowler(&self) -> Self {
        let mut next = self.clone();
        next.next_bowler();
        next
    }

    pub(crate) fn swap_ends(&mut self) {
        std::mem::swap(&mut self.striker_idx, &mut self.non_striker_idx);
    }

    pub(crate) fn next_bowler(&mut self) {
        let n = self.bowling_team.bowling_order.len().max(1);
        self.bowler_idx = (self.bowler_idx + 1) % n;
    }

    /// Team runs per over so far.
    pub fn run_rate(&self) -> f64 {
        run_rate(self.runs, self.legal_balls())
    }

    /// Runs still needed in a chase.
    pub fn runs_required(&self, ctx: &MatchContext) -> Option<u32> {
        ctx.target().map(|target| target.saturating_sub(self.runs))
    }

    /// Runs per over needed over the remaining balls of a chase.
    pub fn required_run_rate(&self, ctx: &MatchContext) -> Option<f64> {
        let needed = self.runs_required(ctx)?;
        Some(run_rate(needed, self.balls_remaining(ctx)))
    }

    /// Deliveries bowled in the current over, wides and no-balls included.
    pub fn this_over(&self) -> impl Iterator<Item = &Delivery> {
        let over = self.current_over;
        self.deliveries.iter().filter(move |d| d.over == over)
    }

    /// Runs and wickets so far in the current over.
    pub fn this_over_totals(&self) -> (u32, u32) {
        self.this_over().fold((0, 0), |(runs, wickets), d| {
            (runs + d.total_runs, wickets + d.is_wicket as u32)
        })
    }

    /// The last `n` deliveries, oldest first.
    pub fn recent(&self, n: usize) -> &[Delivery] {
        let start = self.deliveries.len().saturating_sub(n);
        &self.deliveries[start..]
    }

    /// Freeze into an immutable summary.
    pub fn summary(&self) -> InningsSummary {
        InningsSummary {
            batting_team: self.batting_team.clone(),
            bowling_team: self.bowling_team.clone(),
            runs: self.runs,
            wickets: self.wickets,
            extras: self.extras,
            overs: self.current_over,
            balls: self.current_ball,
            deliveries: self.deliveries.clone(),
        }
    }
}

/// Snapshot of a finished innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsSummary {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub runs: u32,
    pub wickets: u32,
    #[serde(default)]
    pub extras: u32,
    pub overs: u32,
    #[serde(default)]
    pub balls: u32,
    pub deliveries: Vec<Delivery>,
}

impl InningsSummary {
    pub fn legal_balls(&self) -> u32 {
        self.overs * BALLS_PER_OVER + self.balls
    }

    pub fn run_rate(&self) -> f64 {
        run_rate(self.runs, self.legal_balls())
    }

    /// Overs in cricket notation, e.g. `19.4`.
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.overs, self.balls)
    }
}

//! Batting and bowling figures derived from a delivery log.
//!
//! Nothing here is stored; every figure is recomputed from the deliveries so
//! it stays correct across undo.

use serde::Serialize;

use super::config::BALLS_PER_OVER;
use super::innings::{InningsState, InningsSummary};
use super::lifecycle::{match_result, Match, MatchResult};
use super::model::{Delivery, PlayerId, WicketType};

/// Runs per over for `runs` scored off `balls` legal balls; zero with no balls.
pub fn run_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        runs as f64 * BALLS_PER_OVER as f64 / balls as f64
    }
}

/// Runs per hundred balls; zero with no balls.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        runs as f64 / balls as f64 * 100.0
    }
}

/// One batsman's line on the scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingStats {
    pub player_id: PlayerId,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
    pub dismissal: Option<WicketType>,
}

impl BattingStats {
    pub fn is_out(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Faced a legal ball or was dismissed.
    pub fn has_batted(&self) -> bool {
        self.balls_faced > 0 || self.is_out()
    }

    pub fn dismissal_label(&self) -> &'static str {
        self.dismissal.map_or("not out", |wt| wt.name())
    }
}

/// One bowler's line on the scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingStats {
    pub player_id: PlayerId,
    pub legal_balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub economy: f64,
}

impl BowlingStats {
    /// Overs in cricket notation, e.g. `3.2`.
    pub fn overs_display(&self) -> String {
        format!(
            "{}.{}",
            self.legal_balls / BALLS_PER_OVER,
            self.legal_balls % BALLS_PER_OVER
        )
    }
}

/// Batting figures for each player in `order`, in that order.
pub fn batting_card(deliveries: &[Delivery], order: &[PlayerId]) -> Vec<BattingStats> {
    order
        .iter()
        .map(|id| {
            let mut line = BattingStats {
                player_id: id.clone(),
                runs: 0,
                balls_faced: 0,
                fours: 0,
                sixes: 0,
                strike_rate: 0.0,
                dismissal: None,
            };
            for d in deliveries.iter().filter(|d| &d.batsman_id == id) {
                line.runs += d.runs;
                if d.is_legal() {
                    line.balls_faced += 1;
                }
                match d.runs {
                    4 => line.fours += 1,
                    6 => line.sixes += 1,
                    _ => {}
                }
            }
            line.dismissal = deliveries
                .iter()
                .find(|d| d.is_wicket && d.dismissed_batsman_id.as_ref() == Some(id))
                .and_then(|d| d.wicket_type);
            line.strike_rate = strike_rate(line.runs, line.balls_faced);
            line
        })
        .collect()
}

/// Bowling figures for each player in `order`, in that order.
pub fn bowling_card(deliveries: &[Delivery], order: &[PlayerId]) -> Vec<BowlingStats> {
    order
        .iter()
        .map(|id| {
            let mut line = BowlingStats {
                player_id: id.clone(),
                legal_balls: 0,
                runs_conceded: 0,
                wickets: 0,
                economy: 0.0,
            };
            for d in deliveries.iter().filter(|d| &d.bowler_id == id) {
                if d.is_legal() {
                    line.legal_balls += 1;
                }
                line.runs_conceded += d.total_runs;
                if d.is_wicket {
                    line.wickets += 1;
                }
            }
            line.economy = run_rate(line.runs_conceded, line.legal_balls);
            line
        })
        .collect()
}

/// Batting card of the live innings.
pub fn batting_stats(state: &InningsState) -> Vec<BattingStats> {
    batting_card(&state.deliveries, &state.batting_team.batting_order)
}

/// Bowling card of the live innings.
pub fn bowling_stats(state: &InningsState) -> Vec<BowlingStats> {
    bowling_card(&state.deliveries, &state.bowling_team.bowling_order)
}

/// Highest scorer; the first encountered wins a tie.
pub fn best_batsman<'a, I>(stats: I) -> Option<&'a BattingStats>
where
    I: IntoIterator<Item = &'a BattingStats>,
{
    stats.into_iter().fold(None, |best, current| match best {
        Some(b) if current.runs <= b.runs => Some(b),
        _ => Some(current),
    })
}

/// Most wickets, then lowest economy; the first encountered wins a full tie.
pub fn best_bowler<'a, I>(stats: I) -> Option<&'a BowlingStats>
where
    I: IntoIterator<Item = &'a BowlingStats>,
{
    stats.into_iter().fold(None, |best, current| match best {
        Some(b)
            if current.wickets < b.wickets
                || (current.wickets == b.wickets && current.economy >= b.economy) =>
        {
            Some(b)
        }
        _ => Some(current),
    })
}

/// Scorecard of a finished innings, listing only players who took part.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsCard {
    pub batting_team: String,
    pub bowling_team: String,
    pub runs: u32,
    pub wickets: u32,
    pub extras: u32,
    pub overs: String,
    pub run_rate: f64,
    pub batting: Vec<BattingStats>,
    pub bowling: Vec<BowlingStats>,
}

impl InningsCard {
    pub fn from_summary(summary: &InningsSummary) -> Self {
        let batting = batting_card(&summary.deliveries, &summary.batting_team.batting_order)
            .into_iter()
            .filter(BattingStats::has_batted)
            .collect();
        let bowling = bowling_card(&summary.deliveries, &summary.bowling_team.bowling_order)
            .into_iter()
            .filter(|b| b.legal_balls > 0)
            .collect();
        Self {
            batting_team: summary.batting_team.name.clone(),
            bowling_team: summary.bowling_team.name.clone(),
            runs: summary.runs,
            wickets: summary.wickets,
            extras: summary.extras,
            overs: summary.overs_display(),
            run_rate: summary.run_rate(),
            batting,
            bowling,
        }
    }

    pub fn best_batsman(&self) -> Option<&BattingStats> {
        best_batsman(&self.batting)
    }

    pub fn best_bowler(&self) -> Option<&BowlingStats> {
        best_bowler(&self.bowling)
    }
}

/// Post-match view: both scorecards, best performers and the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub first: InningsCard,
    pub second: InningsCard,
    pub result: MatchResult,
}

impl MatchSummary {
    /// `None` until both innings have been completed.
    pub fn from_match(m: &Match) -> Option<Self> {
        let first = m.innings.inning1.as_ref()?;
        let second = m.innings.inning2.as_ref()?;
        Some(Self {
            first: InningsCard::from_summary(first),
            second: InningsCard::from_summary(second),
            result: match_result(m)?,
        })
    }

    pub fn best_batsman(&self) -> Option<&BattingStats> {
        best_batsman(self.first.batting.iter().chain(&self.second.batting))
    }

    pub fn best_bowler(&self) -> Option<&BowlingStats> {
        best_bowler(self.first.bowling.iter().chain(&self.second.bowling))
    }
}

//! Delivery feeds
//!
//! A feed decides what happens on each ball so a whole match can be played
//! without a scorer at the keyboard:
//! - RandomFeed: weighted random outcomes from a seeded RNG
//! - ScriptFeed: a fixed list of deliveries, for tests and replays

use log::debug;
use rand::rngs::SmallRng;

use crate::core::{
    config::{BALLS_PER_OVER, MAX_WICKETS},
    DeliveryInput, InningsState, Match, MatchStatus, PlayerId, ScoreError, Team,
};

/// Source of deliveries for an unattended innings.
pub trait DeliveryFeed {
    /// Choose the bowling rotation for `bowling` at the start of an innings.
    /// Defaults to the last five players on the roster.
    fn choose_bowlers(&mut self, _rng: &mut SmallRng, bowling: &Team) -> Vec<PlayerId> {
        tail_bowlers(bowling)
    }

    /// Decide the next ball given the live innings.
    fn next_delivery(&mut self, rng: &mut SmallRng, state: &InningsState) -> DeliveryInput;
}

/// The last five players on the roster, where the bowlers usually sit.
pub fn tail_bowlers(bowling: &Team) -> Vec<PlayerId> {
    let skip = bowling.players.len().saturating_sub(5);
    bowling.players.iter().skip(skip).map(|p| p.id.clone()).collect()
}

pub mod random;
pub use random::RandomFeed;

pub mod script;
pub use script::ScriptFeed;

/// Play the current innings of `m` to its end and freeze it.
pub fn play_innings(
    m: &Match,
    feed: &mut dyn DeliveryFeed,
    rng: &mut SmallRng,
) -> Result<Match, ScoreError> {
    let (_, bowling) = m.sides();
    let bowlers = feed.choose_bowlers(rng, bowling);
    let mut current = m.start_innings(bowlers)?;
    // every legal ball or wicket moves the innings towards its end; the cap
    // only guards against a feed that bowls nothing but wides
    let balls = m.overs.saturating_mul(BALLS_PER_OVER) as usize;
    let cap = (balls + MAX_WICKETS as usize).saturating_mul(4);
    for _ in 0..cap {
        let Some(state) = current.live.as_ref() else { break };
        if state.is_over(&current.context()) {
            break;
        }
        let input = feed.next_delivery(rng, state);
        current = current.record(input)?;
    }
    let finished = current.complete_innings()?;
    if let Some(summary) = finished
        .innings
        .inning2
        .as_ref()
        .or(finished.innings.inning1.as_ref())
    {
        debug!(
            "{} finished on {}/{} ({} overs)",
            summary.batting_team.name,
            summary.runs,
            summary.wickets,
            summary.overs_display()
        );
    }
    Ok(finished)
}

/// Play every remaining innings of `m`.
pub fn play_match(
    m: &Match,
    feed: &mut dyn DeliveryFeed,
    rng: &mut SmallRng,
) -> Result<Match, ScoreError> {
    let mut current = m.clone();
    while current.status != MatchStatus::Completed {
        current = play_innings(&current, feed, rng)?;
    }
    Ok(current)
}

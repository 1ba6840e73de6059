//! Single-step undo of the most recent delivery.

use log::debug;

use super::common::ScoreError;
use super::config::BALLS_PER_OVER;
use super::innings::InningsState;

/// Remove the last delivery and roll the counters back.
///
/// Striker, non-striker and bowler positions are left where they are; after
/// undoing a wicket or an over-ending ball the scorer fixes them up with
/// [`InningsState::rotate_strike`] or [`InningsState::advance_bowler`].
pub fn undo(state: &InningsState) -> Result<InningsState, ScoreError> {
    let mut next = state.clone();
    let last = next.deliveries.pop().ok_or(ScoreError::NothingToUndo)?;

    next.runs = next.runs.saturating_sub(last.total_runs);
    next.extras = next.extras.saturating_sub(last.extra_runs);
    if last.is_wicket {
        next.wickets = next.wickets.saturating_sub(1);
    }

    let legal = next.deliveries.iter().filter(|d| d.is_legal()).count() as u32;
    next.current_over = legal / BALLS_PER_OVER;
    next.current_ball = legal % BALLS_PER_OVER;

    if last.is_no_ball {
        next.next_ball_is_free_hit = false;
    }

    debug!(
        "undid ball {} ({}), score now {}/{}",
        last.ball_number,
        last.code(),
        next.runs,
        next.wickets
    );
    Ok(next)
}

//! Delivery processing: one ball in, next innings state out.

use log::debug;

use super::common::{invalid, ScoreError};
use super::config::BALLS_PER_OVER;
use super::innings::{InningsState, MatchContext};
use super::model::{Delivery, DeliveryInput, WicketType};

/// Record one delivery, stamped with the current time.
pub fn apply(
    state: &InningsState,
    ctx: &MatchContext,
    input: DeliveryInput,
) -> Result<InningsState, ScoreError> {
    apply_at(state, ctx, input, chrono::Utc::now().timestamp_millis())
}

/// Record one delivery with an explicit timestamp (milliseconds since epoch).
///
/// All checks run before anything is changed; on error the caller keeps
/// `state` as it was.
pub fn apply_at(
    state: &InningsState,
    ctx: &MatchContext,
    input: DeliveryInput,
    timestamp: i64,
) -> Result<InningsState, ScoreError> {
    if let Some(end) = state.end(ctx) {
        return Err(ScoreError::InningsOver(end));
    }
    input.validate()?;
    if state.next_ball_is_free_hit
        && input.is_wicket
        && input.wicket_type != Some(WicketType::RunOut)
    {
        return Err(invalid("on free hit, only run out is allowed"));
    }
    let batsman_id = state
        .striker_id()
        .cloned()
        .ok_or_else(|| invalid("no batsman at the striker's position"))?;
    let bowler_id = state
        .bowler_id()
        .cloned()
        .ok_or_else(|| invalid("no bowler at the current bowling position"))?;

    let split = input.attribution();
    let mut next = state.clone();
    next.deliveries.push(Delivery {
        ball_number: state.deliveries.len() as u32 + 1,
        over: state.current_over,
        ball: state.current_ball,
        batsman_id: batsman_id.clone(),
        bowler_id,
        runs: split.batsman,
        total_runs: split.total,
        extra_runs: split.extra,
        is_wicket: input.is_wicket,
        wicket_type: input.wicket_type.filter(|_| input.is_wicket),
        dismissed_batsman_id: input.is_wicket.then_some(batsman_id),
        is_no_ball: input.is_no_ball,
        is_wide: input.is_wide,
        is_bye: input.is_bye,
        is_leg_bye: input.is_leg_bye,
        is_free_hit: state.next_ball_is_free_hit,
        timestamp,
    });
    next.runs += split.total;
    next.extras += split.extra;

    let mut rotate = false;
    if input.is_wicket {
        next.wickets += 1;
        if !next.is_all_out() {
            bring_in_next_batsman(&mut next);
        }
    } else if input.is_legal() && input.rotation_runs() % 2 == 1 {
        rotate = true;
    }

    if input.is_legal() {
        next.current_ball += 1;
        if next.current_ball == BALLS_PER_OVER {
            next.current_ball = 0;
            next.current_over += 1;
            // ends change at the close of every over
            rotate = true;
            next.next_bowler();
        }
    }

    if rotate {
        next.swap_ends();
    }

    if input.is_no_ball {
        next.next_ball_is_free_hit = true;
    } else if !input.is_wide {
        next.next_ball_is_free_hit = false;
    }

    debug!(
        "ball {} ({}.{}): {} -> {}/{}",
        next.deliveries.len(),
        state.current_over,
        state.current_ball,
        input_label(&input),
        next.runs,
        next.wickets
    );
    Ok(next)
}

/// Next unused batting position replaces the dismissed striker.
fn bring_in_next_batsman(state: &mut InningsState) {
    let next_idx = state.striker_idx.max(state.non_striker_idx) + 1;
    if next_idx < state.batting_team.batting_order.len() {
        state.striker_idx = next_idx;
    }
}

fn input_label(input: &DeliveryInput) -> String {
    let kind = if input.is_wide {
        "wide"
    } else if input.is_no_ball {
        "no-ball"
    } else if input.is_bye {
        "bye"
    } else if input.is_leg_bye {
        "leg-bye"
    } else {
        "runs"
    };
    match input.wicket_type.filter(|_| input.is_wicket) {
        Some(wt) => format!("{} {} + wicket ({})", kind, input.runs, wt),
        None => format!("{} {}", kind, input.runs),
    }
}

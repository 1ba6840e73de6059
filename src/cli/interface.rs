#![cfg(feature = "cli")]

//! Plain-text views of a match for the terminal.
//!
//! Every function returns the text instead of printing it so the same views
//! serve the one-shot subcommands, the interactive session and tests.

use std::fmt::Write;

use crate::core::{
    batting_stats, bowling_stats, BattingStats, BowlingStats, InningsCard, Match, MatchStatus,
    MatchSummary, Team,
};
use crate::storage::StoredMatch;

const RECENT_BALLS: usize = 12;

fn player_name<'a>(team: &'a Team, id: &'a str) -> &'a str {
    team.player(id).map_or(id, |p| p.name.as_str())
}

/// Live scoreboard for the innings in progress.
pub fn render_scoreboard(m: &Match) -> String {
    let mut out = String::new();
    let Some(state) = m.live.as_ref() else {
        let _ = writeln!(out, "{} v {}: no innings in progress", m.team1.name, m.team2.name);
        return out;
    };
    let ctx = m.context();
    let _ = writeln!(
        out,
        "{} {}/{} ({}.{} of {} overs)  Extras {}  CRR {:.2}",
        state.batting_team.name,
        state.runs,
        state.wickets,
        state.current_over,
        state.current_ball,
        m.overs,
        state.extras,
        state.run_rate()
    );
    if let (Some(target), Some(needed), Some(rrr)) = (
        ctx.target(),
        state.runs_required(&ctx),
        state.required_run_rate(&ctx),
    ) {
        let _ = writeln!(
            out,
            "Target {}: need {} from {} balls  RRR {:.2}",
            target,
            needed,
            state.balls_remaining(&ctx),
            rrr
        );
    }
    if state.next_ball_is_free_hit {
        let _ = writeln!(out, "FREE HIT");
    }

    let batting = batting_stats(state);
    for (idx, marker) in [(state.striker_idx, "*"), (state.non_striker_idx, " ")] {
        if let Some(line) = batting.get(idx) {
            let _ = writeln!(
                out,
                "{} {:<20} {:>3} ({})",
                marker,
                player_name(&state.batting_team, &line.player_id),
                line.runs,
                line.balls_faced
            );
        }
    }
    let bowling = bowling_stats(state);
    if let Some(line) = bowling.get(state.bowler_idx) {
        let _ = writeln!(
            out,
            "  {:<20} {}-{}-{}",
            player_name(&state.bowling_team, &line.player_id),
            line.overs_display(),
            line.runs_conceded,
            line.wickets
        );
    }

    let this_over: Vec<String> = state.this_over().map(|d| d.code()).collect();
    let (over_runs, over_wickets) = state.this_over_totals();
    let _ = writeln!(
        out,
        "This over: {} ({} runs, {} wkts)",
        this_over.join(" "),
        over_runs,
        over_wickets
    );
    let recent: Vec<String> = state.recent(RECENT_BALLS).iter().map(|d| d.code()).collect();
    let _ = writeln!(out, "Recent:    {}", recent.join(" "));
    if let Some(end) = m.live_end() {
        let _ = writeln!(out, "Innings over: {}", end);
    }
    out
}

/// Batting lines, one per player given.
pub fn render_batting_card(team: &Team, lines: &[BattingStats]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:<14} {:>4} {:>4} {:>3} {:>3} {:>7}", "Batsman", "", "R", "B", "4s", "6s", "SR");
    for line in lines {
        let _ = writeln!(
            out,
            "{:<20} {:<14} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            player_name(team, &line.player_id),
            line.dismissal_label(),
            line.runs,
            line.balls_faced,
            line.fours,
            line.sixes,
            line.strike_rate
        );
    }
    out
}

/// Bowling lines, one per player given.
pub fn render_bowling_card(team: &Team, lines: &[BowlingStats]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:>5} {:>4} {:>3} {:>6}", "Bowler", "O", "R", "W", "Econ");
    for line in lines {
        let _ = writeln!(
            out,
            "{:<20} {:>5} {:>4} {:>3} {:>6.2}",
            player_name(team, &line.player_id),
            line.overs_display(),
            line.runs_conceded,
            line.wickets,
            line.economy
        );
    }
    out
}

fn render_innings_card(card: &InningsCard, batting: &Team, bowling: &Team) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}/{} ({} overs, RR {:.2}, extras {})",
        card.batting_team, card.runs, card.wickets, card.overs, card.run_rate, card.extras
    );
    out.push_str(&render_batting_card(batting, &card.batting));
    out.push_str(&render_bowling_card(bowling, &card.bowling));
    if let Some(best) = card.best_batsman() {
        let _ = writeln!(out, "Top score: {} {}", player_name(batting, &best.player_id), best.runs);
    }
    if let Some(best) = card.best_bowler() {
        let _ = writeln!(
            out,
            "Best bowling: {} {}/{}",
            player_name(bowling, &best.player_id),
            best.wickets,
            best.runs_conceded
        );
    }
    out
}

/// Both innings, best performers and the result of a completed match.
pub fn render_summary(m: &Match) -> String {
    let Some(summary) = MatchSummary::from_match(m) else {
        return format!("{} is not completed yet\n", m.id);
    };
    let mut out = String::new();
    let _ = writeln!(out, "{} v {} ({:?}, {} overs)", m.team1.name, m.team2.name, m.match_type, m.overs);
    for (card, frozen) in [
        (&summary.first, m.innings.inning1.as_ref()),
        (&summary.second, m.innings.inning2.as_ref()),
    ] {
        if let Some(frozen) = frozen {
            out.push('\n');
            out.push_str(&render_innings_card(card, &frozen.batting_team, &frozen.bowling_team));
        }
    }
    let _ = writeln!(out, "\n{}", summary.result);
    out
}

/// Whatever is most useful for a match in its current phase.
pub fn render_match(m: &Match) -> String {
    if m.status == MatchStatus::Completed {
        return render_summary(m);
    }
    let mut out = String::new();
    if let Some(first) = m.innings.inning1.as_ref() {
        let _ = writeln!(
            out,
            "1st innings: {} {}/{} ({} overs)",
            first.batting_team.name,
            first.runs,
            first.wickets,
            first.overs_display()
        );
    }
    out.push_str(&render_scoreboard(m));
    out
}

/// One line per stored match.
pub fn render_match_list(matches: &[StoredMatch]) -> String {
    if matches.is_empty() {
        return "no saved matches\n".to_string();
    }
    let mut out = String::new();
    for m in matches {
        let when = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(m.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<22} {:<16} {} v {} ({:?}, {} overs, inning {}, {:?})",
            m.id, when, m.team1_name, m.team2_name, m.match_type, m.overs, m.current_inning, m.status
        );
    }
    out
}

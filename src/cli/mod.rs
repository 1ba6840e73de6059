//! Command-line front end
//!
//! - Delivery code and roster parsing for the subcommands
//! - `Session`: the line-oriented scoring session behind `scorebook play`
//! - Interface views re-exported from [`interface`]

#![cfg(feature = "cli")]

pub mod interface;

pub use interface::*;

use std::io::Write as _;

use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;

use crate::autosave::Autosaver;
use crate::core::{
    batting_stats, bowling_stats, DeliveryInput, Match, Player, PlayerId, ScoreError, Team,
    WicketType,
};
use crate::storage::MatchStore;

/// Players in a generated roster.
pub const DEFAULT_SQUAD_SIZE: u32 = 11;

/// Parse a compact delivery code such as `4`, `wd`, `nb2`, `lb1` or
/// `1 w:run-out`.
///
/// Tokens are separated by whitespace: a bare number is runs, `wd[N]`,
/// `nb[N]`, `b[N]` and `lb[N]` mark the ball type, and `w:<type>` records a
/// wicket. Byes and leg byes default to one run, everything else to none.
pub fn parse_delivery(code: &str) -> Result<DeliveryInput, ScoreError> {
    let mut input = DeliveryInput::dot();
    let mut runs: Option<u32> = None;
    let mut fallback = 0;
    let mut tokens = 0;
    for token in code.split_whitespace() {
        tokens += 1;
        let token = token.to_ascii_lowercase();
        if let Some(kind) = token.strip_prefix("w:") {
            if input.is_wicket {
                return Err(bad_code(code, "more than one wicket"));
            }
            input = input.with_wicket(kind.parse::<WicketType>()?);
            continue;
        }
        let (rest, default_runs) = if let Some(rest) = token.strip_prefix("wd") {
            input.is_wide = true;
            (rest, 0)
        } else if let Some(rest) = token.strip_prefix("nb") {
            input.is_no_ball = true;
            (rest, 0)
        } else if let Some(rest) = token.strip_prefix("lb") {
            input.is_leg_bye = true;
            (rest, 1)
        } else if let Some(rest) = token.strip_prefix('b') {
            input.is_bye = true;
            (rest, 1)
        } else {
            (token.as_str(), 0)
        };
        if rest.is_empty() {
            fallback = default_runs;
            continue;
        }
        let n = rest
            .parse::<u32>()
            .map_err(|_| bad_code(code, &format!("'{}' is not a number of runs", rest)))?;
        if runs.replace(n).is_some() {
            return Err(bad_code(code, "runs given twice"));
        }
    }
    if tokens == 0 {
        return Err(bad_code(code, "empty code"));
    }
    input.runs = runs.unwrap_or(fallback);
    input.validate()?;
    Ok(input)
}

fn bad_code(code: &str, reason: &str) -> ScoreError {
    ScoreError::InvalidDelivery(format!("cannot read '{}': {}", code.trim(), reason))
}

/// Map player ids or jersey numbers to ids on `team`.
pub fn resolve_players<S: AsRef<str>>(team: &Team, tokens: &[S]) -> Result<Vec<PlayerId>, ScoreError> {
    tokens
        .iter()
        .map(|t| {
            let t = t.as_ref().trim();
            let found = team.player(t).or_else(|| {
                t.parse::<u32>()
                    .ok()
                    .and_then(|n| team.players.iter().find(|p| p.jersey_number == n))
            });
            found.map(|p| p.id.clone()).ok_or_else(|| {
                ScoreError::IncompleteRoster(format!("{} has no player '{}'", team.name, t))
            })
        })
        .collect()
}

/// Roster of `DEFAULT_SQUAD_SIZE` numbered players.
pub fn default_roster(team_id: &str, team_name: &str) -> Vec<Player> {
    (1..=DEFAULT_SQUAD_SIZE)
        .map(|n| Player::new(format!("{}-{}", team_id, n), format!("{} {}", team_name, n), n))
        .collect()
}

/// Parse `Name:jersey,Name:jersey,...`; a missing jersey takes the
/// player's position in the list.
pub fn parse_roster(team_id: &str, list: &str) -> Result<Vec<Player>, ScoreError> {
    let players: Vec<Player> = list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(i, entry)| {
            let n = i as u32 + 1;
            let (name, jersey) = match entry.rsplit_once(':') {
                Some((name, jersey)) => {
                    let jersey = jersey.trim().parse::<u32>().map_err(|_| {
                        ScoreError::IncompleteRoster(format!("bad jersey number in '{}'", entry))
                    })?;
                    (name.trim(), jersey)
                }
                None => (entry, n),
            };
            if name.is_empty() {
                return Err(ScoreError::IncompleteRoster(format!("missing name in '{}'", entry)));
            }
            Ok(Player::new(format!("{}-{}", team_id, n), name, jersey))
        })
        .collect::<Result<_, _>>()?;
    Ok(players)
}

/// Team from an optional roster list, falling back to a generated squad.
pub fn build_team(team_id: &str, name: &str, roster: Option<&str>) -> Result<Team, ScoreError> {
    let players = match roster {
        Some(list) => parse_roster(team_id, list)?,
        None => default_roster(team_id, name),
    };
    Team::with_roster_order(team_id, name, players)
}

/// What a session line did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The match changed; the text is the view to show.
    Updated(String),
    /// Nothing changed; show the text.
    Info(String),
    Quit,
}

pub const SESSION_HELP: &str = "\
codes: 0-6  wd[N]  nb[N]  b[N]  lb[N]  add w:<type> for a wicket (e.g. '1 w:run-out')
commands: undo  rotate  bowler  stats  card  start <bowlers...>  end  help  quit";

/// Interactive scoring of one match, one line at a time.
pub struct Session {
    current: Match,
}

impl Session {
    pub fn new(m: Match) -> Self {
        Self { current: m }
    }

    pub fn current(&self) -> &Match {
        &self.current
    }

    pub fn into_match(self) -> Match {
        self.current
    }

    /// Apply one line. On error the match is left as it was.
    pub fn handle(&mut self, line: &str) -> Result<Outcome, ScoreError> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("").to_ascii_lowercase();
        let next = match command.as_str() {
            "" => return Ok(Outcome::Info(render_match(&self.current))),
            "quit" | "exit" | "q" => return Ok(Outcome::Quit),
            "help" | "?" => return Ok(Outcome::Info(SESSION_HELP.to_string())),
            "card" | "summary" => return Ok(Outcome::Info(render_match(&self.current))),
            "stats" => return self.stats().map(Outcome::Info),
            "undo" | "u" => self.current.undo()?,
            "rotate" | "swap" => self.current.rotate_strike()?,
            "bowler" | "next-bowler" => self.current.advance_bowler()?,
            "end" | "complete" => self.current.complete_innings()?,
            "start" => {
                let (_, bowling) = self.current.sides();
                let tokens: Vec<&str> = words.collect();
                let bowlers = if tokens.is_empty() {
                    crate::feed::tail_bowlers(bowling)
                } else {
                    resolve_players(bowling, tokens.as_slice())?
                };
                self.current.start_innings(bowlers)?
            }
            _ => self.current.record(parse_delivery(line)?)?,
        };
        self.current = next;
        Ok(Outcome::Updated(render_match(&self.current)))
    }

    fn stats(&self) -> Result<String, ScoreError> {
        let state = self
            .current
            .live
            .as_ref()
            .ok_or_else(|| ScoreError::InvalidState("no innings in progress".into()))?;
        let batting: Vec<_> = batting_stats(state)
            .into_iter()
            .filter(|b| b.has_batted())
            .collect();
        let bowling: Vec<_> = bowling_stats(state)
            .into_iter()
            .filter(|b| b.legal_balls > 0 || b.runs_conceded > 0)
            .collect();
        let mut out = render_batting_card(&state.batting_team, &batting);
        out.push_str(&render_bowling_card(&state.bowling_team, &bowling));
        Ok(out)
    }
}

/// Score `m` from stdin until `quit` or end of input, autosaving every change
/// into `store`. Returns the final match and the store.
pub async fn run_session(
    m: Match,
    store: MatchStore,
    autosave_delay: Duration,
) -> anyhow::Result<(Match, MatchStore)> {
    let autosaver = Autosaver::spawn(store, autosave_delay);
    let mut session = Session::new(m);
    println!("{}", render_match(session.current()));
    println!("{}", SESSION_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else { break };
        match session.handle(&line) {
            Ok(Outcome::Updated(view)) => {
                autosaver.submit(session.current());
                println!("{}", view);
            }
            Ok(Outcome::Info(text)) => println!("{}", text),
            Ok(Outcome::Quit) => break,
            Err(e) => println!("{}", e),
        }
    }

    let (store, writes) = autosaver.shutdown().await?;
    info!("session ended after {} autosaves", writes);
    Ok((session.into_match(), store))
}

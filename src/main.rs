#[cfg(not(feature = "cli"))]
fn main() {}

#[cfg(feature = "cli")]
use anyhow::{anyhow, bail, Context};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use scorebook::{
    build_team, feed::tail_bowlers, init_logging, match_result, parse_delivery, render_match,
    render_match_list, render_scoreboard, render_summary, resolve_players, run_session, Match,
    MatchStore, MatchType,
};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Ball-by-ball cricket scorer", long_about = None)]
#[cfg(feature = "cli")]
struct Cli {
    /// Match store file.
    #[arg(long, global = true, default_value = "matches.json")]
    store: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "cli")]
enum Commands {
    /// Set up a new match. The first team bats first.
    New {
        #[arg(long, default_value = "T20", help = "T20, ODI, TEST or CUSTOM")]
        match_type: MatchType,
        #[arg(long, help = "Overs per innings (required for CUSTOM)")]
        overs: Option<u32>,
        #[arg(long)]
        team1: String,
        #[arg(long)]
        team2: String,
        #[arg(long, help = "Roster as \"Name:jersey,Name:jersey,...\" in batting order")]
        team1_players: Option<String>,
        #[arg(long, help = "Roster as \"Name:jersey,Name:jersey,...\" in batting order")]
        team2_players: Option<String>,
    },
    /// List saved matches.
    List,
    /// Show the scoreboard or, once finished, the full scorecard.
    Show { id: String },
    /// Open the current innings with a bowling rotation (ids or jersey numbers).
    StartInnings {
        id: String,
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        bowlers: Vec<String>,
    },
    /// Record one delivery, e.g. `4`, `wd`, `nb 2`, `lb1`, `1 w:run-out`.
    Ball {
        id: String,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        code: Vec<String>,
    },
    /// Remove the last delivery.
    Undo { id: String },
    /// Swap striker and non-striker.
    Rotate { id: String },
    /// Hand the ball to the next bowler.
    NextBowler { id: String },
    /// Close the current innings.
    Complete { id: String },
    /// Print the result of a completed match.
    Result { id: String },
    /// Write every saved match as JSON to a file or stdout.
    Export { file: Option<PathBuf> },
    /// Replace every saved match with the contents of an export.
    Import { file: PathBuf },
    /// Delete one match.
    Delete { id: String },
    /// Delete every match.
    DeleteAll,
    /// Score a match interactively, saving as you go.
    Play {
        id: String,
        #[arg(long, default_value_t = 1000, help = "Idle milliseconds before an autosave")]
        autosave_ms: u64,
    },
}

#[cfg(feature = "cli")]
fn load(store: &MatchStore, id: &str) -> anyhow::Result<Match> {
    store
        .load_match(id)
        .ok_or_else(|| anyhow!("no match with id {} in {}", id, store_name(store)))
}

#[cfg(feature = "cli")]
fn store_name(store: &MatchStore) -> String {
    store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "memory".into())
}

/// Load, transform, save and show a match.
#[cfg(feature = "cli")]
fn update<F>(store: &mut MatchStore, id: &str, f: F) -> anyhow::Result<()>
where
    F: FnOnce(&Match) -> anyhow::Result<Match>,
{
    let current = load(store, id)?;
    let next = f(&current)?;
    store.save(&next)?;
    println!("{}", render_match(&next));
    Ok(())
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut store = MatchStore::open(&cli.store);

    match cli.command {
        Commands::New {
            match_type,
            overs,
            team1,
            team2,
            team1_players,
            team2_players,
        } => {
            let overs = match overs.or(match_type.default_overs()) {
                Some(n) => n,
                None => bail!("--overs is required for a {:?} match", match_type),
            };
            let t1 = build_team("team1", &team1, team1_players.as_deref())?;
            let t2 = build_team("team2", &team2, team2_players.as_deref())?;
            let m = Match::new(match_type, overs, t1, t2)?;
            let id = store.save(&m)?;
            println!("created match {}", id);
        }
        Commands::List => print!("{}", render_match_list(store.list())),
        Commands::Show { id } => print!("{}", render_match(&load(&store, &id)?)),
        Commands::StartInnings { id, bowlers } => update(&mut store, &id, |m| {
            let (_, bowling) = m.sides();
            let order = if bowlers.is_empty() {
                tail_bowlers(bowling)
            } else {
                resolve_players(bowling, bowlers.as_slice())?
            };
            Ok(m.start_innings(order)?)
        })?,
        Commands::Ball { id, code } => {
            let input = parse_delivery(&code.join(" "))?;
            let current = load(&store, &id)?;
            let next = current.record(input)?;
            store.save(&next)?;
            print!("{}", render_scoreboard(&next));
        }
        Commands::Undo { id } => update(&mut store, &id, |m| Ok(m.undo()?))?,
        Commands::Rotate { id } => update(&mut store, &id, |m| Ok(m.rotate_strike()?))?,
        Commands::NextBowler { id } => update(&mut store, &id, |m| Ok(m.advance_bowler()?))?,
        Commands::Complete { id } => update(&mut store, &id, |m| Ok(m.complete_innings()?))?,
        Commands::Result { id } => {
            let m = load(&store, &id)?;
            match match_result(&m) {
                Some(_) => print!("{}", render_summary(&m)),
                None => println!("{} is not completed yet", id),
            }
        }
        Commands::Export { file } => {
            let json = store.export()?;
            match file {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("exported {} matches to {}", store.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let count = store.import(&json)?;
            println!("imported {} matches", count);
        }
        Commands::Delete { id } => {
            if store.delete(&id)? {
                println!("deleted {}", id);
            } else {
                bail!("no match with id {}", id);
            }
        }
        Commands::DeleteAll => {
            store.delete_all()?;
            println!("deleted all matches");
        }
        Commands::Play { id, autosave_ms } => {
            let m = load(&store, &id)?;
            let (m, _store) = run_session(m, store, Duration::from_millis(autosave_ms)).await?;
            println!("left match {} ({:?})", m.id, m.status);
        }
    }
    Ok(())
}

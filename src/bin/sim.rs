use log::LevelFilter;
use rand::{rngs::SmallRng, SeedableRng};
use scorebook::{
    build_team, init_logging_with, match_result, play_innings, InningsSummary, Match,
    MatchResult, MatchType, RandomFeed,
};
use serde_json::json;

fn innings_json(summary: Option<&InningsSummary>) -> serde_json::Value {
    match summary {
        Some(s) => json!({
            "name": s.batting_team.name,
            "runs": s.runs,
            "wickets": s.wickets,
            "overs": s.overs_display(),
        }),
        None => serde_json::Value::Null,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging_with(LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    let usage = || format!("Usage: {} <seed1> <seed2> [--overs N]", args[0]);
    let (match_type, overs) = match args.len() {
        3 => (MatchType::T20, MatchType::T20.default_overs().unwrap_or(20)),
        5 if args[3] == "--overs" => (MatchType::Custom, args[4].parse()?),
        _ => {
            eprintln!("{}", usage());
            std::process::exit(1);
        }
    };
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    // each side bats against its own seeded feed
    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);
    let mut feed1 = RandomFeed::new();
    let mut feed2 = RandomFeed::new();

    let team1 = build_team("team1", "Team 1", None)?;
    let team2 = build_team("team2", "Team 2", None)?;
    let m = Match::new(match_type, overs, team1, team2)?;
    let m = play_innings(&m, &mut feed1, &mut rng1)?;
    let m = play_innings(&m, &mut feed2, &mut rng2)?;

    let (winner, margin) = match match_result(&m) {
        Some(MatchResult::Won { winner, margin, .. }) => (Some(winner), Some(margin.to_string())),
        _ => (None, None),
    };

    let result = json!({
        "team1": innings_json(m.innings.inning1.as_ref()),
        "team2": innings_json(m.innings.inning2.as_ref()),
        "winner": winner,
        "margin": margin,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

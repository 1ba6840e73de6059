use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use scorebook::{
    play_innings, DeliveryFeed, Match, MatchType, Player, RandomFeed, Team,
};

fn team(id: &str) -> Team {
    let players = (1..=11)
        .map(|n| Player::new(format!("{}{}", id, n), format!("{} {}", id, n), n))
        .collect();
    Team::with_roster_order(id, id.to_uppercase(), players).unwrap()
}

fn sample() -> Match {
    Match::new_at("m1", 42, MatchType::Custom, 5, team("a"), team("b")).unwrap()
}

/// A match part-way through its second innings.
fn mid_match(seed: u64, balls: usize) -> Match {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut feed = RandomFeed::new();
    let m = play_innings(&sample(), &mut feed, &mut rng).unwrap();
    let bowlers = feed.choose_bowlers(&mut rng, m.sides().1);
    let mut m = m.start_innings(bowlers).unwrap();
    for _ in 0..balls {
        let Some(state) = m.live.as_ref() else { break };
        if state.is_over(&m.context()) {
            break;
        }
        let input = feed.next_delivery(&mut rng, state);
        m = m.record_at(input, 7).unwrap();
    }
    m
}

proptest! {
    #[test]
    fn match_snapshot_roundtrip(seed in any::<u64>(), balls in 0usize..30) {
        let m = mid_match(seed, balls);
        let bytes = m.snapshot().unwrap();
        let restored = Match::restore(&bytes).unwrap();
        prop_assert_eq!(restored, m);
    }

    #[test]
    fn match_json_roundtrip(seed in any::<u64>(), balls in 0usize..30) {
        let m = mid_match(seed, balls);
        let json = serde_json::to_string(&m).unwrap();
        let decoded: Match = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, m);
    }
}

#[test]
fn json_uses_camel_case_names() {
    let m = sample().start_innings(vec!["b11".into()]).unwrap();
    let m = m.record_at(scorebook::DeliveryInput::no_ball(1), 9).unwrap();
    let v = serde_json::to_value(&m).unwrap();
    assert_eq!(v["matchType"], "CUSTOM");
    assert_eq!(v["currentInning"], 1);
    assert_eq!(v["status"], "in-progress");
    assert!(v["team1"]["battingOrder"].is_array());
    assert_eq!(v["team1"]["players"][0]["jerseyNumber"], 1);
    let d = &v["live"]["deliveries"][0];
    assert_eq!(d["isNoBall"], true);
    assert_eq!(d["totalRuns"], 2);
    assert_eq!(d["batsmanId"], "a1");
    assert_eq!(v["live"]["nextBallIsFreeHit"], true);
}

#[test]
fn older_records_without_optional_fields_still_load() {
    let m = sample();
    let mut v = serde_json::to_value(&m).unwrap();
    let obj = v.as_object_mut().unwrap();
    obj.remove("innings");
    obj.remove("live");
    let decoded: Match = serde_json::from_value(v).unwrap();
    assert_eq!(decoded, m);
}

#[test]
fn restore_rejects_garbage() {
    assert!(Match::restore(&[1, 2, 3]).is_err());
}

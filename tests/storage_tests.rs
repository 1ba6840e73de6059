use std::path::PathBuf;

use scorebook::{
    DeliveryInput, Match, MatchStatus, MatchStore, MatchType, Player, ScoreError, Team,
};

fn team(id: &str) -> Team {
    let players = (1..=11)
        .map(|n| Player::new(format!("{}{}", id, n), format!("{} {}", id, n), n))
        .collect();
    Team::with_roster_order(id, id.to_uppercase(), players).unwrap()
}

fn sample(id: &str) -> Match {
    Match::new_at(id, 1_700_000_000_000, MatchType::T20, 20, team("a"), team("b")).unwrap()
}

fn temp_store(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "scorebook-{}-{}.json",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn save_replaces_by_id() {
    let mut store = MatchStore::in_memory();
    let m = sample("m1");
    assert_eq!(store.save(&m).unwrap(), "m1");
    store.save(&sample("m2")).unwrap();

    let started = m.start_innings(vec!["b11".into()]).unwrap();
    store.save(&started).unwrap();
    assert_eq!(store.len(), 2);
    let loaded = store.load("m1").unwrap();
    assert_eq!(loaded.status, MatchStatus::InProgress);
    assert_eq!(loaded.team1_name, "A");
    assert_eq!(loaded.match_data, started);
    assert_eq!(store.list()[0].id, "m1");
    assert!(store.load("missing").is_none());
}

#[test]
fn delete_and_delete_all() {
    let mut store = MatchStore::in_memory();
    store.save(&sample("m1")).unwrap();
    store.save(&sample("m2")).unwrap();
    assert!(store.delete("m1").unwrap());
    assert!(!store.delete("m1").unwrap());
    assert_eq!(store.len(), 1);
    store.delete_all().unwrap();
    assert!(store.is_empty());
}

#[test]
fn file_store_persists_between_opens() {
    let path = temp_store("persist");
    {
        let mut store = MatchStore::open(&path);
        assert!(store.is_empty());
        let m = sample("m1").start_innings(vec!["b10".into()]).unwrap();
        let m = m.record_at(DeliveryInput::runs(4), 5).unwrap();
        store.save(&m).unwrap();
    }
    let store = MatchStore::open(&path);
    let m = store.load_match("m1").unwrap();
    assert_eq!(m.live.as_ref().map(|s| s.runs), Some(4));
    assert_eq!(m.live.as_ref().map(|s| s.deliveries[0].timestamp), Some(5));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_file_opens_empty() {
    let path = temp_store("corrupt");
    std::fs::write(&path, "{ not json").unwrap();
    let mut store = MatchStore::open(&path);
    assert!(store.is_empty());
    store.save(&sample("m1")).unwrap();
    assert_eq!(MatchStore::open(&path).len(), 1);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn export_import_round_trip() {
    let mut store = MatchStore::in_memory();
    store.save(&sample("m1")).unwrap();
    store.save(&sample("m2")).unwrap();
    let json = store.export().unwrap();
    assert!(json.contains("\"matchData\""));
    assert!(json.contains("\"team1Name\""));

    let mut other = MatchStore::in_memory();
    other.save(&sample("old")).unwrap();
    assert_eq!(other.import(&json).unwrap(), 2);
    assert!(other.load("old").is_none());
    assert_eq!(other.list(), store.list());
}

#[test]
fn import_rejects_non_arrays_and_keeps_store() {
    let mut store = MatchStore::in_memory();
    store.save(&sample("m1")).unwrap();
    for bad in ["{\"id\": \"x\"}", "not json", "[{\"id\": 3}]"] {
        let err = store.import(bad).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<ScoreError>(), Some(ScoreError::MalformedImport(_))),
            "{}",
            bad
        );
        assert_eq!(store.len(), 1);
        assert!(store.load("m1").is_some());
    }
}

#[test]
fn import_empty_array_clears_store() {
    let mut store = MatchStore::in_memory();
    store.save(&sample("m1")).unwrap();
    assert_eq!(store.import("[]").unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn failed_write_leaves_store_unchanged() {
    let dir = std::env::temp_dir().join(format!("scorebook-gone-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let mut store = MatchStore::open(dir.join("matches.json"));
    store.save(&sample("m1")).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert!(store.save(&sample("m2")).is_err());
    assert!(store.delete("m1").is_err());
    assert!(store.delete_all().is_err());
    let exported = store.export().unwrap();
    assert!(store.import(&exported).is_err());
    assert_eq!(store.len(), 1);
    assert!(store.load("m1").is_some());
    assert!(store.load("m2").is_none());
}

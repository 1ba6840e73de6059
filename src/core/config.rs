use super::model::WicketType;

pub const BALLS_PER_OVER: u32 = 6;
pub const MAX_WICKETS: u32 = 10;
pub const MAX_RUNS_PER_BALL: u32 = 6;
pub const NUM_INNINGS: u8 = 2;

/// Minimum batting order length needed to open an innings.
pub const MIN_BATTING_ORDER: usize = 2;

pub const T20_OVERS: u32 = 20;
pub const ODI_OVERS: u32 = 50;
/// Tests have no over limit; this is only a cap for scoring purposes.
pub const TEST_OVERS: u32 = 90;
/// Largest over count a match may be set up with.
pub const MAX_OVERS: u32 = 450;

pub const WICKET_TYPES: [WicketType; 8] = [
    WicketType::Caught,
    WicketType::Bowled,
    WicketType::Lbw,
    WicketType::RunOut,
    WicketType::Stumped,
    WicketType::HitWicket,
    WicketType::HandledBall,
    WicketType::Obstructing,
];

/// Look up a wicket type by its display name, ignoring case, spaces, `-` and `_`.
pub fn wicket_type_by_name(name: &str) -> Option<WicketType> {
    let wanted = normalize(name);
    WICKET_TYPES
        .iter()
        .copied()
        .find(|wt| normalize(wt.name()) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

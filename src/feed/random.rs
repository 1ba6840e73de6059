use rand::{rngs::SmallRng, Rng};

use super::DeliveryFeed;
use crate::core::{config::WICKET_TYPES, DeliveryInput, InningsState, WicketType};

/// Weighted random outcomes, roughly shaped like a limited-overs innings.
pub struct RandomFeed {
    /// Chance in 1000 that a ball takes a wicket.
    wicket_per_mille: u32,
}

impl RandomFeed {
    pub fn new() -> Self {
        Self {
            wicket_per_mille: 45,
        }
    }

    /// Feed with a custom wicket chance (per thousand balls).
    pub fn with_wicket_rate(wicket_per_mille: u32) -> Self {
        Self {
            wicket_per_mille: wicket_per_mille.min(1000),
        }
    }

    fn pick_wicket(rng: &mut SmallRng, free_hit: bool) -> WicketType {
        if free_hit {
            return WicketType::RunOut;
        }
        // bowled, caught and lbw dominate
        match rng.random_range(0..10) {
            0..=3 => WicketType::Caught,
            4..=5 => WicketType::Bowled,
            6..=7 => WicketType::Lbw,
            8 => WicketType::RunOut,
            _ => WICKET_TYPES[rng.random_range(0..WICKET_TYPES.len())],
        }
    }
}

impl Default for RandomFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryFeed for RandomFeed {
    fn next_delivery(&mut self, rng: &mut SmallRng, state: &InningsState) -> DeliveryInput {
        if rng.random_range(0..1000) < self.wicket_per_mille {
            let kind = Self::pick_wicket(rng, state.next_ball_is_free_hit);
            return DeliveryInput::wicket(kind);
        }
        match rng.random_range(0..100) {
            0..=34 => DeliveryInput::dot(),
            35..=64 => DeliveryInput::runs(1),
            65..=74 => DeliveryInput::runs(2),
            75..=76 => DeliveryInput::runs(3),
            77..=86 => DeliveryInput::runs(4),
            87..=90 => DeliveryInput::runs(6),
            91..=93 => DeliveryInput::wide(0),
            94 => DeliveryInput::wide(rng.random_range(1..=4)),
            95..=96 => DeliveryInput::no_ball(rng.random_range(0..=2)),
            97 => DeliveryInput::bye(rng.random_range(1..=2)),
            _ => DeliveryInput::leg_bye(rng.random_range(1..=2)),
        }
    }
}

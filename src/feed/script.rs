use std::collections::VecDeque;

use rand::rngs::SmallRng;

use super::{tail_bowlers, DeliveryFeed};
use crate::core::{DeliveryInput, InningsState, PlayerId, Team};

/// Replays a fixed list of deliveries, then bowls dot balls.
pub struct ScriptFeed {
    balls: VecDeque<DeliveryInput>,
    bowlers: Option<Vec<PlayerId>>,
}

impl ScriptFeed {
    pub fn new(balls: impl IntoIterator<Item = DeliveryInput>) -> Self {
        Self {
            balls: balls.into_iter().collect(),
            bowlers: None,
        }
    }

    /// Use those of `bowlers` on the fielding side as its rotation.
    pub fn with_bowlers(mut self, bowlers: Vec<PlayerId>) -> Self {
        self.bowlers = Some(bowlers);
        self
    }

    pub fn remaining(&self) -> usize {
        self.balls.len()
    }
}

impl DeliveryFeed for ScriptFeed {
    fn choose_bowlers(&mut self, _rng: &mut SmallRng, bowling: &Team) -> Vec<PlayerId> {
        match &self.bowlers {
            Some(list) => {
                let picked: Vec<PlayerId> = list
                    .iter()
                    .filter(|id| bowling.player(id).is_some())
                    .cloned()
                    .collect();
                if picked.is_empty() {
                    tail_bowlers(bowling)
                } else {
                    picked
                }
            }
            None => tail_bowlers(bowling),
        }
    }

    fn next_delivery(&mut self, _rng: &mut SmallRng, _state: &InningsState) -> DeliveryInput {
        self.balls.pop_front().unwrap_or_default()
    }
}

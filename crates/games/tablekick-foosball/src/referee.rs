use serde::{Deserialize, Serialize};

use tablekick_core::events::MatchResult;

use crate::clock::Clock;

/// Watches the clock and calls the match exactly once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Referee {
    result: Option<MatchResult>,
}

impl Referee {
    /// Poll once per frame. Returns the result on the frame the clock runs
    /// out; every other call returns `None`.
    pub fn observe(&mut self, clock: &Clock, left_score: u32, right_score: u32) -> Option<MatchResult> {
        if self.result.is_some() || !clock.is_expired() {
            return None;
        }
        let result = MatchResult::from_scores(left_score, right_score);
        self.result = Some(result);
        Some(result)
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }
}

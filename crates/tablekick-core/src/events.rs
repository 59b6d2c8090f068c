use serde::{Deserialize, Serialize};

use crate::side::Side;

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    LeftTeam,
    RightTeam,
    Tie,
}

impl Winner {
    /// Compare two scores; equality is a tie.
    pub fn from_scores(left_score: u32, right_score: u32) -> Winner {
        match left_score.cmp(&right_score) {
            std::cmp::Ordering::Greater => Winner::LeftTeam,
            std::cmp::Ordering::Less => Winner::RightTeam,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

/// Final result carried from the match scene to the result scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Winner,
    pub left_score: u32,
    pub right_score: u32,
}

impl MatchResult {
    pub fn from_scores(left_score: u32, right_score: u32) -> Self {
        Self {
            winner: Winner::from_scores(left_score, right_score),
            left_score,
            right_score,
        }
    }
}

/// Why the ball went back to the centre spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    Goal,
    OutOfBounds,
}

/// Events emitted by the match during update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// `scorer` is the team that gets the point (the goal it shot into belongs to the opponent).
    GoalScored {
        scorer: Side,
        left_score: u32,
        right_score: u32,
    },
    BallReset {
        reason: ResetReason,
    },
    BallHit {
        speed: f32,
    },
    LineSwitched {
        side: Side,
        index: usize,
    },
    MatchComplete(MatchResult),
}

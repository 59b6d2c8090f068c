use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::events::{MatchEvent, MatchResult};
use crate::setup::MatchSetup;
use crate::side::{ControlType, Side};

/// Core trait implemented by the table football simulation.
///
/// The front end (or the headless runner) owns the frame loop and feeds
/// per-side input; the game only handles the match rules.
pub trait FoosballGame: Send + Sync {
    /// Game metadata for the menu screen.
    fn metadata(&self) -> GameMetadata;

    /// Called once when both teams are configured and the match scene loads.
    fn init(&mut self, setup: &MatchSetup);

    /// Called each frame. Returns the events raised during the frame.
    fn update(&mut self, dt: f32) -> Vec<MatchEvent>;

    /// Serialize the authoritative match state.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the match state with a previously serialized snapshot.
    fn apply_state(&mut self, state: &[u8]);

    /// Apply encoded input for the team playing on `side`.
    fn apply_input(&mut self, side: Side, input: &[u8]);

    /// Hand a team over to a human or to the computer.
    fn set_control_type(&mut self, side: Side, control: ControlType);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Freeze the match (menus, focus loss).
    fn pause(&mut self);

    /// Unfreeze the match.
    fn resume(&mut self);

    /// Whether the referee has called the match.
    fn is_match_complete(&self) -> bool;

    /// Final result, once the match is complete.
    fn match_result(&self) -> Option<MatchResult>;
}

/// Game metadata for the menu screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub lines_per_team: u8,
    pub estimated_match_duration: Duration,
}

use serde::Serialize;

use tablekick_core::events::{MatchEvent, MatchResult, ResetReason};
use tablekick_core::game_trait::FoosballGame;
use tablekick_core::scene::{MatchSession, Scene};
use tablekick_core::side::Side;

use crate::config::SimConfig;

/// One goal as it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalRecord {
    pub tick: u64,
    pub scorer: Side,
    pub left_score: u32,
    pub right_score: u32,
}

/// Summary of a simulated match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub ticks: u64,
    pub goals: Vec<GoalRecord>,
    pub ball_hits: u32,
    pub line_switches: u32,
    pub out_of_bounds_resets: u32,
    /// `None` when `max_ticks` ran out first.
    pub result: Option<MatchResult>,
}

/// Start `session`'s match scene, initialise `game` from the session's
/// setup and step both at the configured tick rate until the match
/// completes or `max_ticks` frames have run. A decided result is stored in
/// the session.
pub fn run_match(
    game: &mut dyn FoosballGame,
    session: &mut MatchSession,
    sim: &SimConfig,
) -> SimReport {
    if session.scene() != Scene::Match {
        session.start_setup();
        session.start_match();
    }
    game.init(&session.setup);
    let dt = sim.dt();
    let mut report = SimReport {
        ticks: 0,
        goals: Vec::new(),
        ball_hits: 0,
        line_switches: 0,
        out_of_bounds_resets: 0,
        result: None,
    };

    while report.ticks < sim.max_ticks && !game.is_match_complete() {
        let tick = report.ticks;
        for event in game.update(dt) {
            match event {
                MatchEvent::GoalScored {
                    scorer,
                    left_score,
                    right_score,
                } => report.goals.push(GoalRecord {
                    tick,
                    scorer,
                    left_score,
                    right_score,
                }),
                MatchEvent::BallHit { .. } => report.ball_hits += 1,
                MatchEvent::LineSwitched { .. } => report.line_switches += 1,
                MatchEvent::BallReset {
                    reason: ResetReason::OutOfBounds,
                } => report.out_of_bounds_resets += 1,
                MatchEvent::BallReset { .. } => {},
                MatchEvent::MatchComplete(result) => report.result = Some(result),
            }
        }
        session.tick(dt);
        report.ticks += 1;
    }

    if report.result.is_none() {
        report.result = game.match_result();
    }
    match report.result {
        Some(result) => {
            session.finish_match(result);
        },
        None => tracing::warn!(ticks = report.ticks, "Tick limit reached before full time"),
    }
    report
}

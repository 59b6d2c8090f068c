use tablekick_core::game_trait::FoosballGame;
use tablekick_core::scene::MatchSession;
use tablekick_foosball::FoosballMatch;
use tablekick_foosball::config::{ClockConfig, FoosballConfig};
use tablekick_foosball::clock::ClockMode;
use tablekick_sim::{SimConfig, SimReport, run_match};

/// Seeded rules with a countdown of `secs` seconds.
pub fn countdown_rules(seed: u64, secs: f32) -> FoosballConfig {
    FoosballConfig {
        seed: Some(seed),
        clock: ClockConfig {
            mode: ClockMode::CountDown,
            duration_secs: secs,
            count_up_limit_secs: None,
        },
        ..FoosballConfig::default()
    }
}

/// Seeded rules with a count-up clock stopping at `limit`.
pub fn count_up_rules(seed: u64, limit: Option<f32>) -> FoosballConfig {
    FoosballConfig {
        seed: Some(seed),
        clock: ClockConfig {
            mode: ClockMode::CountUp,
            duration_secs: 0.0,
            count_up_limit_secs: limit,
        },
        ..FoosballConfig::default()
    }
}

pub fn game(rules: FoosballConfig) -> FoosballMatch {
    FoosballMatch::with_config(rules)
}

/// Run a match in a fresh session built from the runner's own setup.
pub fn run(game: &mut dyn FoosballGame, sim: &SimConfig) -> SimReport {
    let mut session = MatchSession::new(sim.setup());
    run_match(game, &mut session, sim)
}

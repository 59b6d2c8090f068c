//! End-to-end runs of the headless runner: config in, report out.

#[allow(dead_code)]
mod common;

use tablekick_core::events::Winner;
use tablekick_core::game_trait::FoosballGame;
use tablekick_core::scene::{MatchSession, Scene};
use tablekick_core::side::{ControlType, Side};
use tablekick_sim::{SimConfig, run_match};

use common::{count_up_rules, countdown_rules, game, run};

#[test]
fn computer_match_runs_to_full_time() {
    let mut g = game(countdown_rules(11, 45.0));
    let report = run(&mut g, &SimConfig::default());

    let result = report.result.expect("countdown match must finish");
    assert!(g.is_match_complete());
    assert_eq!(g.match_result(), Some(result));
    assert_eq!(
        result.left_score + result.right_score,
        report.goals.len() as u32
    );
    assert!(report.ball_hits > 0, "ball never touched anything");
    assert!(report.line_switches > 0, "computer never switched lines");
}

#[test]
fn goal_records_are_cumulative() {
    let mut g = game(countdown_rules(23, 120.0));
    let report = run(&mut g, &SimConfig::default());

    let (mut left, mut right) = (0, 0);
    for goal in &report.goals {
        match goal.scorer {
            Side::Left => left += 1,
            Side::Right => right += 1,
        }
        assert_eq!((goal.left_score, goal.right_score), (left, right));
    }
    let result = report.result.expect("countdown match must finish");
    assert_eq!((result.left_score, result.right_score), (left, right));
    assert_eq!(result.winner, Winner::from_scores(left, right));
}

#[test]
fn same_seed_same_report() {
    let sim = SimConfig::default();
    let a = run(&mut game(countdown_rules(7, 30.0)), &sim);
    let b = run(&mut game(countdown_rules(7, 30.0)), &sim);
    assert_eq!(a, b);
}

#[test]
fn idle_human_team_still_finishes() {
    let sim = SimConfig {
        left: ControlType::Human,
        ..SimConfig::default()
    };
    let mut g = game(countdown_rules(5, 15.0));
    let report = run(&mut g, &sim);
    assert!(report.result.is_some());
    assert!(report.ticks <= 15 * 60 + 1);
}

#[test]
fn unlimited_count_up_hits_tick_limit() {
    let sim = SimConfig {
        max_ticks: 300,
        ..SimConfig::default()
    };
    let mut g = game(count_up_rules(5, None));
    let report = run(&mut g, &sim);
    assert_eq!(report.ticks, 300);
    assert!(report.result.is_none());
    assert!(!g.is_match_complete());
}

#[test]
fn count_up_limit_ends_match() {
    let mut g = game(count_up_rules(5, Some(10.0)));
    let report = run(&mut g, &SimConfig::default());
    assert!(report.result.is_some());
    assert!(report.ticks >= 10 * 60);
}

#[test]
fn session_records_runner_result() {
    let sim = SimConfig::default();
    let mut session = MatchSession::new(sim.setup());
    assert_eq!(session.scene(), Scene::MainMenu);

    let report = run_match(&mut game(countdown_rules(9, 10.0)), &mut session, &sim);
    let result = report.result.expect("countdown match must finish");
    assert_eq!(session.scene(), Scene::Result);
    assert_eq!(session.last_result(), Some(result));
}

#[test]
fn rematch_from_result_scene() {
    let sim = SimConfig::default();
    let mut session = MatchSession::new(sim.setup());
    run_match(&mut game(countdown_rules(9, 5.0)), &mut session, &sim);
    let first = session.last_result();

    let report = run_match(&mut game(countdown_rules(10, 5.0)), &mut session, &sim);
    assert_eq!(session.scene(), Scene::Result);
    assert_eq!(session.last_result(), report.result);
    assert!(first.is_some());
}

#[test]
fn report_serializes_to_json() {
    let report = run(&mut game(countdown_rules(1, 5.0)), &SimConfig::default());
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["ticks"], report.ticks);
    assert!(json["goals"].is_array());
    assert!(json["result"]["winner"].is_string());
}

#[test]
fn runner_config_names_rules_file() {
    let dir = std::env::temp_dir().join(format!("tablekick-sim-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let rules = dir.join("foosball.toml");
    std::fs::write(&rules, "seed = 4\n[clock]\nduration_secs = 12.0\n").unwrap();

    let sim = SimConfig::from_toml_str(&format!(
        "tick_rate = 30.0\nfoosball_config = {:?}\n",
        rules.display().to_string()
    ))
    .unwrap();
    let loaded = sim.foosball().unwrap();
    assert_eq!(loaded.seed, Some(4));
    assert_eq!(loaded.clock.duration_secs, 12.0);

    let report = run(&mut game(loaded), &sim);
    assert!(report.result.is_some());
    assert!(report.ticks <= 12 * 30 + 1);

    std::fs::remove_dir_all(&dir).unwrap();
}

use tracing_subscriber::EnvFilter;

use tablekick_core::scene::MatchSession;
use tablekick_foosball::FoosballMatch;
use tablekick_sim::{SimConfig, run_match};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let sim = SimConfig::load();
    let rules = match sim.foosball() {
        Ok(rules) => rules,
        Err(e) => {
            tracing::error!(error = %e, "Cannot load match rules");
            std::process::exit(1);
        },
    };
    tracing::info!(
        tick_rate = sim.tick_rate,
        left = ?sim.left,
        right = ?sim.right,
        "Tablekick simulation starting"
    );

    let mut session = MatchSession::new(sim.setup());
    let mut game = FoosballMatch::with_config(rules);
    let report = run_match(&mut game, &mut session, &sim);
    tracing::info!(scene = session.scene().name(), "Simulation finished");

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Cannot encode report");
            std::process::exit(1);
        },
    }
}

pub mod config;
pub mod runner;

pub use config::SimConfig;
pub use runner::{GoalRecord, SimReport, run_match};

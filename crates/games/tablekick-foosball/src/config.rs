use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::ClockMode;
use crate::error::ConfigError;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "TABLEKICK_FOOSBALL_CONFIG";
/// Config file looked up relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/foosball.toml";

/// Data-driven configuration for a foosball match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FoosballConfig {
    /// RNG seed. `None` draws a fresh seed per match.
    pub seed: Option<u64>,
    pub field: FieldConfig,
    pub ball: BallConfig,
    pub lines: LinesConfig,
    pub human: HumanConfig,
    pub ai: AiConfig,
    pub switch_ai: SwitchAiConfig,
    pub clock: ClockConfig,
}

/// Table dimensions. The field is centred on the origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub half_width: f32,
    pub half_height: f32,
    /// Thickness of the boundary markers around the playing area.
    pub wall_thickness: f32,
    /// Half the height of the goal mouth at each end.
    pub goal_half_height: f32,
    /// How far the goal trigger extends behind the end line.
    pub goal_depth: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            half_width: 10.0,
            half_height: 6.0,
            wall_thickness: 0.5,
            goal_half_height: 2.0,
            goal_depth: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub half_size: f32,
    /// Speed after every reset (units/s).
    pub initial_speed: f32,
    /// Speed gained on every collision.
    pub speed_increment: f32,
    pub max_speed: f32,
    /// Minimum magnitude of each direction component after a reset.
    pub direction_min: f32,
    /// Maximum magnitude of each direction component after a reset.
    pub direction_max: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            half_size: 0.25,
            initial_speed: 6.0,
            speed_increment: 0.5,
            max_speed: 18.0,
            direction_min: 0.3,
            direction_max: 1.0,
        }
    }
}

/// One rod of players: its fixed x position and each player's y offset
/// from the rod centre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineLayout {
    pub x: f32,
    pub player_offsets: Vec<f32>,
}

impl LineLayout {
    pub fn new(x: f32, player_offsets: &[f32]) -> Self {
        Self {
            x,
            player_offsets: player_offsets.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinesConfig {
    pub player_half_width: f32,
    pub player_half_height: f32,
    pub left: Vec<LineLayout>,
    pub right: Vec<LineLayout>,
    /// Index (in x order) of the line that starts with control.
    pub initial_active_line: usize,
}

impl Default for LinesConfig {
    fn default() -> Self {
        // Classic 1-2-5-3 table with interleaved rods.
        Self {
            player_half_width: 0.2,
            player_half_height: 0.4,
            left: vec![
                LineLayout::new(-9.0, &[0.0]),
                LineLayout::new(-6.5, &[-2.0, 2.0]),
                LineLayout::new(-1.5, &[-4.0, -2.0, 0.0, 2.0, 4.0]),
                LineLayout::new(4.0, &[-3.0, 0.0, 3.0]),
            ],
            right: vec![
                LineLayout::new(-4.0, &[-3.0, 0.0, 3.0]),
                LineLayout::new(1.5, &[-4.0, -2.0, 0.0, 2.0, 4.0]),
                LineLayout::new(6.5, &[-2.0, 2.0]),
                LineLayout::new(9.0, &[0.0]),
            ],
            initial_active_line: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanConfig {
    /// Line speed at full axis deflection (units/s).
    pub speed: f32,
}

impl Default for HumanConfig {
    fn default() -> Self {
        Self { speed: 8.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub min_speed: f32,
    pub max_speed: f32,
    /// Lines ignore the ball beyond this 2D distance.
    pub max_engage_distance: f32,
    /// Lines hold still when vertically this close to the ball.
    pub min_distance: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            min_speed: 3.0,
            max_speed: 6.0,
            max_engage_distance: 8.0,
            min_distance: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchAiConfig {
    /// Minimum seconds between two switch decisions.
    pub interval: f32,
    /// Rolls in [0, 100) below this may switch towards the left.
    pub low_threshold: u32,
    /// Rolls in [0, 100) above this may switch towards the right.
    pub high_threshold: u32,
}

impl Default for SwitchAiConfig {
    fn default() -> Self {
        Self {
            interval: 0.5,
            low_threshold: 20,
            high_threshold: 80,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub mode: ClockMode,
    /// Match length when counting down; ignored when counting up.
    pub duration_secs: f32,
    /// Match length when counting up; `None` plays until stopped externally.
    pub count_up_limit_secs: Option<f32>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            mode: ClockMode::CountDown,
            duration_secs: 180.0,
            count_up_limit_secs: None,
        }
    }
}

impl FoosballConfig {
    /// Load config from the environment-named file or `config/foosball.toml`,
    /// falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path, error = %e, "Ignoring foosball config"),
            }
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            match Self::load_from(DEFAULT_CONFIG_PATH) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = DEFAULT_CONFIG_PATH, error = %e, "Ignoring foosball config")
                },
            }
        }
        Self::default()
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML accepts `nan` and `inf`; none of the numbers here may take them.
    fn check_finite(&self) -> Result<(), ConfigError> {
        let (f, b, l, ai) = (&self.field, &self.ball, &self.lines, &self.ai);
        let named = [
            ("field.half_width", f.half_width),
            ("field.half_height", f.half_height),
            ("field.wall_thickness", f.wall_thickness),
            ("field.goal_half_height", f.goal_half_height),
            ("field.goal_depth", f.goal_depth),
            ("ball.half_size", b.half_size),
            ("ball.initial_speed", b.initial_speed),
            ("ball.speed_increment", b.speed_increment),
            ("ball.max_speed", b.max_speed),
            ("ball.direction_min", b.direction_min),
            ("ball.direction_max", b.direction_max),
            ("lines.player_half_width", l.player_half_width),
            ("lines.player_half_height", l.player_half_height),
            ("human.speed", self.human.speed),
            ("ai.min_speed", ai.min_speed),
            ("ai.max_speed", ai.max_speed),
            ("ai.max_engage_distance", ai.max_engage_distance),
            ("ai.min_distance", ai.min_distance),
            ("switch_ai.interval", self.switch_ai.interval),
            ("clock.duration_secs", self.clock.duration_secs),
            (
                "clock.count_up_limit_secs",
                self.clock.count_up_limit_secs.unwrap_or(0.0),
            ),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be a finite number")));
        }
        let layout_values = l
            .left
            .iter()
            .chain(&l.right)
            .flat_map(|layout| std::iter::once(layout.x).chain(layout.player_offsets.iter().copied()));
        for v in layout_values {
            if !v.is_finite() {
                return Err(ConfigError::Invalid(
                    "line positions and player offsets must be finite numbers".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |m: &str| -> Result<(), ConfigError> { Err(ConfigError::Invalid(m.to_string())) };

        self.check_finite()?;

        let f = &self.field;
        if f.half_width <= 0.0 || f.half_height <= 0.0 || f.wall_thickness <= 0.0 {
            return invalid("field dimensions must be positive");
        }
        if f.goal_half_height <= 0.0 || f.goal_half_height > f.half_height {
            return invalid("goal_half_height must be in (0, field.half_height]");
        }
        if f.goal_depth <= 0.0 {
            return invalid("goal_depth must be positive");
        }

        let b = &self.ball;
        if b.half_size <= 0.0 || b.half_size >= f.goal_half_height {
            return invalid("ball.half_size must be positive and fit through the goal mouth");
        }
        if b.initial_speed < 0.0 || b.speed_increment < 0.0 || b.max_speed < b.initial_speed {
            return invalid("ball speeds must satisfy 0 <= initial_speed <= max_speed");
        }
        if b.direction_min <= 0.0 || b.direction_min > b.direction_max {
            return invalid("ball direction range must satisfy 0 < direction_min <= direction_max");
        }

        let l = &self.lines;
        if l.player_half_width <= 0.0 || l.player_half_height <= 0.0 {
            return invalid("player extents must be positive");
        }
        for (name, layouts) in [("left", &l.left), ("right", &l.right)] {
            if layouts.is_empty() {
                return Err(ConfigError::Invalid(format!("{name} team needs at least one line")));
            }
            for layout in layouts {
                if layout.player_offsets.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "{name} line at x={} has no players",
                        layout.x
                    )));
                }
                if layout.x.abs() >= f.half_width {
                    return Err(ConfigError::Invalid(format!(
                        "{name} line at x={} lies outside the field",
                        layout.x
                    )));
                }
            }
        }

        if self.human.speed < 0.0 {
            return invalid("human.speed must not be negative");
        }
        let ai = &self.ai;
        if ai.min_speed < 0.0 || ai.min_speed > ai.max_speed {
            return invalid("ai speeds must satisfy 0 <= min_speed <= max_speed");
        }
        if ai.max_engage_distance < 0.0 || ai.min_distance < 0.0 {
            return invalid("ai distances must not be negative");
        }

        let s = &self.switch_ai;
        if s.interval < 0.0 || s.low_threshold > 100 || s.high_threshold > 100 {
            return invalid("switch_ai thresholds must be in 0..=100 and interval non-negative");
        }

        if self.clock.mode == ClockMode::CountDown && self.clock.duration_secs < 0.0 {
            return invalid("clock.duration_secs must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        FoosballConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = FoosballConfig::from_toml_str(
            r#"
            seed = 7

            [ball]
            max_speed = 30.0

            [clock]
            mode = "count_up"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ball.max_speed, 30.0);
        assert_eq!(config.ball.initial_speed, BallConfig::default().initial_speed);
        assert_eq!(config.clock.mode, ClockMode::CountUp);
        assert_eq!(config.lines.left.len(), 4);
    }

    #[test]
    fn custom_lines_from_toml() {
        let config = FoosballConfig::from_toml_str(
            r#"
            [lines]
            left = [{ x = -5.0, player_offsets = [0.0] }]
            right = [{ x = 5.0, player_offsets = [-1.0, 1.0] }]
            initial_active_line = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.lines.right[0], LineLayout::new(5.0, &[-1.0, 1.0]));
    }

    #[test]
    fn rejects_empty_team() {
        let err = FoosballConfig::from_toml_str("[lines]\nleft = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut config = FoosballConfig::default();
        config.ai.min_speed = 10.0;
        assert!(config.validate().is_err());

        let mut config = FoosballConfig::default();
        config.ball.direction_min = 2.0;
        assert!(config.validate().is_err());

        let mut config = FoosballConfig::default();
        config.switch_ai.high_threshold = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nan_from_toml() {
        let err = FoosballConfig::from_toml_str("[ball]\ndirection_min = nan\n").unwrap_err();
        assert!(err.to_string().contains("ball.direction_min"), "got {err}");

        let err = FoosballConfig::from_toml_str("[ai]\nmin_speed = nan\n").unwrap_err();
        assert!(err.to_string().contains("ai.min_speed"), "got {err}");
    }

    #[test]
    fn rejects_infinite_values() {
        let mut config = FoosballConfig::default();
        config.ai.max_speed = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = FoosballConfig::default();
        config.clock.count_up_limit_secs = Some(f32::NAN);
        assert!(config.validate().is_err());

        let mut config = FoosballConfig::default();
        config.lines.right[1].player_offsets[0] = f32::NEG_INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_error_is_reported() {
        let err = FoosballConfig::from_toml_str("ball = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FoosballConfig::load_from("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}

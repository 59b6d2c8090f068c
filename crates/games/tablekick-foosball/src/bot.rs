use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{AiConfig, SwitchAiConfig};
use crate::field::PlayField;
use crate::geometry::Vec3;
use crate::line::FieldPlayerLine;
use crate::team::FieldTeam;

/// Move a computer-controlled line towards the ball. Returns the distance
/// travelled (0 when the line held still).
///
/// Lines far from the ball stay inert, and lines already level with the
/// ball do not twitch. The speed is re-sampled every step.
pub fn computer_step<R: Rng + ?Sized>(
    line: &mut FieldPlayerLine,
    ball: Vec3,
    config: &AiConfig,
    rng: &mut R,
    dt: f32,
    field: &PlayField,
) -> f32 {
    let position = line.position();
    if ball.distance_2d(position) > config.max_engage_distance {
        return 0.0;
    }
    let dy = ball.y - position.y;
    if dy.abs() < config.min_distance {
        return 0.0;
    }
    let direction = if dy > 0.0 {
        1.0
    } else if dy < 0.0 {
        -1.0
    } else {
        0.0
    };
    let speed = if config.min_speed < config.max_speed {
        rng.random_range(config.min_speed..=config.max_speed)
    } else {
        config.min_speed
    };
    line.move_by(direction * speed * dt, field)
}

/// Decide which line a computer team controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LineSwitchAi {
    /// Seconds until the next decision may be made.
    pub cooldown: f32,
}

impl LineSwitchAi {
    /// Time-gated switch decision. Returns the new active index if the team
    /// switched lines.
    pub fn maybe_switch<R: Rng + ?Sized>(
        &mut self,
        team: &mut FieldTeam,
        ball_x: f32,
        config: &SwitchAiConfig,
        rng: &mut R,
        dt: f32,
    ) -> Option<usize> {
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = config.interval;
        let roll = rng.random_range(0..100u32);
        decide_switch(team, ball_x, roll, config)
    }
}

/// Apply one roll in [0, 100) to the team.
///
/// A low roll switches left when the ball is left of the active line; a
/// high roll switches right when the ball is right of it. The two checks
/// are independent and both use the line position from before the roll.
pub fn decide_switch(
    team: &mut FieldTeam,
    ball_x: f32,
    roll: u32,
    config: &SwitchAiConfig,
) -> Option<usize> {
    let line_x = team.active_line()?.x;
    let mut switched = false;
    if roll < config.low_threshold && ball_x < line_x {
        switched |= team.switch_left();
    }
    if roll > config.high_threshold && ball_x > line_x {
        switched |= team.switch_right();
    }
    switched.then(|| team.active_index())
}

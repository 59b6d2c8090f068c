use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::BallConfig;
use crate::geometry::{Aabb, Vec3};

/// State of the match ball.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BallState {
    pub position: Vec3,
    /// Travel direction on the table plane; `z` is always 0.
    pub direction: Vec3,
    pub speed: f32,
    pub half_size: f32,
}

impl BallState {
    /// A ball at `center` with a fresh random direction.
    pub fn new<R: Rng + ?Sized>(center: Vec3, rng: &mut R, config: &BallConfig) -> Self {
        let mut ball = Self {
            position: center,
            direction: Vec3::ZERO,
            speed: config.initial_speed,
            half_size: config.half_size,
        };
        ball.reset(center, rng, config);
        ball
    }

    /// Move along the current direction for `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.direction.z = 0.0;
        self.position = self.position.add(self.direction.scale(self.speed * dt));
        self.position.z = 0.0;
    }

    /// Respond to a collision.
    ///
    /// Only the first contact normal is used for the reflection, which is an
    /// approximation for multi-point contacts. Returns false for an empty
    /// contact list, which leaves the ball untouched.
    pub fn on_collision(&mut self, contact_normals: &[Vec3], config: &BallConfig) -> bool {
        let Some(&normal) = contact_normals.first() else {
            return false;
        };
        self.direction = self.direction.reflect(normal);
        self.direction.z = 0.0;
        self.speed = (self.speed + config.speed_increment).clamp(0.0, config.max_speed);
        true
    }

    /// Put the ball back on `center` at its initial speed with a new direction.
    pub fn reset<R: Rng + ?Sized>(&mut self, center: Vec3, rng: &mut R, config: &BallConfig) {
        self.position = center;
        self.position.z = 0.0;
        self.speed = config.initial_speed;
        self.direction = random_direction(rng, config.direction_min, config.direction_max);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half(
            self.position,
            Vec3::new(self.half_size, self.half_size, self.half_size),
        )
    }
}

/// Random planar direction whose x and y magnitudes each lie in `[min, max]`,
/// so the ball never travels purely horizontally or vertically.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Vec3 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let mut component = || {
        let magnitude = rng.random_range(lo..=hi);
        if rng.random_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    };
    let x = component();
    let y = component();
    Vec3::new(x, y, 0.0)
}

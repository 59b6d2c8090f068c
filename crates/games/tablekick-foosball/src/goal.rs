use serde::{Deserialize, Serialize};

use tablekick_core::side::Side;

use crate::config::FieldConfig;
use crate::field::PlayField;
use crate::geometry::{Aabb, Vec3};

/// What kind of body touched a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    Ball,
    Player,
    Wall,
}

/// Trigger volume behind an end line. `side` is the team defending it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalArea {
    pub side: Side,
    pub bounds: Aabb,
    points: u32,
}

impl GoalArea {
    pub fn new(side: Side, bounds: Aabb) -> Self {
        Self {
            side,
            bounds,
            points: 0,
        }
    }

    /// The goal mouth behind the left or right end line of the field.
    pub fn behind_end_line(side: Side, field: &PlayField, config: &FieldConfig) -> Self {
        let b = field.bounds();
        let cy = b.center().y;
        let half = Vec3::new(config.goal_depth / 2.0, config.goal_half_height, 0.5);
        let cx = match side {
            Side::Left => b.min.x - half.x,
            Side::Right => b.max.x + half.x,
        };
        Self::new(side, Aabb::from_center_half(Vec3::new(cx, cy, 0.0), half))
    }

    /// Times the ball has gone into this goal.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Handle something entering the trigger. Anything but the ball is
    /// ignored. Returns true when a goal was counted and the ball must be reset.
    pub fn on_trigger_enter(&mut self, kind: ColliderKind) -> bool {
        if kind != ColliderKind::Ball {
            return false;
        }
        self.points = self.points.saturating_add(1);
        true
    }

    pub fn contains(&self, aabb: &Aabb) -> bool {
        self.bounds.intersects(aabb)
    }
}

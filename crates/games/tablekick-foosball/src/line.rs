use serde::{Deserialize, Serialize};

use tablekick_core::side::ControlType;

use crate::config::{LineLayout, LinesConfig};
use crate::field::PlayField;
use crate::geometry::{Aabb, Vec3};

/// One figure on a rod, positioned relative to the rod centre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldPlayer {
    pub offset_y: f32,
    pub half_extents: Vec3,
}

/// A rod of players that slide together along y. Its x never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldPlayerLine {
    pub x: f32,
    pub y: f32,
    pub players: Vec<FieldPlayer>,
    /// Whether this line currently responds to movement control.
    pub control_enabled: bool,
    pub control_type: ControlType,
}

impl FieldPlayerLine {
    pub fn from_layout(layout: &LineLayout, lines: &LinesConfig, control_type: ControlType) -> Self {
        let half_extents = Vec3::new(lines.player_half_width, lines.player_half_height, 0.5);
        Self {
            x: layout.x,
            y: 0.0,
            players: layout
                .player_offsets
                .iter()
                .map(|&offset_y| FieldPlayer {
                    offset_y,
                    half_extents,
                })
                .collect(),
            control_enabled: false,
            control_type,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }

    /// Bounding boxes of the individual players.
    pub fn player_bounds(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.players.iter().map(move |p| {
            Aabb::from_center_half(Vec3::new(self.x, self.y + p.offset_y, 0.0), p.half_extents)
        })
    }

    /// Bounding box of the whole line, recomputed from its players.
    pub fn bounds(&self) -> Aabb {
        let mut boxes = self.player_bounds();
        let Some(first) = boxes.next() else {
            return Aabb::from_center_half(self.position(), Vec3::ZERO);
        };
        boxes.fold(first, |acc, b| acc.union(&b))
    }

    /// Clamp the line so its bounding box stays inside the field vertically.
    pub fn confine(&mut self, field: &PlayField) {
        let bounds = self.bounds();
        let center = bounds.center().y;
        let clamped = field.clamp_line_y(center, bounds.half_extents().y);
        self.y += clamped - center;
    }

    /// Move vertically by `dy`, then confine. Every controller goes through
    /// here. Returns the distance actually travelled.
    pub fn move_by(&mut self, dy: f32, field: &PlayField) -> f32 {
        let before = self.y;
        self.y += dy;
        self.confine(field);
        self.y - before
    }

    /// Contact normal (pointing at the ball) if any player overlaps the ball.
    ///
    /// The normal is taken along the axis of least penetration.
    pub fn contact_with(&self, ball: &Aabb) -> Option<Vec3> {
        let ball_center = ball.center();
        self.player_bounds().find(|p| p.intersects(ball)).map(|p| {
            let overlap_x = ball.max.x.min(p.max.x) - ball.min.x.max(p.min.x);
            let overlap_y = ball.max.y.min(p.max.y) - ball.min.y.max(p.min.y);
            let pc = p.center();
            if overlap_x <= overlap_y {
                let sign = if ball_center.x >= pc.x { 1.0 } else { -1.0 };
                Vec3::new(sign, 0.0, 0.0)
            } else {
                let sign = if ball_center.y >= pc.y { 1.0 } else { -1.0 };
                Vec3::new(0.0, sign, 0.0)
            }
        })
    }
}

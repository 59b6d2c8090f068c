use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::geometry::{Aabb, Vec3};

/// The four boundary markers framing the playing area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundaryMarkers {
    pub top: Aabb,
    pub bottom: Aabb,
    pub left: Aabb,
    pub right: Aabb,
}

impl BoundaryMarkers {
    /// Markers for a field centred on the origin.
    pub fn from_config(config: &FieldConfig) -> Self {
        let w = config.half_width;
        let h = config.half_height;
        let t = config.wall_thickness;
        let half_t = t / 2.0;
        Self {
            top: Aabb::from_center_half(Vec3::new(0.0, h + half_t, 0.0), Vec3::new(w + t, half_t, 0.5)),
            bottom: Aabb::from_center_half(
                Vec3::new(0.0, -h - half_t, 0.0),
                Vec3::new(w + t, half_t, 0.5),
            ),
            left: Aabb::from_center_half(
                Vec3::new(-w - half_t, 0.0, 0.0),
                Vec3::new(half_t, h + t, 0.5),
            ),
            right: Aabb::from_center_half(Vec3::new(w + half_t, 0.0, 0.0), Vec3::new(half_t, h + t, 0.5)),
        }
    }
}

/// A wall hit: the surface normal, pointing back into the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub normal: Vec3,
}

/// Playing area computed once from the boundary markers; read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayField {
    bounds: Aabb,
    goal_half_height: f32,
}

impl PlayField {
    /// The field spans the inner faces of the four markers.
    pub fn from_markers(markers: &BoundaryMarkers, goal_half_height: f32) -> Self {
        let bounds = Aabb::new(
            Vec3::new(markers.left.max.x, markers.bottom.max.y, 0.0),
            Vec3::new(markers.right.min.x, markers.top.min.y, 0.0),
        );
        Self {
            bounds,
            goal_half_height,
        }
    }

    pub fn from_config(config: &FieldConfig) -> Self {
        Self::from_markers(&BoundaryMarkers::from_config(config), config.goal_half_height)
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn center(&self) -> Vec3 {
        self.bounds.center()
    }

    pub fn goal_half_height(&self) -> f32 {
        self.goal_half_height
    }

    /// Clamp a vertical centre so an object of `half_height` stays inside.
    /// Objects taller than the field are centred.
    pub fn clamp_line_y(&self, center_y: f32, half_height: f32) -> f32 {
        let lo = self.bounds.min.y + half_height;
        let hi = self.bounds.max.y - half_height;
        if lo > hi {
            return self.bounds.center().y;
        }
        center_y.clamp(lo, hi)
    }

    /// Whether the box has completely left the field through any boundary.
    pub fn is_fully_outside(&self, aabb: &Aabb) -> bool {
        aabb.min.x > self.bounds.max.x
            || aabb.max.x < self.bounds.min.x
            || aabb.min.y > self.bounds.max.y
            || aabb.max.y < self.bounds.min.y
    }

    /// Whether a y coordinate lies inside the goal mouth.
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        (y - self.bounds.center().y).abs() < self.goal_half_height
    }

    /// Whether a point lies on or inside the field boundary.
    pub fn contains_point(&self, p: Vec3) -> bool {
        let b = &self.bounds;
        p.x >= b.min.x && p.x <= b.max.x && p.y >= b.min.y && p.y <= b.max.y
    }

    /// Clamp a ball centre back inside the solid walls. The end lines stay
    /// open inside the goal mouth.
    pub fn push_inside(&self, center: Vec3, half_size: f32) -> Vec3 {
        let b = &self.bounds;
        let mut c = center;
        c.y = self.clamp_line_y(c.y, half_size);
        if !self.in_goal_mouth(c.y) {
            let lo = b.min.x + half_size;
            let hi = b.max.x - half_size;
            c.x = if lo > hi { b.center().x } else { c.x.clamp(lo, hi) };
        }
        c
    }

    /// Wall the ball is pressing against while moving along `direction`, if any.
    ///
    /// Walls only count while the ball moves into them. End walls only count
    /// outside the goal mouth, so the ball can roll into a goal; a ball whose
    /// centre already crossed the end line still touches the wall.
    pub fn wall_contact(&self, ball: &Aabb, direction: Vec3) -> Option<WallContact> {
        let b = &self.bounds;
        let center = ball.center();
        if ball.max.y >= b.max.y && direction.y > 0.0 {
            return Some(WallContact {
                normal: Vec3::new(0.0, -1.0, 0.0),
            });
        }
        if ball.min.y <= b.min.y && direction.y < 0.0 {
            return Some(WallContact {
                normal: Vec3::new(0.0, 1.0, 0.0),
            });
        }
        if !self.in_goal_mouth(center.y) {
            if ball.max.x >= b.max.x && direction.x > 0.0 {
                return Some(WallContact {
                    normal: Vec3::new(-1.0, 0.0, 0.0),
                });
            }
            if ball.min.x <= b.min.x && direction.x < 0.0 {
                return Some(WallContact {
                    normal: Vec3::new(1.0, 0.0, 0.0),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> PlayField {
        PlayField::from_config(&FieldConfig::default())
    }

    #[test]
    fn bounds_come_from_marker_inner_faces() {
        let f = field();
        assert!((f.bounds().min.x + 10.0).abs() < 1e-5);
        assert!((f.bounds().max.x - 10.0).abs() < 1e-5);
        assert!((f.bounds().min.y + 6.0).abs() < 1e-5);
        assert!((f.bounds().max.y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn clamp_keeps_line_inside() {
        let f = field();
        assert_eq!(f.clamp_line_y(100.0, 2.0), 4.0);
        assert_eq!(f.clamp_line_y(-100.0, 2.0), -4.0);
        assert_eq!(f.clamp_line_y(1.0, 2.0), 1.0);
    }

    #[test]
    fn oversized_line_is_centred() {
        assert_eq!(field().clamp_line_y(3.0, 50.0), 0.0);
    }

    #[test]
    fn fully_outside_requires_complete_exit() {
        let f = field();
        let half = Vec3::new(0.25, 0.25, 0.25);
        let straddling = Aabb::from_center_half(Vec3::new(10.1, 0.0, 0.0), half);
        assert!(!f.is_fully_outside(&straddling));
        let gone = Aabb::from_center_half(Vec3::new(10.3, 0.0, 0.0), half);
        assert!(f.is_fully_outside(&gone));
        let below = Aabb::from_center_half(Vec3::new(0.0, -6.3, 0.0), half);
        assert!(f.is_fully_outside(&below));
    }

    #[test]
    fn side_wall_contact_points_inward() {
        let f = field();
        let ball = Aabb::from_center_half(Vec3::new(0.0, 5.9, 0.0), Vec3::new(0.25, 0.25, 0.25));
        let contact = f.wall_contact(&ball, Vec3::new(0.5, 0.5, 0.0)).unwrap();
        assert_eq!(contact.normal, Vec3::new(0.0, -1.0, 0.0));
        assert!(f.wall_contact(&ball, Vec3::new(0.5, -0.5, 0.0)).is_none());
    }

    #[test]
    fn end_wall_has_goal_mouth() {
        let f = field();
        let half = Vec3::new(0.25, 0.25, 0.25);
        let dir = Vec3::new(1.0, 0.3, 0.0);
        let in_mouth = Aabb::from_center_half(Vec3::new(9.9, 0.0, 0.0), half);
        assert!(f.wall_contact(&in_mouth, dir).is_none());
        let outside_mouth = Aabb::from_center_half(Vec3::new(9.9, 4.0, 0.0), half);
        assert_eq!(
            f.wall_contact(&outside_mouth, dir).unwrap().normal,
            Vec3::new(-1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn end_wall_still_blocks_ball_whose_centre_crossed() {
        let f = field();
        let half = Vec3::new(0.25, 0.25, 0.25);
        let past_line = Aabb::from_center_half(Vec3::new(10.02, 4.59, 0.0), half);
        assert_eq!(
            f.wall_contact(&past_line, Vec3::new(1.0, 0.3, 0.0)).unwrap().normal,
            Vec3::new(-1.0, 0.0, 0.0)
        );
        let left_past = Aabb::from_center_half(Vec3::new(-10.1, -3.0, 0.0), half);
        assert_eq!(
            f.wall_contact(&left_past, Vec3::new(-1.0, 0.0, 0.0)).unwrap().normal,
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn push_inside_respects_goal_mouth() {
        let f = field();
        let pushed = f.push_inside(Vec3::new(10.02, 4.59, 0.0), 0.25);
        assert!((pushed.x - 9.75).abs() < 1e-5);
        assert!((pushed.y - 4.59).abs() < 1e-5);

        let corner = f.push_inside(Vec3::new(-10.3, -6.2, 0.0), 0.25);
        assert!((corner.x + 9.75).abs() < 1e-5);
        assert!((corner.y + 5.75).abs() < 1e-5);

        let mouth = f.push_inside(Vec3::new(10.2, 0.5, 0.0), 0.25);
        assert!((mouth.x - 10.2).abs() < 1e-5);
    }

    #[test]
    fn contains_point_includes_boundary() {
        let f = field();
        assert!(f.contains_point(Vec3::new(10.0, 6.0, 0.0)));
        assert!(!f.contains_point(Vec3::new(10.01, 0.0, 0.0)));
    }
}

use serde::{Deserialize, Serialize};

use crate::field::PlayField;
use crate::line::FieldPlayerLine;
use crate::team::FieldTeam;

/// Input from a human player, sent once per frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HumanInput {
    /// Vertical axis in [-1, 1]; positive moves the active line up.
    pub axis: f32,
    pub switch_left: bool,
    pub switch_right: bool,
}

impl HumanInput {
    /// Fold a newer frame's input into this pending one. The axis is taken
    /// from the newer input; switch presses are kept until consumed.
    pub fn merge(&mut self, newer: HumanInput) {
        self.axis = newer.axis;
        self.switch_left |= newer.switch_left;
        self.switch_right |= newer.switch_right;
    }
}

/// Move a line from a human axis value. Returns the distance travelled.
pub fn human_step(
    line: &mut FieldPlayerLine,
    axis: f32,
    speed: f32,
    dt: f32,
    field: &PlayField,
) -> f32 {
    let axis = if axis.is_finite() {
        axis.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    line.move_by(axis * speed * dt, field)
}

/// Apply one frame of human input to a team: line switches first, then the
/// axis drives whichever line is active afterwards. Returns the new active
/// index when it changed.
pub fn apply_human_input(
    team: &mut FieldTeam,
    input: &HumanInput,
    speed: f32,
    dt: f32,
    field: &PlayField,
) -> Option<usize> {
    let before = team.active_index();
    if input.switch_left {
        team.switch_left();
    }
    if input.switch_right {
        team.switch_right();
    }
    if let Some(line) = team.active_line_mut() {
        human_step(line, input.axis, speed, dt, field);
    }
    let after = team.active_index();
    (after != before).then_some(after)
}

#[cfg(test)]
mod tests {
    use tablekick_core::side::{ControlType, Side};

    use super::*;
    use crate::config::{FieldConfig, LinesConfig};

    fn field() -> PlayField {
        PlayField::from_config(&FieldConfig::default())
    }

    fn human_team() -> FieldTeam {
        FieldTeam::from_config(Side::Left, &LinesConfig::default(), ControlType::Human, &field())
    }

    #[test]
    fn axis_scales_by_speed_and_time() {
        let f = field();
        let mut team = human_team();
        team.set_active(0);
        let line = team.active_line_mut().unwrap();
        let moved = human_step(line, 0.5, 8.0, 0.25, &f);
        assert!((moved - 1.0).abs() < 1e-5);
        assert!((line.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn axis_is_clamped_and_sanitized() {
        let f = field();
        let mut team = human_team();
        team.set_active(0);
        let line = team.active_line_mut().unwrap();
        let moved = human_step(line, 5.0, 1.0, 1.0, &f);
        assert!((moved - 1.0).abs() < 1e-5);
        assert_eq!(human_step(line, f32::NAN, 1.0, 1.0, &f), 0.0);
    }

    #[test]
    fn human_line_is_confined() {
        let f = field();
        let mut team = human_team();
        team.set_active(0);
        let line = team.active_line_mut().unwrap();
        for _ in 0..100 {
            human_step(line, 1.0, 8.0, 0.1, &f);
        }
        // Goalie: one player of half height 0.4.
        assert!((line.y - 5.6).abs() < 1e-4);
    }

    #[test]
    fn switch_then_move_drives_new_line() {
        let f = field();
        let mut team = human_team();
        team.set_active(1);
        let input = HumanInput {
            axis: 1.0,
            switch_left: true,
            switch_right: false,
        };
        assert_eq!(apply_human_input(&mut team, &input, 8.0, 0.1, &f), Some(0));
        assert!(team.lines()[0].y > 0.0);
        assert_eq!(team.lines()[1].y, 0.0);
    }

    #[test]
    fn merge_keeps_switch_presses() {
        let mut pending = HumanInput {
            axis: 1.0,
            switch_left: true,
            switch_right: false,
        };
        pending.merge(HumanInput {
            axis: -0.5,
            switch_left: false,
            switch_right: false,
        });
        assert_eq!(pending.axis, -0.5);
        assert!(pending.switch_left);
    }
}

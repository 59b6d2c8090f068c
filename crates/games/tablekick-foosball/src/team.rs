use serde::{Deserialize, Serialize};

use tablekick_core::side::{ControlType, Side};

use crate::config::LinesConfig;
use crate::field::PlayField;
use crate::line::FieldPlayerLine;

/// All lines of one team, ordered left to right by x.
///
/// Exactly one line (the active one) has control enabled at any time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldTeam {
    pub side: Side,
    lines: Vec<FieldPlayerLine>,
    active: usize,
    control_type: ControlType,
}

impl FieldTeam {
    /// Build a team from its lines. Lines are sorted by x, confined to the
    /// field, and `initial_active` (clamped) gets control.
    ///
    /// An empty `lines` is accepted but the team has no active line; config
    /// validation rejects such setups before a match is built.
    pub fn new(
        side: Side,
        mut lines: Vec<FieldPlayerLine>,
        control_type: ControlType,
        initial_active: usize,
        field: &PlayField,
    ) -> Self {
        lines.sort_by(|a, b| a.x.total_cmp(&b.x));
        for line in &mut lines {
            line.control_type = control_type;
            line.confine(field);
        }
        let mut team = Self {
            side,
            lines,
            active: 0,
            control_type,
        };
        team.set_active(initial_active);
        team
    }

    pub fn from_config(
        side: Side,
        config: &LinesConfig,
        control_type: ControlType,
        field: &PlayField,
    ) -> Self {
        let layouts = match side {
            Side::Left => &config.left,
            Side::Right => &config.right,
        };
        let lines = layouts
            .iter()
            .map(|layout| FieldPlayerLine::from_layout(layout, config, control_type))
            .collect();
        Self::new(side, lines, control_type, config.initial_active_line, field)
    }

    pub fn lines(&self) -> &[FieldPlayerLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_line(&self) -> Option<&FieldPlayerLine> {
        self.lines.get(self.active)
    }

    pub fn active_line_mut(&mut self) -> Option<&mut FieldPlayerLine> {
        self.lines.get_mut(self.active)
    }

    pub fn control_type(&self) -> ControlType {
        self.control_type
    }

    /// Hand the whole team to a human or the computer.
    pub fn set_control_type(&mut self, control_type: ControlType) {
        self.control_type = control_type;
        for line in &mut self.lines {
            line.control_type = control_type;
        }
    }

    /// Activate the line at `index` (clamped into range) and disable the rest.
    /// Returns the resulting active index.
    pub fn set_active(&mut self, index: usize) -> usize {
        if self.lines.is_empty() {
            self.active = 0;
            return 0;
        }
        self.active = index.min(self.lines.len() - 1);
        for (i, line) in self.lines.iter_mut().enumerate() {
            line.control_enabled = i == self.active;
        }
        self.active
    }

    /// Move control one line to the left (towards -x). Returns true if the
    /// active line changed.
    pub fn switch_left(&mut self) -> bool {
        let before = self.active;
        self.set_active(self.active.saturating_sub(1)) != before
    }

    /// Move control one line to the right (towards +x). Returns true if the
    /// active line changed.
    pub fn switch_right(&mut self) -> bool {
        let before = self.active;
        self.set_active(self.active.saturating_add(1)) != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldConfig, LineLayout};

    fn field() -> PlayField {
        PlayField::from_config(&FieldConfig::default())
    }

    fn team() -> FieldTeam {
        FieldTeam::from_config(
            Side::Left,
            &LinesConfig::default(),
            ControlType::Computer,
            &field(),
        )
    }

    fn enabled_count(team: &FieldTeam) -> usize {
        team.lines().iter().filter(|l| l.control_enabled).count()
    }

    #[test]
    fn lines_sorted_by_x() {
        let config = LinesConfig {
            left: vec![
                LineLayout::new(3.0, &[0.0]),
                LineLayout::new(-3.0, &[0.0]),
                LineLayout::new(0.0, &[0.0]),
            ],
            ..LinesConfig::default()
        };
        let t = FieldTeam::from_config(Side::Left, &config, ControlType::Human, &field());
        let xs: Vec<f32> = t.lines().iter().map(|l| l.x).collect();
        assert_eq!(xs, vec![-3.0, 0.0, 3.0]);
    }

    #[test]
    fn initial_active_line_is_clamped() {
        let config = LinesConfig {
            initial_active_line: 99,
            ..LinesConfig::default()
        };
        let t = FieldTeam::from_config(Side::Right, &config, ControlType::Computer, &field());
        assert_eq!(t.active_index(), 3);
        assert_eq!(enabled_count(&t), 1);
    }

    #[test]
    fn switching_clamps_at_edges() {
        let mut t = team();
        t.set_active(0);
        assert!(!t.switch_left());
        assert_eq!(t.active_index(), 0);
        assert!(t.switch_right());
        assert!(t.switch_right());
        assert!(t.switch_right());
        assert!(!t.switch_right());
        assert_eq!(t.active_index(), 3);
        assert!(t.lines()[3].control_enabled);
        assert_eq!(enabled_count(&t), 1);
    }

    #[test]
    fn control_type_propagates_to_lines() {
        let mut t = team();
        t.set_control_type(ControlType::Human);
        assert!(t.lines().iter().all(|l| l.control_type == ControlType::Human));
        assert_eq!(t.control_type(), ControlType::Human);
    }

    #[test]
    fn empty_team_has_no_active_line() {
        let t = FieldTeam::new(Side::Left, Vec::new(), ControlType::Computer, 2, &field());
        assert!(t.active_line().is_none());
        assert_eq!(t.active_index(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn exactly_one_line_enabled(switches in proptest::collection::vec(any::<bool>(), 0..100)) {
                let mut t = team();
                for go_right in switches {
                    if go_right {
                        t.switch_right();
                    } else {
                        t.switch_left();
                    }
                    prop_assert_eq!(enabled_count(&t), 1);
                    prop_assert!(t.active_index() < t.line_count());
                    prop_assert!(t.lines()[t.active_index()].control_enabled);
                }
            }
        }
    }
}

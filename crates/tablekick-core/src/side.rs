use serde::{Deserialize, Serialize};

/// Which half of the table a team defends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Who drives a team's active line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    Human,
    #[default]
    Computer,
}

impl ControlType {
    /// The other control type (what the menu toggle flips to).
    pub fn toggled(self) -> ControlType {
        match self {
            ControlType::Human => ControlType::Computer,
            ControlType::Computer => ControlType::Human,
        }
    }
}

/// 8-bit RGB colour used for team kits and material previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for TeamColor {
    fn default() -> Self {
        Self::PALETTE[0]
    }
}

impl TeamColor {
    pub const BLACK: TeamColor = TeamColor { r: 0, g: 0, b: 0 };
    pub const WHITE: TeamColor = TeamColor {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Predefined kit colours offered by the team setup menu.
    pub const PALETTE: &[TeamColor] = &[
        TeamColor {
            r: 255,
            g: 87,
            b: 87,
        }, // Red
        TeamColor {
            r: 83,
            g: 152,
            b: 255,
        }, // Blue
        TeamColor {
            r: 255,
            g: 195,
            b: 18,
        }, // Yellow
        TeamColor {
            r: 46,
            g: 213,
            b: 115,
        }, // Green
        TeamColor {
            r: 130,
            g: 88,
            b: 255,
        }, // Purple
        TeamColor {
            r: 255,
            g: 148,
            b: 77,
        }, // Orange
    ];

    /// Default kit for a side: red on the left, blue on the right.
    pub fn for_side(side: Side) -> TeamColor {
        match side {
            Side::Left => Self::PALETTE[0],
            Side::Right => Self::PALETTE[1],
        }
    }

    /// Colour as linear-ish floats in [0, 1].
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Build a colour from floats, clamping each channel into [0, 1].
    pub fn from_f32(rgb: [f32; 3]) -> TeamColor {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        TeamColor {
            r: ch(rgb[0]),
            g: ch(rgb[1]),
            b: ch(rgb[2]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involution() {
        for side in Side::BOTH {
            assert_ne!(side, side.opponent());
            assert_eq!(side, side.opponent().opponent());
        }
    }

    #[test]
    fn control_toggle_flips() {
        assert_eq!(ControlType::Human.toggled(), ControlType::Computer);
        assert_eq!(ControlType::Computer.toggled(), ControlType::Human);
    }

    #[test]
    fn color_float_conversion_clamps() {
        let c = TeamColor::from_f32([2.0, -1.0, 0.5]);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 0);
        assert_eq!(c.b, 128);
    }

    #[test]
    fn sides_get_distinct_default_kits() {
        assert_ne!(TeamColor::for_side(Side::Left), TeamColor::for_side(Side::Right));
    }
}

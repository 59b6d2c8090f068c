use serde::{Deserialize, Serialize};

use crate::material::{MaterialChoice, MaterialParam};
use crate::side::{ControlType, Side, TeamColor};

/// Player figure model offered by the model menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamModel {
    #[default]
    Classic,
    Robot,
    Blocky,
}

impl TeamModel {
    pub const ALL: [TeamModel; 3] = [TeamModel::Classic, TeamModel::Robot, TeamModel::Blocky];

    /// Asset name the front end instantiates for this model.
    pub fn asset_name(self) -> &'static str {
        match self {
            TeamModel::Classic => "player_classic",
            TeamModel::Robot => "player_robot",
            TeamModel::Blocky => "player_blocky",
        }
    }
}

/// Everything the setup menus decide about one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSetup {
    pub control: ControlType,
    pub material: MaterialChoice,
    pub model: TeamModel,
}

impl TeamSetup {
    pub fn for_side(side: Side) -> Self {
        Self {
            control: ControlType::Computer,
            material: MaterialChoice::diffuse(TeamColor::for_side(side)),
            model: TeamModel::default(),
        }
    }
}

/// Both teams' setup, handed to the match scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub left: TeamSetup,
    pub right: TeamSetup,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            left: TeamSetup::for_side(Side::Left),
            right: TeamSetup::for_side(Side::Right),
        }
    }
}

/// A value-changed callback from one of the setup widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetupChange {
    ToggleControl(Side),
    SelectModel(Side, TeamModel),
    SelectMaterial(Side, MaterialChoice),
    SetColor(Side, TeamColor),
    SetMaterialParam(Side, MaterialParam, f32),
}

impl MatchSetup {
    pub fn team(&self, side: Side) -> &TeamSetup {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut TeamSetup {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Apply a widget change. Returns false when the change had no effect
    /// (a slider for a parameter the selected panel does not have).
    pub fn apply(&mut self, change: SetupChange) -> bool {
        match change {
            SetupChange::ToggleControl(side) => {
                let team = self.team_mut(side);
                team.control = team.control.toggled();
                true
            },
            SetupChange::SelectModel(side, model) => {
                self.team_mut(side).model = model;
                true
            },
            SetupChange::SelectMaterial(side, choice) => {
                self.team_mut(side).material = choice;
                true
            },
            SetupChange::SetColor(side, color) => {
                self.team_mut(side).material.set_color(color);
                true
            },
            SetupChange::SetMaterialParam(side, param, value) => {
                let applied = self.team_mut(side).material.set_param(param, value);
                if !applied {
                    tracing::debug!(?side, ?param, "Ignored slider for inactive material panel");
                }
                applied
            },
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::events::MatchResult;
use crate::music::MusicFader;
use crate::setup::MatchSetup;

/// Seconds the music takes to cross-fade on scene changes.
pub const MUSIC_FADE_SECS: f32 = 1.5;

/// Scenes of the game, loaded by name by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    MainMenu,
    TeamSetup,
    Match,
    Result,
}

impl Scene {
    pub fn name(self) -> &'static str {
        match self {
            Scene::MainMenu => "main_menu",
            Scene::TeamSetup => "team_setup",
            Scene::Match => "match",
            Scene::Result => "result",
        }
    }

    pub fn by_name(name: &str) -> Option<Scene> {
        match name {
            "main_menu" => Some(Scene::MainMenu),
            "team_setup" => Some(Scene::TeamSetup),
            "match" => Some(Scene::Match),
            "result" => Some(Scene::Result),
            _ => None,
        }
    }

    fn music_track(self) -> &'static str {
        match self {
            Scene::Match => "match_theme",
            _ => "menu_theme",
        }
    }
}

/// State that outlives individual scenes: the menu choices, the music and
/// the last match result. Passed explicitly to every lifecycle step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSession {
    scene: Scene,
    pub setup: MatchSetup,
    pub music: MusicFader,
    last_result: Option<MatchResult>,
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new(MatchSetup::default())
    }
}

impl MatchSession {
    pub fn new(setup: MatchSetup) -> Self {
        let mut music = MusicFader::new(Scene::MainMenu.music_track());
        music.play();
        Self {
            scene: Scene::MainMenu,
            setup,
            music,
            last_result: None,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn last_result(&self) -> Option<MatchResult> {
        self.last_result
    }

    /// Main menu → team setup.
    pub fn start_setup(&mut self) -> bool {
        self.transition(Scene::MainMenu, Scene::TeamSetup)
    }

    /// Team setup (or a finished match, for a rematch) → match.
    pub fn start_match(&mut self) -> bool {
        match self.scene {
            Scene::TeamSetup | Scene::Result => {
                let from = self.scene;
                self.transition(from, Scene::Match)
            },
            other => {
                tracing::debug!(scene = other.name(), "Cannot start a match from this scene");
                false
            },
        }
    }

    /// Match → result, persisting the referee's decision.
    pub fn finish_match(&mut self, result: MatchResult) -> bool {
        if !self.transition(Scene::Match, Scene::Result) {
            return false;
        }
        tracing::info!(
            winner = ?result.winner,
            left = result.left_score,
            right = result.right_score,
            "Match finished"
        );
        self.last_result = Some(result);
        true
    }

    /// Any scene → main menu.
    pub fn return_to_menu(&mut self) {
        let from = self.scene;
        self.transition(from, Scene::MainMenu);
    }

    /// Advance time-based session state (music fades).
    pub fn tick(&mut self, dt: f32) {
        self.music.tick(dt);
        if !self.music.is_fading() && self.music.volume <= 0.0 {
            // Faded out the previous track; bring in the one for this scene.
            self.music.change_track(self.scene.music_track());
            self.music.fade_to(1.0, MUSIC_FADE_SECS);
        }
    }

    fn transition(&mut self, from: Scene, to: Scene) -> bool {
        if self.scene != from {
            tracing::debug!(
                current = self.scene.name(),
                expected = from.name(),
                target = to.name(),
                "Ignored scene transition"
            );
            return false;
        }
        tracing::debug!(from = from.name(), to = to.name(), "Loading scene");
        if from.music_track() != to.music_track() {
            self.music.fade_to(0.0, MUSIC_FADE_SECS);
        }
        self.scene = to;
        true
    }
}

pub mod ball;
pub mod bot;
pub mod clock;
pub mod config;
pub mod control;
pub mod error;
pub mod field;
pub mod geometry;
pub mod goal;
pub mod line;
pub mod referee;
pub mod scoring;
pub mod team;

use std::collections::HashMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use tablekick_core::events::{MatchEvent, MatchResult, ResetReason};
use tablekick_core::game_trait::{FoosballGame, GameMetadata};
use tablekick_core::setup::MatchSetup;
use tablekick_core::side::{ControlType, Side};

use ball::BallState;
use bot::LineSwitchAi;
use clock::{Clock, ClockMode};
use config::FoosballConfig;
use error::ConfigError;
use control::HumanInput;
use field::PlayField;
use goal::{ColliderKind, GoalArea};
use referee::Referee;
use team::FieldTeam;

/// Serializable match state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoosballState {
    pub ball: BallState,
    pub left_team: FieldTeam,
    pub right_team: FieldTeam,
    /// Goal defended by the left team.
    pub left_goal: GoalArea,
    /// Goal defended by the right team.
    pub right_goal: GoalArea,
    pub left_switch_ai: LineSwitchAi,
    pub right_switch_ai: LineSwitchAi,
    pub clock: Clock,
    pub referee: Referee,
    pub ball_hits: u32,
    pub match_complete: bool,
}

impl FoosballState {
    fn build<R: Rng + ?Sized>(
        config: &FoosballConfig,
        field: &PlayField,
        setup: &MatchSetup,
        rng: &mut R,
    ) -> Self {
        let clock = match config.clock.mode {
            ClockMode::CountDown => Clock::countdown(config.clock.duration_secs),
            ClockMode::CountUp => Clock::count_up(config.clock.count_up_limit_secs),
        };
        Self {
            ball: BallState::new(field.center(), rng, &config.ball),
            left_team: FieldTeam::from_config(Side::Left, &config.lines, setup.left.control, field),
            right_team: FieldTeam::from_config(
                Side::Right,
                &config.lines,
                setup.right.control,
                field,
            ),
            left_goal: GoalArea::behind_end_line(Side::Left, field, &config.field),
            right_goal: GoalArea::behind_end_line(Side::Right, field, &config.field),
            left_switch_ai: LineSwitchAi::default(),
            right_switch_ai: LineSwitchAi::default(),
            clock,
            referee: Referee::default(),
            ball_hits: 0,
            match_complete: false,
        }
    }

    pub fn team(&self, side: Side) -> &FieldTeam {
        match side {
            Side::Left => &self.left_team,
            Side::Right => &self.right_team,
        }
    }

    pub fn goal(&self, side: Side) -> &GoalArea {
        match side {
            Side::Left => &self.left_goal,
            Side::Right => &self.right_goal,
        }
    }

    fn goal_mut(&mut self, side: Side) -> &mut GoalArea {
        match side {
            Side::Left => &mut self.left_goal,
            Side::Right => &mut self.right_goal,
        }
    }

    fn team_and_ai_mut(&mut self, side: Side) -> (&mut FieldTeam, &mut LineSwitchAi) {
        match side {
            Side::Left => (&mut self.left_team, &mut self.left_switch_ai),
            Side::Right => (&mut self.right_team, &mut self.right_switch_ai),
        }
    }

    /// Current score of the team playing on `side`.
    pub fn score(&self, side: Side) -> u32 {
        scoring::team_score(side, &self.left_goal, &self.right_goal)
    }
}

/// A table football match.
pub struct FoosballMatch {
    state: FoosballState,
    field: PlayField,
    pending_inputs: HashMap<Side, HumanInput>,
    paused: bool,
    game_config: FoosballConfig,
    rng: StdRng,
}

impl FoosballMatch {
    pub fn new() -> Self {
        Self::with_config(FoosballConfig::load())
    }

    /// Build a match from `config`. An invalid config is replaced by the
    /// defaults (keeping its seed) with a warning.
    pub fn with_config(config: FoosballConfig) -> Self {
        match Self::try_with_config(config.clone()) {
            Ok(game) => game,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid foosball config, using defaults");
                Self::build(FoosballConfig {
                    seed: config.seed,
                    ..FoosballConfig::default()
                })
            },
        }
    }

    pub fn try_with_config(config: FoosballConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: FoosballConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let field = PlayField::from_config(&config.field);
        let state = FoosballState::build(&config, &field, &MatchSetup::default(), &mut rng);
        Self {
            state,
            field,
            pending_inputs: HashMap::new(),
            paused: false,
            game_config: config,
            rng,
        }
    }

    pub fn state(&self) -> &FoosballState {
        &self.state
    }

    pub fn config(&self) -> &FoosballConfig {
        &self.game_config
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    fn reset_ball(&mut self) {
        let center = self.field.center();
        self.state
            .ball
            .reset(center, &mut self.rng, &self.game_config.ball);
    }

    /// Run one team's controller for this frame.
    fn drive_team(&mut self, side: Side, dt: f32, events: &mut Vec<MatchEvent>) {
        let ball = self.state.ball.position;
        let input = self.pending_inputs.remove(&side);
        let config = &self.game_config;
        let (team, switch_ai) = self.state.team_and_ai_mut(side);

        let switched = match team.control_type() {
            ControlType::Human => {
                let input = input.unwrap_or_default();
                control::apply_human_input(team, &input, config.human.speed, dt, &self.field)
            },
            ControlType::Computer => {
                let switched =
                    switch_ai.maybe_switch(team, ball.x, &config.switch_ai, &mut self.rng, dt);
                if let Some(line) = team.active_line_mut() {
                    bot::computer_step(line, ball, &config.ai, &mut self.rng, dt, &self.field);
                }
                switched
            },
        };

        if let Some(index) = switched {
            tracing::debug!(?side, index, "Active line switched");
            events.push(MatchEvent::LineSwitched { side, index });
        }
    }

    /// Move the ball and respond to at most one collision.
    fn step_ball(&mut self, dt: f32, events: &mut Vec<MatchEvent>) {
        let before = self.state.ball.position;
        self.state.ball.advance(dt);
        let bounds = self.state.ball.bounds();
        let direction = self.state.ball.direction;

        let mut contacts = Vec::new();
        let wall = self.field.wall_contact(&bounds, direction);
        if let Some(wall) = wall {
            contacts.push(wall.normal);
        }
        for side in Side::BOTH {
            for line in self.state.team(side).lines() {
                if let Some(normal) = line.contact_with(&bounds)
                    && direction.dot(normal) < 0.0
                {
                    contacts.push(normal);
                }
            }
        }

        if self
            .state
            .ball
            .on_collision(&contacts, &self.game_config.ball)
        {
            // A fast ball can overshoot a wall within one frame.
            if wall.is_some() && self.field.contains_point(before) {
                let ball = &mut self.state.ball;
                ball.position = self.field.push_inside(ball.position, ball.half_size);
            }
            self.state.ball_hits += 1;
            events.push(MatchEvent::BallHit {
                speed: self.state.ball.speed,
            });
        }
    }

    fn check_goals(&mut self, events: &mut Vec<MatchEvent>) -> bool {
        let bounds = self.state.ball.bounds();
        for side in Side::BOTH {
            let goal = self.state.goal_mut(side);
            if !goal.contains(&bounds) || !goal.on_trigger_enter(ColliderKind::Ball) {
                continue;
            }
            let scorer = side.opponent();
            let left_score = self.state.score(Side::Left);
            let right_score = self.state.score(Side::Right);
            tracing::info!(?scorer, left_score, right_score, "Goal");
            events.push(MatchEvent::GoalScored {
                scorer,
                left_score,
                right_score,
            });
            self.reset_ball();
            events.push(MatchEvent::BallReset {
                reason: ResetReason::Goal,
            });
            return true;
        }
        false
    }

    fn check_out_of_bounds(&mut self, events: &mut Vec<MatchEvent>) {
        if self.field.is_fully_outside(&self.state.ball.bounds()) {
            tracing::debug!(
                x = self.state.ball.position.x,
                y = self.state.ball.position.y,
                "Ball left the field"
            );
            self.reset_ball();
            events.push(MatchEvent::BallReset {
                reason: ResetReason::OutOfBounds,
            });
        }
    }
}

impl Default for FoosballMatch {
    fn default() -> Self {
        Self::with_config(FoosballConfig::default())
    }
}

impl FoosballGame for FoosballMatch {
    fn metadata(&self) -> GameMetadata {
        let secs = match self.game_config.clock.mode {
            ClockMode::CountDown => self.game_config.clock.duration_secs,
            ClockMode::CountUp => self.game_config.clock.count_up_limit_secs.unwrap_or(0.0),
        };
        GameMetadata {
            name: "Table Football".to_string(),
            description: "Slide the rods, bounce the ball, beat the clock.".to_string(),
            lines_per_team: u8::try_from(self.game_config.lines.left.len()).unwrap_or(u8::MAX),
            estimated_match_duration: Duration::from_secs_f32(secs.max(0.0)),
        }
    }

    fn init(&mut self, setup: &MatchSetup) {
        self.state = FoosballState::build(&self.game_config, &self.field, setup, &mut self.rng);
        self.pending_inputs.clear();
        self.paused = false;
    }

    fn update(&mut self, dt: f32) -> Vec<MatchEvent> {
        if self.paused || self.state.match_complete {
            return Vec::new();
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut events = Vec::new();

        self.state.clock.tick(dt);

        for side in Side::BOTH {
            self.drive_team(side, dt, &mut events);
        }

        self.step_ball(dt, &mut events);
        if !self.check_goals(&mut events) {
            self.check_out_of_bounds(&mut events);
        }

        let left_score = self.state.score(Side::Left);
        let right_score = self.state.score(Side::Right);
        if let Some(result) =
            self.state
                .referee
                .observe(&self.state.clock, left_score, right_score)
        {
            self.state.match_complete = true;
            tracing::info!(winner = ?result.winner, left_score, right_score, "Full time");
            events.push(MatchEvent::MatchComplete(result));
        }

        events
    }

    fn serialize_state(&self) -> Vec<u8> {
        rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
    }

    fn apply_state(&mut self, state: &[u8]) {
        match rmp_serde::from_slice::<FoosballState>(state) {
            Ok(s) => self.state = s,
            Err(e) => tracing::debug!(error = %e, "Dropped malformed foosball state"),
        }
    }

    fn apply_input(&mut self, side: Side, input: &[u8]) {
        match rmp_serde::from_slice::<HumanInput>(input) {
            Err(e) => {
                tracing::debug!(?side, error = %e, "Dropped malformed foosball input");
            },
            Ok(hi) => {
                if let Some(existing) = self.pending_inputs.get_mut(&side) {
                    existing.merge(hi);
                } else {
                    self.pending_inputs.insert(side, hi);
                }
            },
        }
    }

    fn set_control_type(&mut self, side: Side, control: ControlType) {
        let (team, _) = self.state.team_and_ai_mut(side);
        if team.control_type() != control {
            tracing::debug!(?side, ?control, "Team control changed");
        }
        team.set_control_type(control);
        self.pending_inputs.remove(&side);
    }

    fn tick_rate(&self) -> f32 {
        60.0
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_match_complete(&self) -> bool {
        self.state.match_complete
    }

    fn match_result(&self) -> Option<MatchResult> {
        self.state.referee.result()
    }
}

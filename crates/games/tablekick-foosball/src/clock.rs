use serde::{Deserialize, Serialize};

/// Direction the match clock runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    CountUp,
    #[default]
    CountDown,
}

/// Match clock. Counting down it stops at zero; counting up it runs until
/// the optional limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clock {
    pub time: f32,
    pub mode: ClockMode,
    pub limit: Option<f32>,
}

impl Clock {
    pub fn countdown(duration_secs: f32) -> Self {
        Self {
            time: duration_secs.max(0.0),
            mode: ClockMode::CountDown,
            limit: None,
        }
    }

    pub fn count_up(limit_secs: Option<f32>) -> Self {
        Self {
            time: 0.0,
            mode: ClockMode::CountUp,
            limit: limit_secs,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        match self.mode {
            ClockMode::CountUp => self.time += dt,
            ClockMode::CountDown => self.time = (self.time - dt).max(0.0),
        }
    }

    /// Clock value truncated to whole seconds.
    pub fn whole_seconds(&self) -> u32 {
        self.time.max(0.0).trunc() as u32
    }

    /// Whether the match time is used up.
    ///
    /// Counting down this happens once the truncated value shows zero, so
    /// the final fraction of a second is not played.
    pub fn is_expired(&self) -> bool {
        match self.mode {
            ClockMode::CountDown => self.whole_seconds() == 0,
            ClockMode::CountUp => self.limit.is_some_and(|limit| self.time >= limit),
        }
    }

    /// `MM:SS` label for the HUD.
    pub fn display(&self) -> String {
        let secs = self.whole_seconds();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

use serde::{Deserialize, Serialize};

/// Background music volume controller.
///
/// Owned by the [`MatchSession`](crate::scene::MatchSession) rather than a
/// global; the front end mirrors `playing`/`volume` onto its audio source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicFader {
    pub track: String,
    pub playing: bool,
    pub volume: f32,
    target: f32,
    /// Volume change per second while fading.
    rate: f32,
}

impl MusicFader {
    pub fn new(track: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            playing: false,
            volume: 0.0,
            target: 0.0,
            rate: 0.0,
        }
    }

    /// Start playback at full volume, cancelling any fade.
    pub fn play(&mut self) {
        self.playing = true;
        self.volume = 1.0;
        self.target = 1.0;
        self.rate = 0.0;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Switch to another track, keeping the current volume.
    pub fn change_track(&mut self, track: impl Into<String>) {
        let track = track.into();
        if track != self.track {
            tracing::debug!(from = %self.track, to = %track, "Changing music track");
            self.track = track;
        }
    }

    /// Fade linearly to `target` over `duration` seconds. A non-positive
    /// duration jumps straight to the target.
    pub fn fade_to(&mut self, target: f32, duration: f32) {
        self.target = target.clamp(0.0, 1.0);
        if self.target > 0.0 {
            self.playing = true;
        }
        if duration <= 0.0 {
            self.volume = self.target;
            self.rate = 0.0;
            self.finish_fade();
            return;
        }
        self.rate = (self.target - self.volume).abs() / duration;
    }

    pub fn is_fading(&self) -> bool {
        (self.volume - self.target).abs() > f32::EPSILON && self.rate > 0.0
    }

    /// Advance the fade by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.is_fading() {
            return;
        }
        let step = self.rate * dt;
        if self.volume < self.target {
            self.volume = (self.volume + step).min(self.target);
        } else {
            self.volume = (self.volume - step).max(self.target);
        }
        if !self.is_fading() {
            self.finish_fade();
        }
    }

    fn finish_fade(&mut self) {
        self.rate = 0.0;
        if self.target <= 0.0 {
            self.playing = false;
        }
    }
}

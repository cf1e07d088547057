use tracing::debug;

/// Eases the displayed pitch back to the horizon over a fixed duration
#[derive(Debug, Clone, PartialEq)]
pub struct ReorientationAnimation {
    from_pitch: f32,
    elapsed: f32,
    duration: f32,
}

impl ReorientationAnimation {
    /// Start an animation from `from_pitch` lasting `duration` seconds
    pub fn new(from_pitch: f32, duration: f32) -> Self {
        debug!("Reorienting to horizon from pitch {} over {}s", from_pitch, duration);
        Self {
            from_pitch,
            elapsed: 0.0,
            duration,
        }
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// Whether the animation has reached the horizon
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Pitch to display at the current progress (smoothstep ease)
    pub fn current_pitch(&self) -> f32 {
        let t = self.progress();
        let eased = t * t * (3.0 - 2.0 * t);
        self.from_pitch * (1.0 - eased)
    }
}

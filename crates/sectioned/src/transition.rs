use std::time::Duration;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);
/// Scale the presented view starts from (and collapses to on dismiss).
pub const COLLAPSED_SCALE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    Present,
    Dismiss,
}

/// Interpolated state of the animated view at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub scale: f64,
    pub alpha: f64,
}

/// Scale-from-center and fade used to present and dismiss the slider host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub mode: TransitionMode,
    pub duration: Duration,
}

impl Transition {
    pub fn new(mode: TransitionMode) -> Self {
        Self {
            mode,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    pub fn frame(&self, elapsed: Duration) -> TransitionFrame {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        };
        let eased = ease_in_out(t);
        let shown = match self.mode {
            TransitionMode::Present => eased,
            TransitionMode::Dismiss => 1.0 - eased,
        };

        TransitionFrame {
            scale: COLLAPSED_SCALE + (1.0 - COLLAPSED_SCALE) * shown,
            alpha: shown,
        }
    }
}

fn ease_in_out(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

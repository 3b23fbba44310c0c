use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Focus level selected on the setup screen. Each level drives the flame
/// with a different pair of sine waves: slower and narrower for beginners,
/// faster and wider for practiced meditators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlameLevel {
    Beginner,
    Intermediate,
    Professional,
}

impl FlameLevel {
    pub const ALL: [FlameLevel; 3] = [
        FlameLevel::Beginner,
        FlameLevel::Intermediate,
        FlameLevel::Professional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FlameLevel::Beginner => "Beginner",
            FlameLevel::Intermediate => "Intermediate",
            FlameLevel::Professional => "Professional",
        }
    }

    /// Horizontal sway of the flame at `t` seconds of wall-clock time.
    ///
    /// Two superimposed sines per level; the sum stays within the level's
    /// combined amplitude for all `t`.
    pub fn offset_at(&self, t: f64) -> f64 {
        match self {
            FlameLevel::Beginner => (t * 0.5).sin() * 1.5 + (t * 1.2).sin() * 0.75,
            FlameLevel::Intermediate => (t * 0.7).sin() * 1.8 + (t * 1.5).sin() * 1.0,
            FlameLevel::Professional => (t * 2.5).sin() * 2.5 + (t * 5.0).sin() * 1.2,
        }
    }
}

/// Holds the latest flame sway sample. The waveform itself is a pure
/// function of time and level; this only remembers where the clock
/// started and what was last computed.
///
/// Sampled every frame regardless of whether a session is running, so
/// the setup-screen preview sways exactly like the session flame.
#[derive(Debug, Clone)]
pub struct FlameAnimator {
    level: FlameLevel,
    epoch: Instant,
    offset: f64,
}

impl FlameAnimator {
    pub fn new(now: Instant) -> Self {
        FlameAnimator {
            level: FlameLevel::Beginner,
            epoch: now,
            offset: 0.0,
        }
    }

    pub fn level(&self) -> FlameLevel {
        self.level
    }

    /// Switching level takes effect on the very next sample; the two
    /// waveforms are not blended.
    pub fn set_level(&mut self, level: FlameLevel) {
        self.level = level;
    }

    /// Recomputes the sway for the given instant and returns it.
    pub fn sample(&mut self, now: Instant) -> f64 {
        let t = now.duration_since(self.epoch).as_secs_f64();
        self.offset = self.level.offset_at(t);
        self.offset
    }

    /// The most recently sampled sway.
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn amplitude_bound(level: FlameLevel) -> f64 {
        match level {
            FlameLevel::Beginner => 1.5 + 0.75,
            FlameLevel::Intermediate => 1.8 + 1.0,
            FlameLevel::Professional => 2.5 + 1.2,
        }
    }

    #[test]
    fn test_offset_bounded_per_level() {
        for level in FlameLevel::ALL {
            let bound = amplitude_bound(level);
            for i in 0..10_000 {
                let t = i as f64 * 0.013;
                let offset = level.offset_at(t);
                assert!(
                    offset.abs() <= bound,
                    "{:?} at t={t} produced {offset}, bound {bound}",
                    level
                );
            }
        }
    }

    #[test]
    fn test_offset_continuous_in_time() {
        // The steepest waveform (Professional) has |d offset/dt| <= 2.5*2.5 + 1.2*5.0,
        // so a 1 ms step can move the offset by at most ~0.0123.
        for level in FlameLevel::ALL {
            for i in 0..5_000 {
                let t = i as f64 * 0.02;
                let delta = (level.offset_at(t + 0.001) - level.offset_at(t)).abs();
                assert!(delta < 0.02, "{:?} jumped by {delta} at t={t}", level);
            }
        }
    }

    #[test]
    fn test_offset_pure_in_time() {
        let t = 17.3;
        assert_relative_eq!(
            FlameLevel::Beginner.offset_at(t),
            (t * 0.5).sin() * 1.5 + (t * 1.2).sin() * 0.75
        );
    }

    #[test]
    fn test_level_switch_takes_effect_next_sample() {
        let t0 = Instant::now();
        let mut animator = FlameAnimator::new(t0);
        let later = t0 + Duration::from_millis(1250);

        animator.sample(later);
        assert_relative_eq!(animator.offset(), FlameLevel::Beginner.offset_at(1.25));

        animator.set_level(FlameLevel::Professional);
        animator.sample(later);
        assert_relative_eq!(animator.offset(), FlameLevel::Professional.offset_at(1.25));
    }

    #[test]
    fn test_animator_holds_latest_sample() {
        let t0 = Instant::now();
        let mut animator = FlameAnimator::new(t0);
        let sampled = animator.sample(t0 + Duration::from_millis(500));
        assert_relative_eq!(sampled, animator.offset());
    }
}

use std::time::{Duration, Instant};

/// How long the overlay controls stay up after the last pointer motion.
const CONTROLS_HIDE_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Setup screen: level selection and audio management. Controls are
    /// always visible here.
    Setup,
    /// Full-screen meditation. The elapsed clock runs and overlay
    /// controls auto-hide after inactivity.
    Active,
}

/// The session state machine and its two timers (elapsed clock, controls
/// auto-hide). Both timers are deadline/accumulator fields sampled with
/// an explicit `now`, so cancellation is clearing the field and every
/// exit path tears them down the same way.
#[derive(Debug, Clone)]
pub struct SessionState {
    phase: SessionPhase,
    elapsed: Duration,
    last_tick: Option<Instant>,
    controls_visible: bool,
    hide_controls_at: Option<Instant>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            phase: SessionPhase::Setup,
            elapsed: Duration::ZERO,
            last_tick: None,
            controls_visible: true,
            hide_controls_at: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Whole seconds spent in the current session.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Setup -> Active. The elapsed clock restarts from zero on every
    /// entry; it is a per-session counter. Ignored while already active.
    pub fn start(&mut self, now: Instant) {
        if self.phase == SessionPhase::Active {
            return;
        }
        self.phase = SessionPhase::Active;
        self.elapsed = Duration::ZERO;
        self.last_tick = Some(now);
        self.controls_visible = false;
        self.hide_controls_at = None;
        tracing::info!("session started");
    }

    /// Active -> Setup. Clears the pending auto-hide deadline so nothing
    /// fires into setup state, and stops the elapsed clock. Ignored while
    /// already in setup.
    pub fn end(&mut self) {
        if self.phase == SessionPhase::Setup {
            return;
        }
        self.phase = SessionPhase::Setup;
        self.last_tick = None;
        self.controls_visible = true;
        self.hide_controls_at = None;
        tracing::info!(elapsed_secs = self.elapsed.as_secs(), "session ended");
    }

    /// Pointer motion during an active session shows the controls and
    /// restarts the 3 second hide window from this instant.
    pub fn pointer_motion(&mut self, now: Instant) {
        if self.phase != SessionPhase::Active {
            return;
        }
        self.controls_visible = true;
        self.hide_controls_at = Some(now + CONTROLS_HIDE_DELAY);
    }

    /// Advances the elapsed clock and applies a due auto-hide deadline.
    /// A no-op in setup, so a tick that lands after `end` cannot mutate
    /// anything.
    pub fn tick(&mut self, now: Instant) {
        if self.phase != SessionPhase::Active {
            return;
        }
        if let Some(last) = self.last_tick {
            self.elapsed += now.saturating_duration_since(last);
        }
        self.last_tick = Some(now);

        if let Some(deadline) = self.hide_controls_at {
            if now >= deadline {
                self.controls_visible = false;
                self.hide_controls_at = None;
            }
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_start_resets_clock_and_hides_controls() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        assert_eq!(session.phase(), SessionPhase::Setup);
        assert!(session.controls_visible());

        session.start(t0);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.elapsed_secs(), 0);
        assert!(!session.controls_visible());
    }

    #[test]
    fn test_elapsed_advances_one_second_per_second() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.start(t0);

        session.tick(t0 + secs(1));
        assert_eq!(session.elapsed_secs(), 1);
        session.tick(t0 + Duration::from_millis(2500));
        assert_eq!(session.elapsed_secs(), 2);
        session.tick(t0 + secs(5));
        assert_eq!(session.elapsed_secs(), 5);
    }

    #[test]
    fn test_no_increments_after_end() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.start(t0);
        session.tick(t0 + secs(3));
        session.end();

        session.tick(t0 + secs(60));
        assert_eq!(session.elapsed_secs(), 3);
        assert_eq!(session.phase(), SessionPhase::Setup);
    }

    #[test]
    fn test_restart_begins_at_zero() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.start(t0);
        session.tick(t0 + secs(4));
        session.end();

        session.start(t0 + secs(10));
        assert_eq!(session.elapsed_secs(), 0);
        session.tick(t0 + secs(12));
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn test_end_restores_controls() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.start(t0);
        session.end();
        assert!(session.controls_visible());
    }

    #[test]
    fn test_motion_shows_controls_and_hides_after_delay() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.start(t0);

        session.pointer_motion(t0);
        assert!(session.controls_visible());

        session.tick(t0 + Duration::from_millis(2900));
        assert!(session.controls_visible());
        session.tick(t0 + secs(3));
        assert!(!session.controls_visible());
    }

    #[test]
    fn test_motion_every_second_keeps_controls_visible() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.start(t0);

        for i in 0..30 {
            session.pointer_motion(t0 + secs(i));
            session.tick(t0 + secs(i + 1));
            assert!(session.controls_visible(), "hidden after {} signals", i + 1);
        }
    }

    #[test]
    fn test_hide_window_restarts_from_latest_motion() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.start(t0);

        session.pointer_motion(t0);
        session.pointer_motion(t0 + secs(2));
        // 3s past the first signal but only 1s past the second.
        session.tick(t0 + secs(3));
        assert!(session.controls_visible());
        session.tick(t0 + secs(5));
        assert!(!session.controls_visible());
    }

    #[test]
    fn test_end_cancels_pending_hide() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.start(t0);
        session.pointer_motion(t0);
        session.end();

        // The deadline would have fired by now; controls must stay up in setup.
        session.tick(t0 + secs(10));
        assert!(session.controls_visible());
    }

    #[test]
    fn test_motion_ignored_in_setup() {
        let t0 = Instant::now();
        let mut session = SessionState::new();
        session.pointer_motion(t0);
        session.tick(t0 + secs(10));
        assert!(session.controls_visible());
    }
}

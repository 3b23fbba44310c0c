use eframe::egui;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::playback::player::AudioPlayer;
use crate::types::audio_source::AudioSource;
use crate::types::flame::FlameAnimator;
use crate::types::playback_state::PlaybackState;
use crate::types::session::{SessionPhase, SessionState};
use crate::ui::session_screen::{self, SessionEvent};
use crate::ui::setup_screen::{self, SetupEvent};

/// Cadence of the flame animation; the repaint request keeps the sway
/// sampled at this rate whether or not a session is running.
const FLAME_TICK: Duration = Duration::from_millis(50);

pub struct AppState {
    pub session: SessionState,
    pub flame: FlameAnimator,
    pub playback: PlaybackState,
    pub player: AudioPlayer,
    pub audio: Option<AudioSource>,
    epoch: Instant,
}

impl AppState {
    pub fn new(now: Instant) -> Self {
        AppState {
            session: SessionState::new(),
            flame: FlameAnimator::new(now),
            playback: PlaybackState::new(),
            player: AudioPlayer::new(),
            audio: None,
            epoch: now,
        }
    }

    /// Wall-clock seconds since launch, used for the glow pulse.
    fn uptime_secs(&self, now: Instant) -> f64 {
        now.duration_since(self.epoch).as_secs_f64()
    }

    /// Setup -> Active. The play command lands in the same mutation scope
    /// as the phase change, so no frame can observe an active session
    /// with the audio still paused.
    fn start_session(&mut self, now: Instant) {
        self.session.start(now);
        if self.audio.is_some() {
            self.player.play(&mut self.playback);
        }
    }

    /// Active -> Setup. Pauses the transport whether or not anything is
    /// loaded; `is_playing` is false from here on either way.
    fn end_session(&mut self) {
        self.session.end();
        self.player.pause(&mut self.playback);
    }

    /// Loads a picked file. Non-audio or unprobeable selections are
    /// dropped silently, leaving the current resource untouched.
    fn load_audio(&mut self, path: &Path) {
        let Some(source) = AudioSource::from_path(path) else {
            tracing::debug!(path = %path.display(), "non-audio selection ignored");
            return;
        };
        match self.player.load(&source.path, &mut self.playback) {
            Ok(()) => self.audio = Some(source),
            Err(err) => {
                tracing::debug!(%err, "audio selection rejected");
                // A failure after the old pipeline was torn down leaves
                // the player empty; the descriptor must not outlive it.
                if !self.player.is_loaded() {
                    self.audio = None;
                }
            }
        }
    }

    fn remove_audio(&mut self) {
        self.player.release(&mut self.playback);
        self.audio = None;
        tracing::info!("audio removed");
    }
}

pub struct TratakApp {
    pub state: AppState,
}

impl TratakApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TratakApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let state = &mut self.state;

        // Per-frame ticking: flame sway (always), session clock and
        // auto-hide (active only), transport snapshot.
        state.flame.sample(now);
        state.session.tick(now);
        state.player.poll(&mut state.playback);
        if state.audio.is_some() && !state.player.is_loaded() {
            // The transport hit a decode error and released itself.
            state.audio = None;
        }

        if state.session.is_active() {
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                state.end_session();
            }
            if ctx.input(|i| i.pointer.delta() != egui::Vec2::ZERO) {
                state.session.pointer_motion(now);
            }
        }

        let t = state.uptime_secs(now);
        match state.session.phase() {
            SessionPhase::Setup => {
                let events = setup_screen::show(
                    ctx,
                    state.flame.level(),
                    state.flame.offset(),
                    t,
                    state.audio.as_ref(),
                    &state.playback,
                );
                for event in events {
                    match event {
                        SetupEvent::LevelSelected(level) => state.flame.set_level(level),
                        SetupEvent::BeginSession => state.start_session(now),
                        SetupEvent::AudioFilePicked(path) => state.load_audio(&path),
                        SetupEvent::TogglePlayback => state.player.toggle(&mut state.playback),
                        SetupEvent::RemoveAudio => state.remove_audio(),
                    }
                }
            }
            SessionPhase::Active => {
                let events = session_screen::show(
                    ctx,
                    state.flame.offset(),
                    t,
                    state.session.elapsed_secs(),
                    state.session.controls_visible(),
                );
                for event in events {
                    match event {
                        SessionEvent::EndSession => state.end_session(),
                    }
                }
            }
        }

        ctx.request_repaint_after(FLAME_TICK);
    }
}

use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_pbutils as gst_pbutils;
use gstreamer_pbutils::prelude::*;

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::playback_state::PlaybackState;

/// How long the discoverer may spend probing a selected file.
const DISCOVER_TIMEOUT_SECS: u64 = 5;

fn clocktime_secs(t: gst::ClockTime) -> f64 {
    t.nseconds() as f64 / 1_000_000_000.0
}

/// GStreamer-backed transport for the single ambient-audio slot.
///
/// Owns at most one `playbin` pipeline. Loading a new file shuts the
/// previous pipeline down before the replacement is built, so no stale
/// handle outlives a swap. All methods run on the UI thread; `poll` is
/// called once per frame and never blocks.
pub struct AudioPlayer {
    pipeline: Option<gst::Element>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        AudioPlayer { pipeline: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Probes `path` and replaces the current pipeline with one for it.
    ///
    /// A file that fails the probe or carries no audio stream is rejected
    /// before the current resource is touched. On success the previous
    /// pipeline is released, the playback snapshot is reset, and the
    /// probed duration is filled in.
    pub fn load(&mut self, path: &Path, state: &mut PlaybackState) -> Result<()> {
        let uri = gst::glib::filename_to_uri(path, None)
            .map_err(|e| Error::Discover(e.to_string()))?;

        let discoverer =
            gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(DISCOVER_TIMEOUT_SECS))
                .map_err(|e| Error::Discover(e.to_string()))?;
        let info = discoverer
            .discover_uri(&uri)
            .map_err(|e| Error::Discover(e.to_string()))?;
        if info.audio_streams().is_empty() {
            return Err(Error::NotAudio(path.display().to_string()));
        }

        self.release(state);

        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", uri.as_str())
            .build()
            .map_err(|e| Error::Pipeline(e.to_string()))?;
        playbin
            .set_state(gst::State::Paused)
            .map_err(|e| Error::Pipeline(e.to_string()))?;

        state.duration_secs = info.duration().map(clocktime_secs).unwrap_or(0.0);
        self.pipeline = Some(playbin);
        tracing::info!(
            path = %path.display(),
            duration_secs = state.duration_secs,
            "audio loaded"
        );
        Ok(())
    }

    /// Starts playback. A no-op when nothing is loaded.
    pub fn play(&mut self, state: &mut PlaybackState) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        match pipeline.set_state(gst::State::Playing) {
            Ok(_) => state.is_playing = true,
            Err(err) => tracing::warn!(%err, "could not start playback"),
        }
    }

    /// Pauses playback. `is_playing` drops to false even when nothing is
    /// loaded, which is what ending a session relies on.
    pub fn pause(&mut self, state: &mut PlaybackState) {
        if let Some(pipeline) = &self.pipeline {
            if let Err(err) = pipeline.set_state(gst::State::Paused) {
                tracing::warn!(%err, "could not pause playback");
            }
        }
        state.is_playing = false;
    }

    /// Play if paused, pause if playing. A no-op when nothing is loaded.
    pub fn toggle(&mut self, state: &mut PlaybackState) {
        if self.pipeline.is_none() {
            return;
        }
        if state.is_playing {
            self.pause(state);
        } else {
            self.play(state);
        }
    }

    /// Per-frame service: refreshes position (and duration, until known)
    /// from the pipeline and drains the bus. End-of-stream rewinds to the
    /// start rather than parking at end-of-track; a transport error
    /// releases the resource entirely.
    pub fn poll(&mut self, state: &mut PlaybackState) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };

        if let Some(pos) = pipeline.query_position::<gst::ClockTime>() {
            state.position_secs = clocktime_secs(pos);
        }
        if state.duration_secs <= 0.0 {
            if let Some(dur) = pipeline.query_duration::<gst::ClockTime>() {
                state.duration_secs = clocktime_secs(dur);
            }
        }

        let mut transport_failed = false;
        if let Some(bus) = pipeline.bus() {
            while let Some(msg) = bus.pop() {
                match msg.view() {
                    gst::MessageView::Eos(..) => {
                        let _ = pipeline.set_state(gst::State::Paused);
                        let _ = pipeline.seek_simple(
                            gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
                            gst::ClockTime::ZERO,
                        );
                        state.is_playing = false;
                        state.position_secs = 0.0;
                    }
                    gst::MessageView::Error(err) => {
                        tracing::warn!(error = %err.error(), "transport error, releasing audio");
                        transport_failed = true;
                    }
                    _ => {}
                }
            }
        }
        if transport_failed {
            self.release(state);
        }
    }

    /// Tears the pipeline down and clears the playback snapshot. Safe to
    /// call when nothing is loaded.
    pub fn release(&mut self, state: &mut PlaybackState) {
        if let Some(pipeline) = self.pipeline.take() {
            if let Err(err) = pipeline.set_state(gst::State::Null) {
                tracing::warn!(%err, "pipeline teardown failed");
            }
        }
        state.reset();
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        if let Some(pipeline) = self.pipeline.take() {
            let _ = pipeline.set_state(gst::State::Null);
        }
    }
}

mod error;
mod playback;
mod types;
mod ui;

use eframe::egui;
use gstreamer as gst;
use tracing_subscriber::EnvFilter;

use crate::ui::app::{AppState, TratakApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    // The app runs without audio if GStreamer is unavailable; the
    // transport just never loads anything.
    if let Err(err) = gst::init() {
        tracing::warn!(%err, "GStreamer unavailable, running without audio");
    }

    let app = TratakApp::new(AppState::new(std::time::Instant::now()));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tratak Meditation")
            .with_inner_size([720.0, 920.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Tratak Meditation",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

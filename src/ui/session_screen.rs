use eframe::egui;
use eframe::egui::{Align2, Color32, RichText};

use crate::types::playback_state::format_clock;
use crate::ui::flame_widget;

/// User intents emitted by the full-screen session view.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    EndSession,
}

pub fn show(
    ctx: &egui::Context,
    flame_offset: f64,
    t: f64,
    elapsed_secs: u64,
    controls_visible: bool,
) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(Color32::BLACK))
        .show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                let height = (ui.available_height() * 0.55).clamp(220.0, 420.0);
                flame_widget::candle(ui, height, flame_offset, t);
            });
        });

    if controls_visible {
        egui::Area::new(egui::Id::new("session_exit"))
            .anchor(Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
            .show(ctx, |ui| {
                let exit = egui::Button::new(
                    RichText::new("\u{2715}").size(20.0).color(Color32::WHITE),
                )
                .fill(Color32::from_rgba_unmultiplied(255, 255, 255, 26))
                .corner_radius(egui::CornerRadius::same(25))
                .min_size(egui::vec2(50.0, 50.0));
                if ui.add(exit).clicked() {
                    events.push(SessionEvent::EndSession);
                }
            });

        egui::Area::new(egui::Id::new("session_clock"))
            .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 24.0))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format_clock(elapsed_secs as f64))
                        .size(18.0)
                        .color(Color32::from_rgba_unmultiplied(255, 255, 255, 140)),
                );
            });
    } else {
        // No controls on screen, no cursor either.
        ctx.set_cursor_icon(egui::CursorIcon::None);
    }

    events
}

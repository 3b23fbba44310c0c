use eframe::egui;
use eframe::egui::{Color32, RichText};
use std::path::PathBuf;

use crate::types::audio_source::{AUDIO_EXTENSIONS, AudioSource};
use crate::types::flame::FlameLevel;
use crate::types::playback_state::{PlaybackState, format_clock};
use crate::ui::flame_widget;

/// User intents emitted by the setup screen, applied by the app after
/// the frame is drawn.
#[derive(Debug, Clone)]
pub enum SetupEvent {
    LevelSelected(FlameLevel),
    BeginSession,
    AudioFilePicked(PathBuf),
    TogglePlayback,
    RemoveAudio,
}

const BACKDROP: Color32 = Color32::from_rgb(238, 242, 255);
const CARD: Color32 = Color32::from_rgb(250, 250, 252);
const ACCENT: Color32 = Color32::from_rgb(79, 70, 229);
const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);

pub fn show(
    ctx: &egui::Context,
    level: FlameLevel,
    flame_offset: f64,
    t: f64,
    audio: Option<&AudioSource>,
    playback: &PlaybackState,
) -> Vec<SetupEvent> {
    let mut events = Vec::new();

    egui::CentralPanel::default()
        .frame(
            egui::Frame::new()
                .fill(BACKDROP)
                .inner_margin(egui::Margin::same(20)),
        )
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(600.0);

                    ui.add_space(24.0);
                    ui.heading(
                        RichText::new("\u{1F441} Tratak Meditation")
                            .size(32.0)
                            .color(Color32::from_rgb(55, 65, 81)),
                    );
                    ui.label(
                        RichText::new(
                            "Focus your gaze on the flame to calm the mind and deepen concentration",
                        )
                        .color(TEXT_MUTED),
                    );
                    ui.add_space(28.0);

                    card(ui, |ui| {
                        flame_widget::candle(ui, 180.0, flame_offset, t);
                        ui.add_space(18.0);

                        ui.label(
                            RichText::new("Choose Your Focus Level")
                                .size(16.0)
                                .color(Color32::from_rgb(75, 85, 99)),
                        );
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            // Center the row of three pills by hand.
                            let row_width = 330.0;
                            ui.add_space((ui.available_width() - row_width).max(0.0) / 2.0);
                            for candidate in FlameLevel::ALL {
                                if level_pill(ui, candidate, candidate == level) {
                                    events.push(SetupEvent::LevelSelected(candidate));
                                }
                            }
                        });
                        ui.add_space(20.0);

                        let begin = egui::Button::new(
                            RichText::new("Begin Meditation")
                                .size(16.0)
                                .color(Color32::WHITE),
                        )
                        .fill(ACCENT)
                        .corner_radius(egui::CornerRadius::same(22))
                        .min_size(egui::vec2(200.0, 44.0));
                        if ui.add(begin).clicked() {
                            events.push(SetupEvent::BeginSession);
                        }
                    });

                    ui.add_space(20.0);

                    card(ui, |ui| {
                        ui.label(
                            RichText::new("Meditation Audio")
                                .size(18.0)
                                .color(Color32::from_rgb(55, 65, 81)),
                        );
                        ui.add_space(10.0);
                        match audio {
                            None => {
                                if ui
                                    .button(RichText::new("\u{2B06} Upload Audio").size(15.0))
                                    .clicked()
                                {
                                    if let Some(path) = rfd::FileDialog::new()
                                        .add_filter("Audio", &AUDIO_EXTENSIONS)
                                        .pick_file()
                                    {
                                        events.push(SetupEvent::AudioFilePicked(path));
                                    }
                                }
                                ui.add_space(6.0);
                                ui.label(
                                    RichText::new(
                                        "Upload your meditation music or ambient sounds",
                                    )
                                    .size(13.0)
                                    .color(TEXT_MUTED),
                                );
                            }
                            Some(source) => {
                                ui.label(
                                    RichText::new(&source.file_name)
                                        .size(13.0)
                                        .color(TEXT_MUTED),
                                );
                                ui.add_space(6.0);
                                ui.add(
                                    egui::ProgressBar::new(playback.progress_ratio())
                                        .desired_height(6.0)
                                        .fill(ACCENT),
                                );
                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(format_clock(playback.position_secs))
                                            .size(12.0)
                                            .color(TEXT_MUTED),
                                    );
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            ui.label(
                                                RichText::new(format_clock(
                                                    playback.duration_secs,
                                                ))
                                                .size(12.0)
                                                .color(TEXT_MUTED),
                                            );
                                        },
                                    );
                                });
                                ui.add_space(10.0);
                                ui.horizontal(|ui| {
                                    ui.add_space((ui.available_width() - 160.0).max(0.0) / 2.0);
                                    let glyph = if playback.is_playing {
                                        "\u{23F8}"
                                    } else {
                                        "\u{25B6}"
                                    };
                                    let transport = egui::Button::new(
                                        RichText::new(glyph).size(18.0).color(Color32::WHITE),
                                    )
                                    .fill(ACCENT)
                                    .corner_radius(egui::CornerRadius::same(24))
                                    .min_size(egui::vec2(48.0, 48.0));
                                    if ui.add(transport).clicked() {
                                        events.push(SetupEvent::TogglePlayback);
                                    }
                                    if ui
                                        .button(RichText::new("Change Audio").color(TEXT_MUTED))
                                        .clicked()
                                    {
                                        events.push(SetupEvent::RemoveAudio);
                                    }
                                });
                            }
                        }
                    });

                    ui.add_space(24.0);
                    ui.label(
                        RichText::new(
                            "Sit comfortably and gaze softly at the flame without blinking. \
                             When your eyes tire, close them and visualize the flame in your \
                             mind's eye. You can open your eyes again when you feel better.",
                        )
                        .size(13.0)
                        .color(TEXT_MUTED),
                    );
                    ui.add_space(24.0);
                });
            });
        });

    events
}

fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(CARD)
        .corner_radius(egui::CornerRadius::same(18))
        .inner_margin(egui::Margin::same(30))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(add_contents);
        });
}

fn level_pill(ui: &mut egui::Ui, level: FlameLevel, selected: bool) -> bool {
    let (fill, text) = if selected {
        (ACCENT, Color32::WHITE)
    } else {
        (Color32::WHITE, Color32::from_rgb(75, 85, 99))
    };
    let button = egui::Button::new(RichText::new(level.label()).size(14.0).color(text))
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(18))
        .min_size(egui::vec2(100.0, 36.0));
    ui.add(button).clicked()
}

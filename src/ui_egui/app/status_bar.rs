//! Status bar showing the active universe, event counts and gesture hints.

use super::ResourceCalendarApp;
use crate::services::store::Mode;
use crate::ui_egui::gesture::ActiveGesture;
use crate::ui_egui::views::utils::format_range;
use egui::{Color32, RichText};

/// Get theme-aware secondary text color
fn secondary_text_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_gray(160)
    } else {
        Color32::from_gray(100)
    }
}

fn warning_text_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_rgb(240, 180, 90)
    } else {
        Color32::from_rgb(170, 100, 20)
    }
}

impl ResourceCalendarApp {
    /// Render the status bar at the bottom of the window
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let is_dark = self.active_theme.is_dark;
        let secondary = secondary_text_color(is_dark);

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let mode = self.store.mode();
                    ui.label(RichText::new(mode.label()).strong());
                    ui.separator();
                    ui.label(
                        RichText::new(format!(
                            "{} derived · {} sandbox",
                            self.store.derived().len(),
                            self.store.sandbox().len()
                        ))
                        .color(secondary),
                    );
                    if self.commits.get() > 0 {
                        ui.separator();
                        ui.label(
                            RichText::new(format!("{} sandbox edit(s)", self.commits.get()))
                                .color(secondary),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let hint = match self.controller.active() {
                            ActiveGesture::Moving(session, _) => match session.hovered_range() {
                                Some((start, end)) => format!("Drop to place on {}", format_range(start, end)),
                                None => "Release over a day to drop".to_string(),
                            },
                            ActiveGesture::Resizing(session, _) => {
                                let end = session.preview_end.unwrap_or(session.original_end);
                                format!("Ends {}", format_range(end, end))
                            }
                            ActiveGesture::None if mode == Mode::Derived => {
                                "Read-only. Switch to Sandbox to edit".to_string()
                            }
                            ActiveGesture::None => "Drag to move · drag the right edge to resize".to_string(),
                        };
                        ui.label(RichText::new(hint).color(secondary));

                        if let Some(refusal) = &self.last_refusal {
                            ui.separator();
                            ui.label(RichText::new(refusal.to_string()).color(warning_text_color(is_dark)));
                        }
                    });
                });
            });
    }
}

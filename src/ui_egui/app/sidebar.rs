//! Sidebar with the roster. In sandbox mode each entry is a drag source that
//! drops a new single-day allocation onto the grid.

use super::ResourceCalendarApp;
use crate::services::store::Mode;
use crate::ui_egui::views::utils::parse_color;
use crate::ui_egui::presentation::DEFAULT_EVENT_COLOR;
use crate::ui_egui::theme::CalendarTheme;
use crate::utils::date::{first_of_month, last_of_month};
use egui::{CursorIcon, RichText, Sense, Stroke, Vec2};

const SIDEBAR_MIN_WIDTH: f32 = 150.0;
const SIDEBAR_DEFAULT_WIDTH: f32 = 180.0;
const SWATCH_SIZE: f32 = 12.0;

impl ResourceCalendarApp {
    pub(super) fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("roster_sidebar")
            .default_width(SIDEBAR_DEFAULT_WIDTH)
            .min_width(SIDEBAR_MIN_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.label(RichText::new("Team").strong());
                ui.add_space(4.0);

                let sandbox = self.store.mode() == Mode::Sandbox;
                if sandbox {
                    ui.label(
                        RichText::new("Drag a name onto a day to allocate")
                            .small()
                            .color(self.active_theme.text_secondary),
                    );
                    ui.add_space(4.0);
                }

                let month_first = first_of_month(self.store.active_date());
                let month_last = last_of_month(self.store.active_date());

                for resource in self.roster.iter() {
                    let booked = self
                        .store
                        .active_events()
                        .iter()
                        .filter(|e| e.resource_id == resource.id && e.overlaps(month_first, month_last))
                        .count();
                    let color = parse_color(&resource.color).unwrap_or(DEFAULT_EVENT_COLOR);

                    ui.horizontal(|ui| {
                        let (swatch, _) =
                            ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::hover());
                        ui.painter().rect_filled(swatch, 3.0, color);

                        let sense = if sandbox { Sense::drag() } else { Sense::hover() };
                        let chip = ui
                            .add(
                                egui::Button::new(resource.name.as_str())
                                    .stroke(Stroke::new(1.0, color))
                                    .sense(sense),
                            )
                            .on_hover_text(format!(
                                "{} allocation(s) this month\nColour {}",
                                booked,
                                CalendarTheme::color_to_hex(color)
                            ));

                        if sandbox && chip.hovered() && !self.controller.is_active() {
                            ctx.set_cursor_icon(CursorIcon::Grab);
                        }
                        if chip.drag_started() {
                            if let Err(err) = self
                                .controller
                                .begin_new_allocation(&self.store, resource.id.clone())
                            {
                                log::debug!("new allocation refused: {}", err);
                                self.last_refusal = Some(err);
                            }
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(booked.to_string())
                                    .small()
                                    .color(self.active_theme.text_secondary),
                            );
                        });
                    });
                }
            });
    }
}

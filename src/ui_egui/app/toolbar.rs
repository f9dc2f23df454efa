//! Top bar: month navigation and the universe switch.

use super::ResourceCalendarApp;
use crate::services::store::Mode;
use egui::RichText;

impl ResourceCalendarApp {
    pub(super) fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("◀").on_hover_text("Previous month").clicked() {
                    self.controller.cancel();
                    self.store.previous_month();
                }
                if ui.button("Today").clicked() {
                    self.controller.cancel();
                    self.store.go_to_today();
                }
                if ui.button("▶").on_hover_text("Next month").clicked() {
                    self.controller.cancel();
                    self.store.next_month();
                }

                ui.add_space(12.0);
                ui.label(
                    RichText::new(self.store.active_date().format("%B %Y").to_string())
                        .heading()
                        .strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut mode = self.store.mode();
                    ui.selectable_value(&mut mode, Mode::Sandbox, Mode::Sandbox.label())
                        .on_hover_text("Editable copy for what-if planning");
                    ui.selectable_value(&mut mode, Mode::Derived, Mode::Derived.label())
                        .on_hover_text("Read-only allocations from the feed");
                    self.switch_mode(mode);

                    if self.store.mode() == Mode::Sandbox {
                        ui.separator();
                        if ui
                            .button("Import real data to sandbox")
                            .on_hover_text("Discard sandbox edits and copy the derived allocations")
                            .clicked()
                        {
                            self.controller.cancel();
                            self.store.reset_sandbox_from_derived();
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });
    }
}

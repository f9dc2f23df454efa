use std::cell::Cell;
use std::rc::Rc;

use super::ResourceCalendarApp;
use crate::models::event::CalendarEvent;
use crate::models::resource::Roster;
use crate::models::settings::Settings;
use crate::services::store::{EventStore, Mode, StoreChange};
use crate::ui_egui::gesture::InteractionController;
use crate::ui_egui::theme::CalendarTheme;
use crate::ui_egui::views::month_view::MonthView;
use crate::utils::date::today;

impl ResourceCalendarApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        roster: Roster,
        derived: Vec<CalendarEvent>,
    ) -> Self {
        let mut store = EventStore::new(today());
        store.replace_derived_events(derived);
        store.reset_sandbox_from_derived();
        if settings.start_mode == Mode::Sandbox {
            store.set_mode(Mode::Sandbox);
        }

        let commits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&commits);
        store.subscribe(move |change: &StoreChange| match change {
            StoreChange::SandboxAdded(id)
            | StoreChange::SandboxUpdated(id)
            | StoreChange::SandboxRemoved(id) => {
                counter.set(counter.get() + 1);
                log::info!("sandbox commit: {:?} (event {})", change, id);
            }
            StoreChange::DerivedReplaced { count } | StoreChange::SandboxReset { count } => {
                log::info!("{:?}: {} events", change, count);
            }
            StoreChange::ActiveDate(_) | StoreChange::Mode(_) => {}
        });

        log::info!(
            "Loaded {} resources and {} allocations, starting in {} mode",
            roster.len(),
            store.derived().len(),
            store.mode().label()
        );

        let active_theme = CalendarTheme::from_setting(&settings.theme);
        active_theme.apply_to_context(&cc.egui_ctx);

        Self {
            controller: InteractionController::new(settings.default_cell_width),
            settings,
            active_theme,
            store,
            roster,
            commits,
            last_refusal: None,
        }
    }

    /// Switch universes. A gesture in flight belongs to the grid being
    /// replaced, so it is torn down first.
    pub(super) fn switch_mode(&mut self, mode: Mode) {
        if mode == self.store.mode() {
            return;
        }
        self.controller.cancel();
        self.last_refusal = None;
        self.store.set_mode(mode);
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_toolbar(ctx);

        // Status bar and sidebar before CentralPanel so they take their space
        self.render_status_bar(ctx);
        self.render_sidebar(ctx);

        let panel_frame = egui::Frame::central_panel(&ctx.style())
            .outer_margin(egui::Margin::ZERO)
            .inner_margin(egui::Margin::same(8.0));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let result = MonthView::show(
                    ui,
                    &mut self.store,
                    &mut self.controller,
                    &self.roster,
                    &self.settings,
                    &self.active_theme,
                );
                if let Some(refused) = result.refused {
                    self.last_refusal = Some(refused);
                }
                if result.committed {
                    self.last_refusal = None;
                }
            });
    }
}

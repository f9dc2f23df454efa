mod lifecycle;
mod sidebar;
mod status_bar;
mod toolbar;

use std::cell::Cell;
use std::rc::Rc;

use crate::models::resource::Roster;
use crate::models::settings::Settings;
use crate::services::store::EventStore;
use crate::ui_egui::gesture::{GestureError, InteractionController};
use crate::ui_egui::theme::CalendarTheme;

pub struct ResourceCalendarApp {
    /// Loaded once at startup; the app never writes settings back
    settings: Settings,
    /// Currently applied theme colors
    active_theme: CalendarTheme,
    store: EventStore,
    roster: Roster,
    controller: InteractionController,
    /// Sandbox mutations committed since startup, fed by the store's commit hook
    commits: Rc<Cell<usize>>,
    /// Last gesture start the controller refused, shown in the status bar
    last_refusal: Option<GestureError>,
}

impl eframe::App for ResourceCalendarApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }
}

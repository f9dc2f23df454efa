// Resource Calendar Application
// Main entry point

use anyhow::anyhow;
use resource_calendar::models::event::CalendarEvent;
use resource_calendar::models::resource::Roster;
use resource_calendar::models::settings::Settings;
use resource_calendar::services::import::{demo_data, load_feed, load_roster};
use resource_calendar::services::settings::SettingsService;
use resource_calendar::ui_egui::ResourceCalendarApp;
use resource_calendar::utils::date::today;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Resource Calendar");

    let settings = match SettingsService::from_project_dirs() {
        Some(service) => {
            log::info!("Settings file: {}", service.path().display());
            service.load_or_default()
        }
        None => {
            log::warn!("No config directory available, using default settings");
            Settings::default()
        }
    };

    let (roster, events) = load_calendar_data(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Resource Calendar",
        options,
        Box::new(move |cc| Ok(Box::new(ResourceCalendarApp::new(cc, settings, roster, events)))),
    )
    .map_err(|err| anyhow!("failed to run the calendar window: {err}"))
}

/// Roster and feed from the configured paths, falling back to the built-in
/// demo data for whichever part is missing or unreadable.
fn load_calendar_data(settings: &Settings) -> (Roster, Vec<CalendarEvent>) {
    let (demo_roster, demo_events) = demo_data(today());

    let roster = match &settings.roster_path {
        Some(path) => match load_roster(path) {
            Ok(roster) => roster,
            Err(err) => {
                log::warn!("Failed to load roster, using demo roster: {:#}", err);
                demo_roster
            }
        },
        None => demo_roster,
    };

    let events = match &settings.feed_path {
        Some(path) => match load_feed(path, &roster) {
            Ok(events) => events,
            Err(err) => {
                log::warn!("Failed to load allocation feed, using demo data: {:#}", err);
                demo_events
            }
        },
        None => {
            log::info!("No feed configured, showing demo allocations");
            demo_events
        }
    };

    (roster, events)
}

//! Common utility functions for calendar views.
//!
//! Pure helpers: color parsing, weekday headers, tooltip text.

use chrono::{Datelike, NaiveDate, Weekday};
use egui::Color32;

use crate::models::event::CalendarEvent;
use crate::models::resource::Roster;

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g., "#FF5500" or "FF5500")
///
/// # Returns
/// * `Some(Color32)` if parsing succeeds
/// * `None` if the input is empty or invalid
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Short weekday names in display order, starting at `week_start`
pub fn weekday_headers(week_start: Weekday) -> [&'static str; 7] {
    const NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let offset = week_start.num_days_from_monday() as usize;
    std::array::from_fn(|i| NAMES[(offset + i) % 7])
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// "3 Mar" or "3 Mar – 7 Mar"
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format("%-d %b").to_string()
    } else {
        format!("{} – {}", start.format("%-d %b"), end.format("%-d %b"))
    }
}

/// Hover text for an event block.
pub fn format_event_tooltip(event: &CalendarEvent, roster: &Roster) -> String {
    let mut lines = vec![event.title.clone()];

    let who = roster
        .get(&event.resource_id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| event.resource_id.to_string());
    lines.push(format!("👤 {}", who));
    lines.push(format!("📅 {}", format_range(event.start, event.end)));
    lines.push(format!("{} · {:?}", event.kind.label(), event.status));

    if let Some(record) = &event.linked_record_id {
        lines.push(format!("🔗 {}", record));
    }

    lines.join("\n")
}

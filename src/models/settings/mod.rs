// Settings module
// User-tunable display settings, persisted as TOML

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::services::store::Mode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// "light", "dark" or "system"
    pub theme: String,
    /// 0 = Sunday ... 6 = Saturday
    pub first_day_of_week: u8,
    /// Height of the day-number strip at the top of each week row
    pub header_height: f32,
    /// Height of one event slot
    pub row_height: f32,
    /// Used when a day cell cannot be measured
    pub default_cell_width: f32,
    /// Slots drawn per week before collapsing into "+N more"
    pub max_visible_slots: usize,
    pub start_mode: Mode,
    pub show_week_numbers: bool,
    /// JSON allocation feed loaded into the derived universe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_path: Option<PathBuf>,
    /// JSON resource roster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
            first_day_of_week: 1, // Monday
            header_height: 22.0,
            row_height: 20.0,
            default_cell_width: 120.0,
            max_visible_slots: 4,
            start_mode: Mode::Derived,
            show_week_numbers: true,
            feed_path: None,
            roster_path: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.theme.as_str(), "light" | "dark" | "system") {
            return Err(format!("Unknown theme: {}", self.theme));
        }
        if self.first_day_of_week > 6 {
            return Err("First day of week must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }
        let header_ok = self.header_height.is_finite() && self.header_height >= 0.0;
        let row_ok = self.row_height.is_finite() && self.row_height > 0.0;
        if !header_ok || !row_ok {
            return Err("Row and header heights must be positive".to_string());
        }
        if !(self.default_cell_width.is_finite() && self.default_cell_width > 0.0) {
            return Err("Default cell width must be positive".to_string());
        }
        if self.max_visible_slots == 0 {
            return Err("At least one slot must be visible".to_string());
        }
        Ok(())
    }

    pub fn week_start(&self) -> Weekday {
        match self.first_day_of_week {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

use crate::ui_egui::theme::CalendarTheme;
use egui::Color32;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct CalendarCellPalette {
    pub regular_bg: Color32,
    pub weekend_bg: Color32,
    pub today_bg: Color32,
    pub out_of_month_bg: Color32,
    pub border: Color32,
    pub today_border: Color32,
    pub text: Color32,
    pub dimmed_text: Color32,
    pub drop_target: Color32,
}

impl CalendarCellPalette {
    pub fn from_theme(theme: &CalendarTheme) -> Self {
        Self {
            regular_bg: theme.day_background,
            weekend_bg: theme.weekend_background,
            today_bg: theme.today_background,
            out_of_month_bg: theme.out_of_month_background,
            border: theme.day_border,
            today_border: theme.today_border,
            text: theme.text_primary,
            dimmed_text: theme.text_secondary,
            drop_target: with_alpha(theme.today_border, if theme.is_dark { 80 } else { 50 }),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HeaderPalette {
    pub header_bg: Color32,
    pub weekend_header_bg: Color32,
    pub header_text: Color32,
    pub border: Color32,
}

impl HeaderPalette {
    pub fn from_theme(theme: &CalendarTheme) -> Self {
        let toward = if theme.is_dark {
            Color32::WHITE
        } else {
            Color32::BLACK
        };
        Self {
            header_bg: theme.header_background,
            weekend_header_bg: blend(theme.header_background, toward, 0.06),
            header_text: theme.header_text,
            border: theme.day_border,
        }
    }
}

/// Translucent copy of an event color for the drag ghost
pub(crate) fn ghost_fill(color: Color32) -> Color32 {
    with_alpha(color, 110)
}

/// Dimmed fill for completed allocations
pub(crate) fn completed_fill(color: Color32, theme: &CalendarTheme) -> Color32 {
    blend(color, theme.calendar_background, 0.45)
}

//! Segment to screen-rectangle projection.
//!
//! Pure geometry: no decisions about what is visible or editable beyond what
//! the segment flags already say.

use egui::{Color32, Pos2, Rect, Rounding, Vec2};

use super::resize::end_handle_rect;
use super::views::utils::parse_color;
use crate::layout::Segment;
use crate::models::event::{CalendarEvent, EventId};
use crate::models::resource::Roster;
use crate::services::store::Mode;

/// Fill used when neither the event nor its resource has a usable color
pub const DEFAULT_EVENT_COLOR: Color32 = Color32::from_rgb(100, 150, 200);
pub const BLOCK_ROUNDING: f32 = 4.0;
/// Gap kept between stacked blocks and at the true ends of an event
pub const BLOCK_GAP: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    /// Day-number strip above the first slot
    pub header_height: f32,
    pub row_height: f32,
    pub cell_width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventBlock {
    pub event_id: EventId,
    pub rect: Rect,
    pub rounding: Rounding,
    pub fill: Color32,
    /// Title, only on the segment holding the event's first day
    pub label: Option<String>,
    /// Hit area of the end handle, sandbox only
    pub resize_handle: Option<Rect>,
}

/// Event color override, then the resource's color, then the default.
pub fn resolve_color(event: &CalendarEvent, roster: &Roster) -> Color32 {
    event
        .color
        .as_deref()
        .and_then(parse_color)
        .or_else(|| roster.color_of(&event.resource_id).and_then(parse_color))
        .unwrap_or(DEFAULT_EVENT_COLOR)
}

/// Corners are squared off on any side where the week boundary clips the event.
pub fn block_rounding(segment: &Segment) -> Rounding {
    let left = if segment.is_start { BLOCK_ROUNDING } else { 0.0 };
    let right = if segment.is_end { BLOCK_ROUNDING } else { 0.0 };
    Rounding {
        nw: left,
        sw: left,
        ne: right,
        se: right,
    }
}

/// Place `segment` in slot `slot` of the week row whose top-left is `origin`.
pub fn project(
    segment: &Segment,
    slot: usize,
    color: Color32,
    origin: Pos2,
    metrics: &GridMetrics,
    mode: Mode,
) -> EventBlock {
    let left_inset = if segment.is_start { BLOCK_GAP } else { 0.0 };
    let right_inset = if segment.is_end { BLOCK_GAP } else { 0.0 };

    let x = origin.x + segment.start_index as f32 * metrics.cell_width + left_inset;
    let y = origin.y + metrics.header_height + slot as f32 * metrics.row_height;
    let width = segment.day_span as f32 * metrics.cell_width - left_inset - right_inset;
    let height = (metrics.row_height - BLOCK_GAP).max(1.0);
    let rect = Rect::from_min_size(Pos2::new(x, y), Vec2::new(width.max(1.0), height));

    EventBlock {
        event_id: segment.event.id,
        rect,
        rounding: block_rounding(segment),
        fill: color,
        label: segment.shows_label().then(|| segment.event.title.clone()),
        resize_handle: (segment.is_end && mode == Mode::Sandbox).then(|| end_handle_rect(rect)),
    }
}

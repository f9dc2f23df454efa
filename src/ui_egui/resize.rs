// Event Resize System
//
// Extends or shortens an event by dragging the handle on its last segment.
// Only the end date moves. Pointer travel is converted into whole days using
// the width of a day cell measured when the gesture starts.

use chrono::NaiveDate;
use egui::{Color32, CursorIcon, Painter, Pos2, Rect, Stroke, Vec2};

use crate::layout::PreviewOverride;
use crate::models::event::{CalendarEvent, EventId};
use crate::services::store::SandboxMutation;
use crate::utils::date::add_days;

/// Width of the resize handle hit area
pub const HANDLE_SIZE: f32 = 8.0;
/// Visual size of the handle bar
pub const HANDLE_VISUAL_SIZE: f32 = 6.0;

pub const RESIZE_CURSOR: CursorIcon = CursorIcon::ResizeHorizontal;

/// State captured at pointer-down and updated on every pointer move.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSession {
    /// The event being resized
    pub event_id: EventId,
    /// Lower bound for the end date
    pub event_start: NaiveDate,
    /// End date before the gesture began
    pub original_end: NaiveDate,
    /// Pointer x at gesture start
    pub start_x: f32,
    /// Pixel width of one day cell
    pub cell_width: f32,
    /// Last accepted end date, if the pointer produced one
    pub preview_end: Option<NaiveDate>,
}

impl ResizeSession {
    /// `measured_cell_width` comes from the rendered grid; when it is missing
    /// or not a usable width, `fallback_cell_width` is used instead.
    pub fn begin(
        event: &CalendarEvent,
        start_x: f32,
        measured_cell_width: Option<f32>,
        fallback_cell_width: f32,
    ) -> Self {
        let cell_width = measured_cell_width
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or_else(|| {
                log::debug!(
                    "day cell not measurable, resizing with {}px cells",
                    fallback_cell_width
                );
                fallback_cell_width
            });

        Self {
            event_id: event.id,
            event_start: event.start,
            original_end: event.end,
            start_x,
            cell_width,
            preview_end: None,
        }
    }

    /// Whole days the pointer has travelled from the start position
    pub fn days_moved(&self, current_x: f32) -> i64 {
        ((current_x - self.start_x) / self.cell_width).round() as i64
    }

    /// Recompute the preview for a new pointer x. Candidates that would end
    /// before the event starts are ignored and the previous preview kept.
    pub fn update(&mut self, current_x: f32) -> Option<NaiveDate> {
        let candidate = add_days(self.original_end, self.days_moved(current_x));
        if candidate >= self.event_start {
            self.preview_end = Some(candidate);
        }
        self.preview_end
    }

    pub fn preview(&self) -> Option<PreviewOverride> {
        self.preview_end.map(|end| PreviewOverride {
            event_id: self.event_id,
            end,
        })
    }

    /// Mutation for the last valid preview, if any
    pub fn finish(&self) -> Option<SandboxMutation> {
        self.preview_end.map(|end| SandboxMutation::ResizeEnd {
            id: self.event_id,
            end,
        })
    }
}

/// Hit area of the end handle, hugging the right edge of an event block
pub fn end_handle_rect(block: Rect) -> Rect {
    let height = block.height().min(20.0);
    Rect::from_center_size(
        Pos2::new(block.right() - HANDLE_SIZE / 2.0, block.center().y),
        Vec2::new(HANDLE_SIZE, height),
    )
}

/// Draw the end handle as a short vertical bar.
pub fn draw_end_handle(painter: &Painter, handle: Rect, hovered: bool, color: Color32) {
    let bar_x = handle.right() - HANDLE_VISUAL_SIZE / 2.0;
    let half = (handle.height() / 2.0 - 3.0).max(2.0);
    let stroke_color = if hovered {
        Color32::WHITE
    } else {
        Color32::from_rgba_unmultiplied(
            color.r().saturating_add(60),
            color.g().saturating_add(60),
            color.b().saturating_add(60),
            color.a(),
        )
    };
    let width = if hovered { 3.0 } else { 2.0 };
    painter.line_segment(
        [
            Pos2::new(bar_x, handle.center().y - half),
            Pos2::new(bar_x, handle.center().y + half),
        ],
        Stroke::new(width, stroke_color),
    );
}

use chrono::{Datelike, NaiveDate};
use egui::{
    Align2, Color32, CursorIcon, FontId, Id, LayerId, Order, Pos2, Rect, Rounding, Sense, Stroke,
    Vec2,
};

use super::palette::{completed_fill, ghost_fill, CalendarCellPalette, HeaderPalette};
use super::utils::{format_event_tooltip, format_range, is_weekend, weekday_headers};
use crate::layout::{build_month_grid, layout_month, WeekLayout};
use crate::models::event::EventStatus;
use crate::models::resource::Roster;
use crate::models::settings::Settings;
use crate::services::store::EventStore;
use crate::ui_egui::gesture::{GestureError, InteractionController};
use crate::ui_egui::presentation::{project, resolve_color, GridMetrics};
use crate::ui_egui::resize::{draw_end_handle, RESIZE_CURSOR};
use crate::ui_egui::theme::CalendarTheme;
use crate::utils::date::today;

/// Width of the week number column
const WEEK_NUMBER_WIDTH: f32 = 35.0;
const WEEKDAY_HEADER_HEIGHT: f32 = 28.0;
/// Space under the last slot of a row
const ROW_PADDING: f32 = 6.0;
/// Rows never collapse below this many slots
const MIN_SLOTS: usize = 2;

/// Result returned from month view
#[derive(Default)]
pub struct MonthViewResult {
    /// A gesture was committed to the store this frame
    pub committed: bool,
    /// Gesture start that was refused this frame
    pub refused: Option<GestureError>,
}

/// Day cell rectangles of the frame being drawn, used for drop hit-testing
#[derive(Default)]
struct DayCells {
    cells: Vec<(Rect, NaiveDate)>,
}

impl DayCells {
    fn date_at(&self, pos: Pos2) -> Option<NaiveDate> {
        self.cells
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, date)| *date)
    }
}

pub struct MonthView;

impl MonthView {
    pub fn show(
        ui: &mut egui::Ui,
        store: &mut EventStore,
        controller: &mut InteractionController,
        roster: &Roster,
        settings: &Settings,
        theme: &CalendarTheme,
    ) -> MonthViewResult {
        let mut result = MonthViewResult::default();
        let today = today();

        let rows = build_month_grid(store.active_date(), settings.week_start());
        let preview = controller.preview();
        let layouts = layout_month(&rows, store.active_events(), preview.as_ref());

        let week_col = if settings.show_week_numbers {
            WEEK_NUMBER_WIDTH
        } else {
            0.0
        };
        let grid_width = ui.available_width();
        let cell_width = ((grid_width - week_col) / 7.0).floor();
        let measured_cell_width = (cell_width > 0.0).then_some(cell_width);
        let metrics = GridMetrics {
            header_height: settings.header_height,
            row_height: settings.row_height,
            cell_width: cell_width.max(1.0),
        };

        Self::draw_weekday_header(ui, settings, theme, week_col, metrics.cell_width);

        let palette = CalendarCellPalette::from_theme(theme);
        let mut day_cells = DayCells::default();
        let drop_range = controller.move_session().and_then(|s| s.hovered_range());

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (row_index, layout) in layouts.iter().enumerate() {
                    let visible_slots = layout
                        .slot_count()
                        .min(settings.max_visible_slots)
                        .max(MIN_SLOTS);
                    let hidden = layout.hidden_per_day(settings.max_visible_slots);
                    let overflow_line = if hidden.iter().any(|n| *n > 0) {
                        settings.row_height
                    } else {
                        0.0
                    };
                    let row_height = settings.header_height
                        + visible_slots as f32 * settings.row_height
                        + overflow_line
                        + ROW_PADDING;

                    let (row_rect, _) = ui.allocate_exact_size(
                        Vec2::new(week_col + metrics.cell_width * 7.0, row_height),
                        Sense::hover(),
                    );
                    let origin = Pos2::new(row_rect.left() + week_col, row_rect.top());

                    if settings.show_week_numbers {
                        let week_rect = Rect::from_min_size(
                            row_rect.min,
                            Vec2::new(WEEK_NUMBER_WIDTH, row_height),
                        );
                        ui.painter().text(
                            week_rect.center_top() + Vec2::new(0.0, 6.0),
                            Align2::CENTER_TOP,
                            layout.row.iso_week().to_string(),
                            FontId::proportional(11.0),
                            palette.dimmed_text,
                        );
                    }

                    for (column, day) in layout.row.days().iter().enumerate() {
                        let cell = Rect::from_min_size(
                            origin + Vec2::new(column as f32 * metrics.cell_width, 0.0),
                            Vec2::new(metrics.cell_width, row_height),
                        );
                        day_cells.cells.push((cell, day.date));

                        let fill = if !day.in_focus_month {
                            palette.out_of_month_bg
                        } else if day.date == today {
                            palette.today_bg
                        } else if is_weekend(day.date) {
                            palette.weekend_bg
                        } else {
                            palette.regular_bg
                        };
                        let painter = ui.painter();
                        painter.rect_filled(cell, 0.0, fill);
                        painter.rect_stroke(cell, 0.0, Stroke::new(1.0, palette.border));
                        if day.date == today {
                            painter.rect_stroke(
                                cell.shrink(1.0),
                                2.0,
                                Stroke::new(1.5, palette.today_border),
                            );
                        }
                        if drop_range.is_some_and(|(start, end)| start <= day.date && day.date <= end) {
                            painter.rect_filled(cell.shrink(1.0), 2.0, palette.drop_target);
                        }

                        painter.text(
                            cell.min + Vec2::new(6.0, 4.0),
                            Align2::LEFT_TOP,
                            day.date.day().to_string(),
                            FontId::proportional(12.0),
                            if day.in_focus_month {
                                palette.text
                            } else {
                                palette.dimmed_text
                            },
                        );

                        if hidden[column] > 0 {
                            painter.text(
                                Pos2::new(cell.left() + 6.0, cell.bottom() - ROW_PADDING - 2.0),
                                Align2::LEFT_BOTTOM,
                                format!("+{} more", hidden[column]),
                                FontId::proportional(11.0),
                                palette.dimmed_text,
                            );
                        }
                    }

                    Self::draw_events(
                        ui,
                        row_index,
                        layout,
                        origin,
                        &metrics,
                        measured_cell_width,
                        store,
                        controller,
                        roster,
                        settings,
                        theme,
                        &mut result,
                    );
                }
            });

        Self::track_pointer(ui, store, controller, roster, &day_cells, &mut result);
        result
    }

    fn draw_weekday_header(
        ui: &mut egui::Ui,
        settings: &Settings,
        theme: &CalendarTheme,
        week_col: f32,
        cell_width: f32,
    ) {
        let palette = HeaderPalette::from_theme(theme);
        let (strip, _) = ui.allocate_exact_size(
            Vec2::new(week_col + cell_width * 7.0, WEEKDAY_HEADER_HEIGHT),
            Sense::hover(),
        );
        let painter = ui.painter();

        if settings.show_week_numbers {
            painter.text(
                Pos2::new(strip.left() + week_col / 2.0, strip.center().y),
                Align2::CENTER_CENTER,
                "Wk",
                FontId::proportional(12.0),
                palette.header_text,
            );
        }

        let week_start = settings.week_start();
        for (index, name) in weekday_headers(week_start).iter().enumerate() {
            let rect = Rect::from_min_size(
                Pos2::new(strip.left() + week_col + index as f32 * cell_width, strip.top()),
                Vec2::new(cell_width, WEEKDAY_HEADER_HEIGHT),
            );
            let weekday = (week_start.num_days_from_monday() as usize + index) % 7;
            let fill = if weekday >= 5 {
                palette.weekend_header_bg
            } else {
                palette.header_bg
            };
            painter.rect_filled(rect.shrink(1.0), 6.0, fill);
            painter.rect_stroke(rect.shrink(1.0), 6.0, Stroke::new(1.0, palette.border));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                *name,
                FontId::proportional(14.0),
                palette.header_text,
            );
        }
        ui.add_space(4.0);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_events(
        ui: &mut egui::Ui,
        row_index: usize,
        layout: &WeekLayout,
        origin: Pos2,
        metrics: &GridMetrics,
        measured_cell_width: Option<f32>,
        store: &mut EventStore,
        controller: &mut InteractionController,
        roster: &Roster,
        settings: &Settings,
        theme: &CalendarTheme,
        result: &mut MonthViewResult,
    ) {
        let editable = store.is_editable();
        let capturing = controller.pointer_registry().selection_suppressed();

        for segment in layout.visible(settings.max_visible_slots) {
            let slot = layout.slots.get(segment.event.id).unwrap_or(segment.slot);
            let mut color = resolve_color(&segment.event, roster);
            if segment.event.status == EventStatus::Completed {
                color = completed_fill(color, theme);
            }
            let block = project(segment, slot, color, origin, metrics, store.mode());
            let being_dragged = controller.is_dragging(segment.event.id);

            let painter = ui.painter();
            let fill = if being_dragged && controller.move_session().is_some() {
                ghost_fill(block.fill)
            } else {
                block.fill
            };
            painter.rect_filled(block.rect, block.rounding, fill);
            if let Some(label) = &block.label {
                painter.with_clip_rect(block.rect.shrink2(Vec2::new(4.0, 0.0))).text(
                    Pos2::new(block.rect.left() + 6.0, block.rect.center().y),
                    Align2::LEFT_CENTER,
                    label,
                    FontId::proportional(11.0),
                    Color32::WHITE,
                );
            }

            let block_id = Id::new(("event_block", row_index, segment.event.id));
            let sense = if editable {
                Sense::click_and_drag()
            } else {
                Sense::hover()
            };
            let response = ui.interact(block.rect, block_id, sense);
            let response = if capturing {
                response
            } else {
                response.on_hover_text(format_event_tooltip(&segment.event, roster))
            };

            // Registered after the block so it wins the hit test at the edge
            let mut on_handle = false;
            if let Some(handle) = block.resize_handle {
                let handle_response = ui.interact(handle, block_id.with("resize"), Sense::drag());
                on_handle = handle_response.hovered();
                if response.hovered() || on_handle || being_dragged {
                    draw_end_handle(ui.painter(), handle, on_handle, block.fill);
                }
                if on_handle && !capturing {
                    ui.ctx().set_cursor_icon(RESIZE_CURSOR);
                }
                if handle_response.drag_started() {
                    let start_x = handle_response
                        .interact_pointer_pos()
                        .map_or(handle.center().x, |pos| pos.x);
                    if let Err(err) =
                        controller.begin_resize(store, segment, start_x, measured_cell_width)
                    {
                        log::debug!("resize refused: {}", err);
                        result.refused = Some(err);
                    }
                }
            }

            if editable && !on_handle && response.hovered() && !capturing {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
            if editable && response.drag_started() && !on_handle {
                let offset = response
                    .interact_pointer_pos()
                    .map_or(Vec2::ZERO, |pos| pos - block.rect.min);
                if let Err(err) = controller.begin_move(store, segment.event.id, offset) {
                    log::debug!("move refused: {}", err);
                    result.refused = Some(err);
                }
            }
        }
    }

    /// Route pointer movement and release to the active gesture.
    fn track_pointer(
        ui: &mut egui::Ui,
        store: &mut EventStore,
        controller: &mut InteractionController,
        roster: &Roster,
        day_cells: &DayCells,
        result: &mut MonthViewResult,
    ) {
        if !controller.is_active() {
            return;
        }

        let (pointer, released) = ui.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
        let hovered_date = pointer.and_then(|pos| day_cells.date_at(pos));
        if let Some(pos) = pointer {
            controller.pointer_moved(pos, hovered_date);
        }

        if let Some(icon) = controller.pointer_registry().cursor() {
            ui.ctx().set_cursor_icon(icon);
        }

        if let Some(session) = controller.move_session() {
            if let Some(origin) = session.ghost_origin() {
                let label = match (session.event_id(), session.hovered_range()) {
                    (Some(id), Some((start, end))) => {
                        let title = store
                            .sandbox()
                            .get(id)
                            .map(|e| e.title.clone())
                            .unwrap_or_default();
                        format!("{}  {}", title, format_range(start, end))
                    }
                    (None, Some((day, _))) => format!("New allocation  {}", format_range(day, day)),
                    (_, None) => "Drop on a day".to_string(),
                };
                let color = session
                    .event_id()
                    .and_then(|id| store.sandbox().get(id))
                    .map(|e| resolve_color(e, roster))
                    .unwrap_or(Color32::GRAY);
                let painter = ui
                    .ctx()
                    .layer_painter(LayerId::new(Order::Tooltip, Id::new("event_drag_ghost")));
                let galley = painter.layout_no_wrap(label, FontId::proportional(12.0), Color32::WHITE);
                let rect = Rect::from_min_size(origin, galley.size() + Vec2::new(12.0, 6.0));
                painter.rect_filled(rect, Rounding::same(4.0), ghost_fill(color));
                painter.galley(rect.min + Vec2::new(6.0, 3.0), galley, Color32::WHITE);
            }
        }

        if released {
            result.committed = controller.release_into(store, hovered_date);
        }
        ui.ctx().request_repaint();
    }
}

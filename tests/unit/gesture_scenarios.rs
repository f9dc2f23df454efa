// End-to-end gesture scenarios: store + layout + interaction controller
// Drives the controller the way the month view does, without a window

#[path = "../fixtures/mod.rs"]
mod fixtures;

use egui::{pos2, vec2, Pos2};
use fixtures::dates::march_2025;
use fixtures::events::{allocation, allocation_for};
use pretty_assertions::assert_eq;
use resource_calendar::layout::{layout_week, WeekRow};
use resource_calendar::models::event::{CalendarEvent, EventId};
use resource_calendar::models::resource::ResourceId;
use resource_calendar::services::store::{EventStore, Mode, NEW_ALLOCATION_TITLE};
use resource_calendar::ui_egui::gesture::{GestureError, InteractionController};
use test_case::test_case;

const CELL: f32 = 100.0;

/// Week row starting Monday 3 March 2025
fn week_of(monday: u32) -> WeekRow {
    WeekRow::starting(march_2025(monday), march_2025(1))
}

fn sandbox_with(events: Vec<CalendarEvent>) -> EventStore {
    let mut store = EventStore::new(march_2025(1));
    store.replace_derived_events(events);
    store.reset_sandbox_from_derived();
    store.set_mode(Mode::Sandbox);
    store
}

fn range_of(store: &EventStore, id: u64) -> (u32, u32) {
    use chrono::Datelike;
    let event = store.sandbox().get(EventId(id)).unwrap();
    (event.start.day(), event.end.day())
}

/// Start a resize on the end segment of `id` within `row` and drag `cells` to the right.
fn resize_by(store: &mut EventStore, row: &WeekRow, id: u64, cells: f32) -> bool {
    let mut controller = InteractionController::new(CELL);
    let layout = layout_week(row, store.active_events(), None);
    let segment = layout.segment_for(EventId(id)).unwrap();
    let start_x = 500.0;

    controller
        .begin_resize(store, segment, start_x, Some(CELL))
        .unwrap();
    controller.pointer_moved(pos2(start_x + cells * CELL, 40.0), None);
    controller.release_into(store, None)
}

#[test]
fn scenario_a_single_week_event() {
    // Mon 3 .. Wed 5
    let layout = layout_week(&week_of(3), &[allocation(1, march_2025(3), march_2025(5))], None);
    let seg = &layout.segments[0];
    assert_eq!((seg.day_span, seg.is_start, seg.is_end), (3, true, true));
}

#[test]
fn scenario_b_event_crossing_a_week_boundary() {
    // Sat 8 .. Tue 11: Sat+Sun in the first week, Mon+Tue in the second
    let events = [allocation(1, march_2025(8), march_2025(11))];

    let first = layout_week(&week_of(3), &events, None);
    let seg = &first.segments[0];
    assert_eq!((seg.start_index, seg.day_span, seg.is_start, seg.is_end), (5, 2, true, false));

    let second = layout_week(&week_of(10), &events, None);
    let seg = &second.segments[0];
    assert_eq!((seg.start_index, seg.day_span, seg.is_start, seg.is_end), (0, 2, false, true));
}

#[test]
fn scenario_c_parallel_allocations_stack() {
    let events = [
        allocation_for(1, "ana", march_2025(3), march_2025(7)),
        allocation_for(2, "ben", march_2025(3), march_2025(7)),
    ];
    let layout = layout_week(&week_of(3), &events, None);
    assert_eq!(layout.slots.get(EventId(1)), Some(0));
    assert_eq!(layout.slots.get(EventId(2)), Some(1));
}

#[test]
fn scenario_d_resize_cannot_end_before_start() {
    // One-day event on Wed 5, dragged two cells left
    let mut store = sandbox_with(vec![allocation(1, march_2025(5), march_2025(5))]);
    let committed = resize_by(&mut store, &week_of(3), 1, -2.0);

    assert!(!committed);
    assert_eq!(range_of(&store, 1), (5, 5));
}

#[test]
fn scenario_e_move_keeps_duration() {
    let mut store = sandbox_with(vec![allocation(1, march_2025(5), march_2025(7))]);
    let mut controller = InteractionController::new(CELL);

    controller.begin_move(&store, EventId(1), vec2(10.0, 4.0)).unwrap();
    controller.pointer_moved(pos2(720.0, 300.0), Some(march_2025(10)));
    assert!(controller.release_into(&mut store, Some(march_2025(10))));

    assert_eq!(range_of(&store, 1), (10, 12));
}

#[test_case(1.0, (5, 8) ; "one cell right")]
#[test_case(2.4, (5, 9) ; "rounds down below half a cell")]
#[test_case(1.6, (5, 9) ; "rounds up past half a cell")]
#[test_case(-2.0, (5, 5) ; "back to the start day")]
#[test_case(-3.0, (5, 7) ; "before the start is ignored")]
fn test_resize_end(cells: f32, expected: (u32, u32)) {
    // Wed 5 .. Fri 7
    let mut store = sandbox_with(vec![allocation(1, march_2025(5), march_2025(7))]);
    resize_by(&mut store, &week_of(3), 1, cells);
    assert_eq!(range_of(&store, 1), expected);
}

#[test]
fn test_resize_keeps_last_valid_preview() {
    let mut store = sandbox_with(vec![allocation(1, march_2025(5), march_2025(7))]);
    let mut controller = InteractionController::new(CELL);
    let layout = layout_week(&week_of(3), store.active_events(), None);

    controller
        .begin_resize(&store, layout.segment_for(EventId(1)).unwrap(), 0.0, None)
        .unwrap();
    controller.pointer_moved(pos2(200.0, 0.0), None);
    controller.pointer_moved(pos2(-900.0, 0.0), None);

    let preview = controller.preview().unwrap();
    assert_eq!(preview.end, march_2025(9));

    // The layout grows with the preview while the store stays put
    let previewed = layout_week(&week_of(3), store.active_events(), Some(&preview));
    assert_eq!(previewed.segment_for(EventId(1)).unwrap().day_span, 5);
    assert_eq!(range_of(&store, 1), (5, 7));

    assert!(controller.release_into(&mut store, None));
    assert_eq!(range_of(&store, 1), (5, 9));
}

#[test]
fn test_resize_only_from_end_segment() {
    // Sat 8 .. Tue 11, the first week's segment is clipped on the right
    let store = sandbox_with(vec![allocation(1, march_2025(8), march_2025(11))]);
    let mut controller = InteractionController::new(CELL);
    let layout = layout_week(&week_of(3), store.active_events(), None);

    let err = controller
        .begin_resize(&store, layout.segment_for(EventId(1)).unwrap(), 0.0, Some(CELL))
        .unwrap_err();
    assert_eq!(err, GestureError::NotEndSegment(EventId(1)));
    assert!(!controller.is_active());
}

#[test]
fn test_derived_mode_refuses_every_gesture() {
    let mut store = sandbox_with(vec![allocation(1, march_2025(5), march_2025(7))]);
    store.set_mode(Mode::Derived);
    let mut controller = InteractionController::new(CELL);
    let layout = layout_week(&week_of(3), store.active_events(), None);

    assert_eq!(
        controller.begin_move(&store, EventId(1), vec2(0.0, 0.0)),
        Err(GestureError::ReadOnly)
    );
    assert_eq!(
        controller.begin_resize(&store, &layout.segments[0], 0.0, Some(CELL)),
        Err(GestureError::ReadOnly)
    );
    assert_eq!(
        controller.begin_new_allocation(&store, ResourceId::from("ana")),
        Err(GestureError::ReadOnly)
    );
    assert_eq!(controller.pointer_registry().active_listeners(), 0);
}

#[test]
fn test_move_dropped_outside_grid_is_a_no_op() {
    let mut store = sandbox_with(vec![allocation(1, march_2025(5), march_2025(7))]);
    let mut controller = InteractionController::new(CELL);
    let registry = controller.pointer_registry();

    controller.begin_move(&store, EventId(1), vec2(0.0, 0.0)).unwrap();
    assert_eq!(registry.active_listeners(), 1);
    controller.pointer_moved(Pos2::new(-50.0, -50.0), None);

    assert!(!controller.release_into(&mut store, None));
    assert_eq!(range_of(&store, 1), (5, 7));
    assert_eq!(registry.active_listeners(), 0);
    assert_eq!(registry.cursor(), None);
}

#[test]
fn test_new_allocation_drop_creates_single_day_event() {
    let mut store = sandbox_with(vec![allocation(1, march_2025(5), march_2025(7))]);
    let mut controller = InteractionController::new(CELL);

    controller
        .begin_new_allocation(&store, ResourceId::from("ben"))
        .unwrap();
    controller.pointer_moved(pos2(300.0, 200.0), Some(march_2025(12)));
    assert!(controller.release_into(&mut store, Some(march_2025(12))));

    let created = store
        .sandbox()
        .iter()
        .find(|e| e.title == NEW_ALLOCATION_TITLE)
        .unwrap();
    assert_eq!(created.resource_id, ResourceId::from("ben"));
    assert_eq!((created.start, created.end), (march_2025(12), march_2025(12)));
    assert_ne!(created.id, EventId(1));
    // Real data never sees sandbox edits
    assert_eq!(store.derived().len(), 1);
}

#[test]
fn test_second_gesture_is_refused_while_one_is_active() {
    let store = sandbox_with(vec![
        allocation(1, march_2025(5), march_2025(7)),
        allocation(2, march_2025(5), march_2025(5)),
    ]);
    let mut controller = InteractionController::new(CELL);

    controller.begin_move(&store, EventId(1), vec2(0.0, 0.0)).unwrap();
    assert_eq!(
        controller.begin_move(&store, EventId(2), vec2(0.0, 0.0)),
        Err(GestureError::InFlight)
    );
    assert!(controller.is_dragging(EventId(1)));
    assert_eq!(controller.pointer_registry().active_listeners(), 1);
}

#[test]
fn test_reset_from_derived_is_idempotent() {
    let mut store = sandbox_with(vec![
        allocation(1, march_2025(5), march_2025(7)),
        allocation(2, march_2025(10), march_2025(12)),
    ]);
    assert!(store.move_sandbox_event(EventId(1), march_2025(20)));

    store.reset_sandbox_from_derived();
    let once: Vec<CalendarEvent> = store.sandbox().iter().cloned().collect();
    store.reset_sandbox_from_derived();
    let twice: Vec<CalendarEvent> = store.sandbox().iter().cloned().collect();

    assert_eq!(once, twice);
    assert_eq!(once, store.derived().events().to_vec());
}

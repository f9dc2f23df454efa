// Property-based tests for month grid construction and week packing
// Random allocation sets are laid out and the structural guarantees checked

#[path = "../fixtures/mod.rs"]
mod fixtures;

use chrono::{Datelike, Weekday};
use fixtures::dates::{march_2025, ymd};
use fixtures::events::allocation;
use proptest::prelude::*;
use resource_calendar::layout::{build_month_grid, layout_month, layout_week, PreviewOverride, WeekRow};
use resource_calendar::models::event::{CalendarEvent, EventId};
use resource_calendar::utils::date::{add_days, days_in_month, start_of_week};

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
    (0u8..7).prop_map(|n| Weekday::try_from(n).unwrap())
}

/// Up to 24 allocations starting anywhere in a six-week window from 24 Feb 2025
fn allocations_strategy() -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec((0i64..42, 0i64..12), 0..24).prop_map(|specs| {
        let base = ymd(2025, 2, 24);
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (offset, len))| {
                let start = add_days(base, offset);
                allocation(i as u64 + 1, start, add_days(start, len))
            })
            .collect()
    })
}

fn week_of_march_10() -> WeekRow {
    WeekRow::starting(march_2025(10), march_2025(1))
}

proptest! {
    /// Property: the grid is a whole number of contiguous weeks covering the month
    #[test]
    fn prop_month_grid_covers_month(
        year in 1990..2060i32,
        month in 1..=12u32,
        day in 1..=28u32,
        week_start in weekday_strategy(),
    ) {
        let reference = ymd(year, month, day);
        let rows = build_month_grid(reference, week_start);

        prop_assert!((4..=6).contains(&rows.len()));
        prop_assert_eq!(rows[0].first_day().weekday(), week_start);
        prop_assert_eq!(rows[0].first_day(), start_of_week(ymd(year, month, 1), week_start));

        for pair in rows.windows(2) {
            prop_assert_eq!(add_days(pair[0].last_day(), 1), pair[1].first_day());
        }

        let in_month = rows
            .iter()
            .flat_map(|row| row.days().iter())
            .filter(|d| d.in_focus_month)
            .count();
        prop_assert_eq!(in_month as u32, days_in_month(reference));

        // No row is made up entirely of padding days
        for row in &rows {
            prop_assert!(row.days().iter().any(|d| d.in_focus_month));
        }
    }

    /// Property: segments sharing a slot never share a column
    #[test]
    fn prop_no_overlap_within_slot(events in allocations_strategy()) {
        let layout = layout_week(&week_of_march_10(), &events, None);

        for (i, a) in layout.segments.iter().enumerate() {
            for b in layout.segments.iter().skip(i + 1) {
                if a.slot == b.slot {
                    let disjoint = a.end_index < b.start_index || b.end_index < a.start_index;
                    prop_assert!(disjoint, "{:?} and {:?} collide in slot {}", a.event.id, b.event.id, a.slot);
                }
            }
        }
    }

    /// Property: every segment sits in the lowest slot free when it was placed
    #[test]
    fn prop_slots_are_first_fit(events in allocations_strategy()) {
        let layout = layout_week(&week_of_march_10(), &events, None);

        for (i, seg) in layout.segments.iter().enumerate() {
            for lower in 0..seg.slot {
                let blocked = layout.segments[..i].iter().any(|earlier| {
                    earlier.slot == lower
                        && earlier.start_index <= seg.end_index
                        && seg.start_index <= earlier.end_index
                });
                prop_assert!(blocked, "slot {} was free for {:?}", lower, seg.event.id);
            }
        }
        prop_assert_eq!(
            layout.slot_count(),
            layout.segments.iter().map(|s| s.slot + 1).max().unwrap_or(0)
        );
    }

    /// Property: segment geometry matches the event clipped to the row
    #[test]
    fn prop_segment_matches_clipped_range(events in allocations_strategy()) {
        let row = week_of_march_10();
        let layout = layout_week(&row, &events, None);

        let touching = events.iter().filter(|e| e.overlaps(row.first_day(), row.last_day())).count();
        prop_assert_eq!(layout.segments.len(), touching);
        prop_assert_eq!(layout.slots.len(), touching);

        for seg in &layout.segments {
            let original = events.iter().find(|e| e.id == seg.event.id).unwrap();
            let clipped_start = original.start.max(row.first_day());
            let clipped_end = original.end.min(row.last_day());

            prop_assert_eq!(row.days()[seg.start_index].date, clipped_start);
            prop_assert_eq!(row.days()[seg.end_index].date, clipped_end);
            prop_assert_eq!(seg.day_span, seg.end_index - seg.start_index + 1);
            prop_assert_eq!(seg.is_start, original.start >= row.first_day());
            prop_assert_eq!(seg.is_end, original.end <= row.last_day());
            prop_assert_eq!(layout.slots.get(seg.event.id), Some(seg.slot));
        }
    }

    /// Property: across the whole grid an event is drawn for exactly its own days
    #[test]
    fn prop_days_covered_once_across_rows(events in allocations_strategy()) {
        let rows = build_month_grid(march_2025(15), Weekday::Mon);
        let layouts = layout_month(&rows, &events, None);
        let grid_first = rows[0].first_day();
        let grid_last = rows[rows.len() - 1].last_day();

        for event in &events {
            let drawn: usize = layouts
                .iter()
                .filter_map(|l| l.segment_for(event.id))
                .map(|s| s.day_span)
                .sum();
            let visible_start = event.start.max(grid_first);
            let visible_end = event.end.min(grid_last);
            let expected = if visible_start <= visible_end {
                (visible_end - visible_start).num_days() as usize + 1
            } else {
                0
            };
            prop_assert_eq!(drawn, expected);

            let labelled = layouts
                .iter()
                .filter_map(|l| l.segment_for(event.id))
                .filter(|s| s.shows_label())
                .count();
            prop_assert!(labelled <= 1);
        }
    }

    /// Property: a preview changes only the previewed event's end
    #[test]
    fn prop_preview_only_touches_target(
        events in allocations_strategy().prop_filter("need an event", |e| !e.is_empty()),
        extra in 0i64..10,
    ) {
        let target = events[0].clone();
        let preview = PreviewOverride { event_id: target.id, end: add_days(target.end, extra) };
        let rows = build_month_grid(march_2025(15), Weekday::Mon);

        let previewed = layout_month(&rows, &events, Some(&preview));
        for layout in &previewed {
            for seg in &layout.segments {
                let original = events.iter().find(|e| e.id == seg.event.id).unwrap();
                if seg.event.id == target.id {
                    prop_assert_eq!(seg.event.end, preview.end);
                } else {
                    prop_assert_eq!(&seg.event, original);
                }
            }
        }
        // The input slice is never modified
        prop_assert_eq!(events[0].end, target.end);
    }
}

#[test]
fn test_empty_week_has_no_slots() {
    let layout = layout_week(&week_of_march_10(), &[], None);
    assert!(layout.segments.is_empty());
    assert_eq!(layout.slot_count(), 0);
}

#[test]
fn test_unknown_preview_is_ignored() {
    let events = vec![allocation(1, march_2025(10), march_2025(11))];
    let preview = PreviewOverride { event_id: EventId(99), end: march_2025(14) };
    let layout = layout_week(&week_of_march_10(), &events, Some(&preview));
    assert_eq!(layout.segments[0].event.end, march_2025(11));
}

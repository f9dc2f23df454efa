use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::NaiveDate;

use super::month_grid::{WeekRow, DAYS_PER_WEEK};
use crate::models::event::{CalendarEvent, EventId};

/// Tentative end date of an event being resized, shown before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOverride {
    pub event_id: EventId,
    pub end: NaiveDate,
}

impl PreviewOverride {
    /// The event as it should be drawn. Overrides that would put the end
    /// before the start are ignored.
    fn apply(&self, event: &CalendarEvent) -> CalendarEvent {
        let mut shown = event.clone();
        if event.id == self.event_id && self.end >= event.start {
            shown.end = self.end;
        }
        shown
    }
}

/// The part of one event that falls inside a week row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Event as laid out (preview end already applied)
    pub event: CalendarEvent,
    /// First column covered, 0..=6
    pub start_index: usize,
    /// Last column covered, 0..=6
    pub end_index: usize,
    /// The event's real first day is in this row
    pub is_start: bool,
    /// The event's real last day is in this row
    pub is_end: bool,
    /// Columns covered, 1..=7
    pub day_span: usize,
    pub slot: usize,
}

impl Segment {
    /// Only the piece holding the true start carries the title
    pub fn shows_label(&self) -> bool {
        self.is_start
    }

    pub fn covers_column(&self, column: usize) -> bool {
        self.start_index <= column && column <= self.end_index
    }
}

/// Event id to vertical slot within one week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotAssignment {
    slots: HashMap<EventId, usize>,
}

impl SlotAssignment {
    pub fn get(&self, id: EventId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventId, usize)> + '_ {
        self.slots.iter().map(|(id, slot)| (*id, *slot))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekLayout {
    pub row: WeekRow,
    /// In placement order: start ascending, longer events first on ties
    pub segments: Vec<Segment>,
    pub slots: SlotAssignment,
    slot_count: usize,
}

impl WeekLayout {
    /// Number of slots in use (height of the occupancy table)
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn segment_for(&self, id: EventId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.event.id == id)
    }

    /// Segments that fit within the first `max_slots` slots
    pub fn visible(&self, max_slots: usize) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.slot < max_slots)
    }

    /// Per column, how many segments sit in slots at or beyond `max_slots`
    pub fn hidden_per_day(&self, max_slots: usize) -> [usize; DAYS_PER_WEEK] {
        let mut hidden = [0; DAYS_PER_WEEK];
        for segment in self.segments.iter().filter(|s| s.slot >= max_slots) {
            for count in &mut hidden[segment.start_index..=segment.end_index] {
                *count += 1;
            }
        }
        hidden
    }
}

/// Grows one slot at a time; `true` marks a taken day.
struct Occupancy {
    slots: Vec<[bool; DAYS_PER_WEEK]>,
}

impl Occupancy {
    fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Lowest slot whose days `first..=last` are all free; marks them taken.
    fn place(&mut self, first: usize, last: usize) -> usize {
        let free = self
            .slots
            .iter()
            .position(|days| days[first..=last].iter().all(|taken| !taken));
        let slot = free.unwrap_or_else(|| {
            self.slots.push([false; DAYS_PER_WEEK]);
            self.slots.len() - 1
        });
        for taken in &mut self.slots[slot][first..=last] {
            *taken = true;
        }
        slot
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Segments and slots for one week row.
///
/// Events touching the row are stable-sorted by start ascending and, on equal
/// starts, end descending, then placed first-fit into the lowest free slot.
pub fn layout_week(
    row: &WeekRow,
    events: &[CalendarEvent],
    preview: Option<&PreviewOverride>,
) -> WeekLayout {
    let first = row.first_day();
    let last = row.last_day();

    let mut visible: Vec<CalendarEvent> = events
        .iter()
        .map(|event| match preview {
            Some(preview) => preview.apply(event),
            None => event.clone(),
        })
        .filter(|event| event.start <= event.end && event.overlaps(first, last))
        .collect();
    visible.sort_by_key(|event| (event.start, Reverse(event.end)));

    let mut occupancy = Occupancy::new();
    let mut slots = SlotAssignment::default();
    let mut segments = Vec::with_capacity(visible.len());

    for event in visible {
        let clipped_start = event.start.max(first);
        let clipped_end = event.end.min(last);
        let start_index = (clipped_start - first).num_days() as usize;
        let end_index = (clipped_end - first).num_days() as usize;

        let slot = occupancy.place(start_index, end_index);
        slots.slots.insert(event.id, slot);

        segments.push(Segment {
            is_start: event.start == clipped_start,
            is_end: event.end == clipped_end,
            start_index,
            end_index,
            day_span: end_index - start_index + 1,
            slot,
            event,
        });
    }

    WeekLayout {
        row: row.clone(),
        segments,
        slots,
        slot_count: occupancy.len(),
    }
}

/// [`layout_week`] for every row of a month grid
pub fn layout_month(
    rows: &[WeekRow],
    events: &[CalendarEvent],
    preview: Option<&PreviewOverride>,
) -> Vec<WeekLayout> {
    rows.iter()
        .map(|row| layout_week(row, events, preview))
        .collect()
}

// Drag-to-move
//
// A move gesture starts either on an existing sandbox event block or on a
// resource's "new allocation" chip. Only the drop decides what is committed:
// the hovered cell while dragging is rendering state.

use chrono::NaiveDate;
use egui::{Pos2, Vec2};

use crate::models::event::{CalendarEvent, EventId};
use crate::models::resource::ResourceId;
use crate::services::store::SandboxMutation;
use crate::utils::date::{add_days, days_between};

/// Where a move gesture started
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// An existing event, with its range as it was at pointer-down
    Event {
        event_id: EventId,
        original_start: NaiveDate,
        original_end: NaiveDate,
    },
    /// The "new allocation" affordance of a resource
    NewAllocation { resource_id: ResourceId },
}

#[derive(Clone, Debug)]
pub struct MoveSession {
    pub source: DragSource,
    /// Offset between the pointer and the block's top-left corner
    pub pointer_offset: Vec2,
    pub pointer_pos: Option<Pos2>,
    /// Day cell currently under the pointer
    pub hovered_date: Option<NaiveDate>,
}

impl MoveSession {
    pub fn from_event(event: &CalendarEvent, pointer_offset: Vec2) -> Self {
        Self {
            source: DragSource::Event {
                event_id: event.id,
                original_start: event.start,
                original_end: event.end,
            },
            pointer_offset,
            pointer_pos: None,
            hovered_date: Some(event.start),
        }
    }

    pub fn new_allocation(resource_id: ResourceId) -> Self {
        Self {
            source: DragSource::NewAllocation { resource_id },
            pointer_offset: Vec2::ZERO,
            pointer_pos: None,
            hovered_date: None,
        }
    }

    pub fn event_id(&self) -> Option<EventId> {
        match &self.source {
            DragSource::Event { event_id, .. } => Some(*event_id),
            DragSource::NewAllocation { .. } => None,
        }
    }

    pub fn update_hover(&mut self, date: Option<NaiveDate>, pointer_pos: Pos2) {
        self.hovered_date = date;
        self.pointer_pos = Some(pointer_pos);
    }

    /// Range the dragged item would occupy if dropped on `target`
    pub fn range_at(&self, target: NaiveDate) -> (NaiveDate, NaiveDate) {
        match &self.source {
            DragSource::Event {
                original_start,
                original_end,
                ..
            } => {
                let span = days_between(*original_start, *original_end);
                (target, add_days(target, span))
            }
            DragSource::NewAllocation { .. } => (target, target),
        }
    }

    /// Top-left of the floating ghost, keeping the block where it was grabbed
    pub fn ghost_origin(&self) -> Option<Pos2> {
        self.pointer_pos.map(|pos| pos - self.pointer_offset)
    }

    /// Ghost range under the pointer, for drawing only
    pub fn hovered_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.hovered_date.map(|date| self.range_at(date))
    }

    /// Mutation for a drop on `target`; `None` (no valid cell) commits nothing.
    pub fn drop_on(&self, target: Option<NaiveDate>) -> Option<SandboxMutation> {
        let target = target?;
        match &self.source {
            DragSource::Event { event_id, .. } => {
                let (start, end) = self.range_at(target);
                Some(SandboxMutation::Reschedule {
                    id: *event_id,
                    start,
                    end,
                })
            }
            DragSource::NewAllocation { resource_id } => Some(SandboxMutation::Create {
                resource_id: resource_id.clone(),
                day: target,
            }),
        }
    }
}

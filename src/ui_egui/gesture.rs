//! Interaction controller
//!
//! Owns the single active gesture (move or resize) and the pointer capture
//! that comes with it. The capture lives inside the gesture value, so taking
//! the gesture out on release, cancelling it, or dropping the controller
//! always releases the pointer and restores the default cursor.

use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;
use egui::{CursorIcon, Pos2, Vec2};
use thiserror::Error;

use super::drag::MoveSession;
use super::resize::{ResizeSession, RESIZE_CURSOR};
use crate::layout::{PreviewOverride, Segment};
use crate::models::event::EventId;
use crate::models::resource::ResourceId;
use crate::services::store::{EventStore, SandboxMutation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("real data is read-only; switch to the sandbox to edit")]
    ReadOnly,
    #[error("another gesture is already in progress")]
    InFlight,
    #[error("event {0} is not in the sandbox")]
    UnknownEvent(EventId),
    #[error("only the last segment of event {0} can be resized")]
    NotEndSegment(EventId),
}

#[derive(Debug, Default)]
struct CaptureState {
    listeners: Cell<usize>,
    cursor: Cell<Option<CursorIcon>>,
    selection_suppressed: Cell<bool>,
}

/// Shared view of the pointer capture state, read by the renderer each frame.
#[derive(Debug, Clone, Default)]
pub struct PointerRegistry {
    state: Rc<CaptureState>,
}

impl PointerRegistry {
    /// Gesture listeners currently registered (0 or 1)
    pub fn active_listeners(&self) -> usize {
        self.state.listeners.get()
    }

    /// Cursor forced for the gesture, `None` means the default
    pub fn cursor(&self) -> Option<CursorIcon> {
        self.state.cursor.get()
    }

    /// Hover effects and text selection are off while a gesture runs
    pub fn selection_suppressed(&self) -> bool {
        self.state.selection_suppressed.get()
    }

    fn acquire(&self, cursor: CursorIcon) -> PointerCapture {
        self.state.listeners.set(self.state.listeners.get() + 1);
        self.state.cursor.set(Some(cursor));
        self.state.selection_suppressed.set(true);
        PointerCapture {
            state: Rc::clone(&self.state),
        }
    }
}

/// Pointer listeners held for the lifetime of one gesture.
#[derive(Debug)]
pub struct PointerCapture {
    state: Rc<CaptureState>,
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.state
            .listeners
            .set(self.state.listeners.get().saturating_sub(1));
        self.state.cursor.set(None);
        self.state.selection_suppressed.set(false);
    }
}

#[derive(Debug, Default)]
pub enum ActiveGesture {
    #[default]
    None,
    Moving(MoveSession, PointerCapture),
    Resizing(ResizeSession, PointerCapture),
}

impl ActiveGesture {
    pub fn is_none(&self) -> bool {
        matches!(self, ActiveGesture::None)
    }
}

pub struct InteractionController {
    active: ActiveGesture,
    pointer: PointerRegistry,
    fallback_cell_width: f32,
}

impl InteractionController {
    pub fn new(fallback_cell_width: f32) -> Self {
        Self {
            active: ActiveGesture::None,
            pointer: PointerRegistry::default(),
            fallback_cell_width,
        }
    }

    pub fn pointer_registry(&self) -> PointerRegistry {
        self.pointer.clone()
    }

    pub fn active(&self) -> &ActiveGesture {
        &self.active
    }

    pub fn is_active(&self) -> bool {
        !self.active.is_none()
    }

    fn ensure_idle_and_editable(&self, store: &EventStore) -> Result<(), GestureError> {
        if self.is_active() {
            return Err(GestureError::InFlight);
        }
        if !store.is_editable() {
            return Err(GestureError::ReadOnly);
        }
        Ok(())
    }

    /// Start moving an existing sandbox event.
    pub fn begin_move(
        &mut self,
        store: &EventStore,
        event_id: EventId,
        pointer_offset: Vec2,
    ) -> Result<(), GestureError> {
        self.ensure_idle_and_editable(store)?;
        let event = store
            .sandbox()
            .get(event_id)
            .ok_or(GestureError::UnknownEvent(event_id))?;

        log::debug!("move gesture started on event {}", event_id);
        let session = MoveSession::from_event(event, pointer_offset);
        self.active = ActiveGesture::Moving(session, self.pointer.acquire(CursorIcon::Grabbing));
        Ok(())
    }

    /// Start dragging a new single-day allocation for `resource_id`.
    pub fn begin_new_allocation(
        &mut self,
        store: &EventStore,
        resource_id: ResourceId,
    ) -> Result<(), GestureError> {
        self.ensure_idle_and_editable(store)?;

        log::debug!("new allocation gesture started for {}", resource_id);
        let session = MoveSession::new_allocation(resource_id);
        self.active = ActiveGesture::Moving(session, self.pointer.acquire(CursorIcon::Grabbing));
        Ok(())
    }

    /// Start resizing from the end handle of `segment`.
    pub fn begin_resize(
        &mut self,
        store: &EventStore,
        segment: &Segment,
        start_x: f32,
        measured_cell_width: Option<f32>,
    ) -> Result<(), GestureError> {
        self.ensure_idle_and_editable(store)?;
        let event_id = segment.event.id;
        if !segment.is_end {
            return Err(GestureError::NotEndSegment(event_id));
        }
        // Capture the committed event, not the segment's possibly previewed copy
        let event = store
            .sandbox()
            .get(event_id)
            .ok_or(GestureError::UnknownEvent(event_id))?;

        log::debug!("resize gesture started on event {}", event_id);
        let session = ResizeSession::begin(
            event,
            start_x,
            measured_cell_width,
            self.fallback_cell_width,
        );
        self.active = ActiveGesture::Resizing(session, self.pointer.acquire(RESIZE_CURSOR));
        Ok(())
    }

    /// Feed a pointer position; `hovered_date` is the day cell under it, if any.
    pub fn pointer_moved(&mut self, pos: Pos2, hovered_date: Option<NaiveDate>) {
        match &mut self.active {
            ActiveGesture::None => {}
            ActiveGesture::Moving(session, _) => session.update_hover(hovered_date, pos),
            ActiveGesture::Resizing(session, _) => {
                session.update(pos.x);
            }
        }
    }

    /// End the gesture. A move commits only when dropped on a day cell; a
    /// resize commits its last valid preview wherever the pointer is released.
    /// The capture is released in every case.
    pub fn release(&mut self, drop_target: Option<NaiveDate>) -> Option<SandboxMutation> {
        let mutation = match std::mem::take(&mut self.active) {
            ActiveGesture::None => None,
            ActiveGesture::Moving(session, _capture) => session.drop_on(drop_target),
            ActiveGesture::Resizing(session, _capture) => session.finish(),
        };
        log::debug!("gesture released, outcome: {:?}", mutation);
        mutation
    }

    /// [`Self::release`] and commit the outcome to `store`.
    pub fn release_into(&mut self, store: &mut EventStore, drop_target: Option<NaiveDate>) -> bool {
        match self.release(drop_target) {
            Some(mutation) => store.apply(mutation),
            None => false,
        }
    }

    /// Tear the gesture down without committing, e.g. when the view is
    /// rebuilt under it.
    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("gesture cancelled");
        }
        self.active = ActiveGesture::None;
    }

    /// End-date override for the layout while a resize is in flight
    pub fn preview(&self) -> Option<PreviewOverride> {
        match &self.active {
            ActiveGesture::Resizing(session, _) => session.preview(),
            _ => None,
        }
    }

    pub fn move_session(&self) -> Option<&MoveSession> {
        match &self.active {
            ActiveGesture::Moving(session, _) => Some(session),
            _ => None,
        }
    }

    pub fn resize_session(&self) -> Option<&ResizeSession> {
        match &self.active {
            ActiveGesture::Resizing(session, _) => Some(session),
            _ => None,
        }
    }

    /// Is `event_id` the subject of the gesture in flight?
    pub fn is_dragging(&self, event_id: EventId) -> bool {
        match &self.active {
            ActiveGesture::Moving(session, _) => session.event_id() == Some(event_id),
            ActiveGesture::Resizing(session, _) => session.event_id == event_id,
            ActiveGesture::None => false,
        }
    }
}

use crate::models::event::{CalendarEvent, EventId};

/// Authoritative events regenerated from upstream data. No per-event mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedEvents {
    events: Vec<CalendarEvent>,
}

impl DerivedEvents {
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(super) fn overwrite(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
    }

    pub(super) fn snapshot(&self) -> Vec<CalendarEvent> {
        self.events.clone()
    }
}

/// Disposable planning copy; the only collection with an edit API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxEvents {
    events: Vec<CalendarEvent>,
}

impl SandboxEvents {
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append unless the id is already present
    pub fn insert(&mut self, event: CalendarEvent) -> bool {
        if self.get(event.id).is_some() {
            return false;
        }
        self.events.push(event);
        true
    }

    /// Replace the event with the same id in place
    pub fn replace(&mut self, event: CalendarEvent) -> bool {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                *slot = event;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EventId) -> Option<CalendarEvent> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }

    pub(super) fn overwrite(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
    }
}

/// Read access to whichever universe is active.
#[derive(Debug, Clone, Copy)]
pub enum ActiveUniverse<'a> {
    Derived(&'a DerivedEvents),
    Sandbox(&'a SandboxEvents),
}

impl<'a> ActiveUniverse<'a> {
    pub fn events(&self) -> &'a [CalendarEvent] {
        match self {
            ActiveUniverse::Derived(derived) => derived.events(),
            ActiveUniverse::Sandbox(sandbox) => sandbox.events(),
        }
    }

    pub fn get(&self, id: EventId) -> Option<&'a CalendarEvent> {
        self.events().iter().find(|e| e.id == id)
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, ActiveUniverse::Sandbox(_))
    }
}

/// Mutable access to the active universe. The derived arm stays a shared
/// borrow, so it cannot be edited through this handle.
#[derive(Debug)]
pub enum ActiveUniverseMut<'a> {
    Derived(&'a DerivedEvents),
    Sandbox(&'a mut SandboxEvents),
}

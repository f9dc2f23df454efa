//! Event store
//!
//! Holds the two event universes (`derived` and `sandbox`), the date the
//! calendar is looking at, and which universe is active. Every mutation is
//! synchronous and total: unknown ids are ignored rather than reported.
//!
//! `derived` can only ever be overwritten wholesale through
//! [`EventStore::replace_derived_events`]; the per-event mutation API lives on
//! [`SandboxEvents`] alone.

mod universe;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::event::{CalendarEvent, EventId, EventKind, EventStatus};
use crate::models::resource::ResourceId;
use crate::utils::date::{add_days, add_months, days_between, today};

pub use universe::{ActiveUniverse, ActiveUniverseMut, DerivedEvents, SandboxEvents};

/// Title given to events created from a "new allocation" drop
pub const NEW_ALLOCATION_TITLE: &str = "New allocation";

/// Which universe layout and interaction operate on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read-only events sourced from external data
    #[default]
    Derived,
    /// Editable planning copy
    Sandbox,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Derived => "Real data",
            Mode::Sandbox => "Sandbox",
        }
    }
}

/// What changed in the store; delivered to every [`StoreObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    ActiveDate(NaiveDate),
    Mode(Mode),
    SandboxAdded(EventId),
    SandboxUpdated(EventId),
    SandboxRemoved(EventId),
    DerivedReplaced { count: usize },
    SandboxReset { count: usize },
}

/// Commit hook fired after every applied store mutation.
#[cfg_attr(test, mockall::automock)]
pub trait StoreObserver {
    fn on_change(&mut self, change: &StoreChange);
}

impl<F> StoreObserver for F
where
    F: FnMut(&StoreChange),
{
    fn on_change(&mut self, change: &StoreChange) {
        self(change)
    }
}

/// A sandbox edit proposed by a finished gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxMutation {
    /// Place an existing event on a new `[start, end]` range
    Reschedule {
        id: EventId,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Move only the end boundary
    ResizeEnd { id: EventId, end: NaiveDate },
    /// Single-day allocation for a resource
    Create { resource_id: ResourceId, day: NaiveDate },
}

pub struct EventStore {
    active_date: NaiveDate,
    mode: Mode,
    derived: DerivedEvents,
    sandbox: SandboxEvents,
    next_id: u64,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(today())
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("active_date", &self.active_date)
            .field("mode", &self.mode)
            .field("derived", &self.derived.len())
            .field("sandbox", &self.sandbox.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl EventStore {
    pub fn new(active_date: NaiveDate) -> Self {
        Self {
            active_date,
            mode: Mode::default(),
            derived: DerivedEvents::default(),
            sandbox: SandboxEvents::default(),
            next_id: 1,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: StoreChange) {
        log::debug!("store change: {:?}", change);
        for observer in &mut self.observers {
            observer.on_change(&change);
        }
    }

    pub fn active_date(&self) -> NaiveDate {
        self.active_date
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editable(&self) -> bool {
        self.mode == Mode::Sandbox
    }

    pub fn derived(&self) -> &DerivedEvents {
        &self.derived
    }

    pub fn sandbox(&self) -> &SandboxEvents {
        &self.sandbox
    }

    /// The universe selected by the current mode
    pub fn active(&self) -> ActiveUniverse<'_> {
        match self.mode {
            Mode::Derived => ActiveUniverse::Derived(&self.derived),
            Mode::Sandbox => ActiveUniverse::Sandbox(&self.sandbox),
        }
    }

    /// Mutable view of the active universe. Only the sandbox arm can be edited;
    /// edits made through it bypass the observers.
    pub fn active_mut(&mut self) -> ActiveUniverseMut<'_> {
        match self.mode {
            Mode::Derived => ActiveUniverseMut::Derived(&self.derived),
            Mode::Sandbox => ActiveUniverseMut::Sandbox(&mut self.sandbox),
        }
    }

    pub fn active_events(&self) -> &[CalendarEvent] {
        self.active().events()
    }

    pub fn set_active_date(&mut self, date: NaiveDate) {
        if self.active_date == date {
            return;
        }
        self.active_date = date;
        self.notify(StoreChange::ActiveDate(date));
    }

    pub fn next_month(&mut self) {
        self.set_active_date(add_months(self.active_date, 1));
    }

    pub fn previous_month(&mut self) {
        self.set_active_date(add_months(self.active_date, -1));
    }

    pub fn go_to_today(&mut self) {
        self.set_active_date(today());
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        log::info!("switching calendar to {:?} mode", mode);
        self.mode = mode;
        self.notify(StoreChange::Mode(mode));
    }

    /// Fresh id that collides with nothing in either universe
    pub fn allocate_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        id
    }

    fn reserve_ids_of<'a>(&mut self, events: impl IntoIterator<Item = &'a CalendarEvent>) {
        if let Some(max) = events.into_iter().map(|e| e.id.0).max() {
            self.next_id = self.next_id.max(max.saturating_add(1));
        }
    }

    /// Returns false when the event is invalid or its id is already taken.
    pub fn add_sandbox_event(&mut self, event: CalendarEvent) -> bool {
        if let Err(err) = event.validate() {
            log::debug!("ignoring invalid sandbox event {}: {}", event.id, err);
            return false;
        }
        let id = event.id;
        self.reserve_ids_of(std::iter::once(&event));
        if !self.sandbox.insert(event) {
            log::debug!("sandbox already holds event {}, add ignored", id);
            return false;
        }
        self.notify(StoreChange::SandboxAdded(id));
        true
    }

    /// Replace by id. Unknown ids and invalid ranges are no-ops.
    pub fn update_sandbox_event(&mut self, event: CalendarEvent) -> bool {
        if let Err(err) = event.validate() {
            log::debug!("ignoring invalid update for {}: {}", event.id, err);
            return false;
        }
        let id = event.id;
        if !self.sandbox.replace(event) {
            log::debug!("update for unknown sandbox event {} ignored", id);
            return false;
        }
        self.notify(StoreChange::SandboxUpdated(id));
        true
    }

    pub fn remove_sandbox_event(&mut self, id: EventId) -> bool {
        if self.sandbox.remove(id).is_none() {
            log::debug!("remove for unknown sandbox event {} ignored", id);
            return false;
        }
        self.notify(StoreChange::SandboxRemoved(id));
        true
    }

    /// Full overwrite of the derived universe, called whenever upstream data changes.
    /// Events that fail validation are dropped with a warning.
    pub fn replace_derived_events(&mut self, events: Vec<CalendarEvent>) {
        let events: Vec<CalendarEvent> = events
            .into_iter()
            .filter(|event| match event.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("dropping derived event {} ({:?}): {}", event.id, event.title, err);
                    false
                }
            })
            .collect();
        self.reserve_ids_of(&events);
        let count = events.len();
        self.derived.overwrite(events);
        log::info!("derived universe replaced with {} events", count);
        self.notify(StoreChange::DerivedReplaced { count });
    }

    /// Discard sandbox edits and copy `derived` into it.
    pub fn reset_sandbox_from_derived(&mut self) {
        let snapshot = self.derived.snapshot();
        let count = snapshot.len();
        self.sandbox.overwrite(snapshot);
        log::info!("sandbox reset from real data ({} events)", count);
        self.notify(StoreChange::SandboxReset { count });
    }

    /// Commit a gesture outcome through the regular sandbox operations.
    pub fn apply(&mut self, mutation: SandboxMutation) -> bool {
        match mutation {
            SandboxMutation::Reschedule { id, start, end } => {
                let Some(mut event) = self.sandbox.get(id).cloned() else {
                    log::debug!("reschedule of unknown event {} ignored", id);
                    return false;
                };
                event.start = start;
                event.end = end;
                self.update_sandbox_event(event)
            }
            SandboxMutation::ResizeEnd { id, end } => {
                let Some(mut event) = self.sandbox.get(id).cloned() else {
                    log::debug!("resize of unknown event {} ignored", id);
                    return false;
                };
                event.end = end;
                self.update_sandbox_event(event)
            }
            SandboxMutation::Create { resource_id, day } => {
                let event = CalendarEvent {
                    id: self.allocate_id(),
                    resource_id,
                    title: NEW_ALLOCATION_TITLE.to_string(),
                    start: day,
                    end: day,
                    kind: EventKind::Other,
                    status: EventStatus::Planned,
                    linked_record_id: None,
                    color: None,
                };
                self.add_sandbox_event(event)
            }
        }
    }

    /// Move an event so that it starts on `target`, keeping its length.
    pub fn move_sandbox_event(&mut self, id: EventId, target: NaiveDate) -> bool {
        let Some(event) = self.sandbox.get(id) else {
            return false;
        };
        let span = days_between(event.start, event.end);
        self.apply(SandboxMutation::Reschedule {
            id,
            start: target,
            end: add_days(target, span),
        })
    }
}

// Event module
// Resource allocation model: an inclusive range of whole calendar days

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::resource::ResourceId;

/// Opaque identifier of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocation category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Implementation,
    Training,
    #[default]
    Other,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Implementation => "Implementation",
            EventKind::Training => "Training",
            EventKind::Other => "Other",
        }
    }
}

/// Lifecycle tag. Informational only, never consulted by layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Planned,
    Confirmed,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event title cannot be empty")]
    EmptyTitle,
    #[error("event end {end} precedes start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("color must be in hex format (#RRGGBB), got {0:?}")]
    InvalidColor(String),
    #[error("event {0} is required")]
    MissingField(&'static str),
}

/// A resource allocation spanning whole days, `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub resource_id: ResourceId,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub kind: EventKind,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_record_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CalendarEvent {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use resource_calendar::models::event::{CalendarEvent, EventId};
    /// use resource_calendar::models::resource::ResourceId;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    /// let event = CalendarEvent::new(EventId(1), ResourceId::from("alice"), "Kick-off", day, day).unwrap();
    /// assert_eq!(event.duration_days(), 0);
    /// ```
    pub fn new(
        id: EventId,
        resource_id: ResourceId,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, EventError> {
        let event = Self {
            id,
            resource_id,
            title: title.into(),
            start,
            end,
            kind: EventKind::default(),
            status: EventStatus::default(),
            linked_record_id: None,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }

        if self.end < self.start {
            return Err(EventError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }

        if let Some(ref color) = self.color {
            if !is_hex_color(color) {
                return Err(EventError::InvalidColor(color.clone()));
            }
        }

        Ok(())
    }

    /// Whole days between start and end; 0 for a single-day event.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Does the inclusive range touch `date`?
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Inclusive overlap test against another day range.
    pub fn overlaps(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.end >= first && self.start <= last
    }
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: Option<EventId>,
    resource_id: Option<ResourceId>,
    title: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    kind: EventKind,
    status: EventStatus,
    linked_record_id: Option<String>,
    color: Option<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            resource_id: None,
            title: None,
            start: None,
            end: None,
            kind: EventKind::default(),
            status: EventStatus::default(),
            linked_record_id: None,
            color: None,
        }
    }

    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn resource(mut self, resource_id: impl Into<ResourceId>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Set start and end to the same day
    pub fn on(mut self, day: NaiveDate) -> Self {
        self.start = Some(day);
        self.end = Some(day);
        self
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn linked_record(mut self, record_id: impl Into<String>) -> Self {
        self.linked_record_id = Some(record_id.into());
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn build(self) -> Result<CalendarEvent, EventError> {
        let event = CalendarEvent {
            id: self.id.ok_or(EventError::MissingField("id"))?,
            resource_id: self.resource_id.ok_or(EventError::MissingField("resource"))?,
            title: self.title.ok_or(EventError::MissingField("title"))?,
            start: self.start.ok_or(EventError::MissingField("start"))?,
            end: self.end.ok_or(EventError::MissingField("end"))?,
            kind: self.kind,
            status: self.status,
            linked_record_id: self.linked_record_id,
            color: self.color,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Inbound allocation feed
//!
//! Upstream project data arrives as a JSON list of allocations. Each record is
//! normalised to whole days and turned into a [`CalendarEvent`] for the derived
//! universe. Bad records are skipped with a warning so one malformed row never
//! blanks the calendar.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::event::{CalendarEvent, EventError, EventId, EventKind, EventStatus};
use crate::models::resource::{Resource, ResourceId, Roster};
use crate::utils::date::{add_days, start_of_day};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid {field} date {value:?}: expected YYYY-MM-DD or RFC 3339")]
    InvalidDate { field: &'static str, value: String },
    #[error("allocation {title:?} ends ({end}) before it starts ({start})")]
    InvalidRange {
        title: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error(transparent)]
    Event(#[from] EventError),
    #[error("malformed allocation feed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One externally sourced allocation, as found in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedAllocation {
    pub resource_id: ResourceId,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub kind: EventKind,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub linked_record_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl FeedAllocation {
    pub fn to_event(&self, id: EventId) -> Result<CalendarEvent, ImportError> {
        let start = parse_day("start", &self.start)?;
        let end = parse_day("end", &self.end)?;
        if end < start {
            return Err(ImportError::InvalidRange {
                title: self.title.clone(),
                start,
                end,
            });
        }

        let mut builder = CalendarEvent::builder()
            .id(id)
            .resource(self.resource_id.clone())
            .title(self.title.clone())
            .start(start)
            .end(end)
            .kind(self.kind)
            .status(self.status);
        if let Some(record) = &self.linked_record_id {
            builder = builder.linked_record(record.clone());
        }
        if let Some(color) = &self.color {
            builder = builder.color(color.clone());
        }
        Ok(builder.build()?)
    }
}

/// Accepts a plain date or an RFC 3339 timestamp; the time-of-day is dropped.
pub fn parse_day(field: &'static str, value: &str) -> Result<NaiveDate, ImportError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| start_of_day(&ts))
        .map_err(|_| ImportError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

pub fn parse_feed(json: &str) -> Result<Vec<FeedAllocation>, ImportError> {
    Ok(serde_json::from_str(json)?)
}

/// Convert feed records into derived events with sequential ids starting at 1.
/// Records that fail validation are skipped.
pub fn to_events(allocations: &[FeedAllocation], roster: &Roster) -> Vec<CalendarEvent> {
    let mut events = Vec::with_capacity(allocations.len());
    for allocation in allocations {
        let id = EventId(events.len() as u64 + 1);
        match allocation.to_event(id) {
            Ok(event) => {
                if !roster.is_empty() && !roster.contains(&event.resource_id) {
                    log::warn!(
                        "allocation {:?} refers to unknown resource {}",
                        event.title,
                        event.resource_id
                    );
                }
                events.push(event);
            }
            Err(err) => log::warn!("skipping allocation {:?}: {}", allocation.title, err),
        }
    }
    events
}

pub fn load_feed(path: &Path, roster: &Roster) -> Result<Vec<CalendarEvent>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read allocation feed from {}", path.display()))?;
    let allocations = parse_feed(&data)
        .with_context(|| format!("failed to parse allocation feed {}", path.display()))?;
    let events = to_events(&allocations, roster);
    log::info!(
        "loaded {} of {} allocations from {}",
        events.len(),
        allocations.len(),
        path.display()
    );
    Ok(events)
}

pub fn load_roster(path: &Path) -> Result<Roster> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster from {}", path.display()))?;
    let roster: Roster = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse roster {}", path.display()))?;
    Ok(roster)
}

/// Small built-in team and schedule around `anchor`, used when no files are configured.
pub fn demo_data(anchor: NaiveDate) -> (Roster, Vec<CalendarEvent>) {
    let roster = Roster::new(vec![
        Resource::new("ana", "Ana", "#3366CC"),
        Resource::new("ben", "Ben", "#DC3912"),
        Resource::new("chloe", "Chloe", "#109618"),
        Resource::new("dev", "Dev", "#990099"),
    ]);

    let first = crate::utils::date::first_of_month(anchor);
    let plan: [(&str, &str, i64, i64, EventKind, EventStatus); 7] = [
        ("ana", "Acme rollout", 2, 9, EventKind::Implementation, EventStatus::Confirmed),
        ("ben", "Acme rollout", 4, 6, EventKind::Implementation, EventStatus::Confirmed),
        ("chloe", "Onboarding workshop", 5, 5, EventKind::Training, EventStatus::Planned),
        ("dev", "Globex migration", 12, 20, EventKind::Implementation, EventStatus::Planned),
        ("ana", "Admin training", 13, 14, EventKind::Training, EventStatus::Planned),
        ("ben", "Internal tooling", 18, 24, EventKind::Other, EventStatus::Planned),
        ("chloe", "Initech go-live", 26, 33, EventKind::Implementation, EventStatus::Completed),
    ];

    let events = plan
        .iter()
        .enumerate()
        .filter_map(|(index, (resource, title, from, to, kind, status))| {
            CalendarEvent::builder()
                .id(EventId(index as u64 + 1))
                .resource(*resource)
                .title(*title)
                .start(add_days(first, *from))
                .end(add_days(first, *to))
                .kind(*kind)
                .status(*status)
                .linked_record(format!("project-{}", index + 100))
                .build()
                .ok()
        })
        .collect();

    (roster, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const FEED: &str = r##"[
        {"resource_id": "ana", "title": "Acme", "start": "2025-03-03", "end": "2025-03-07",
         "kind": "implementation", "linked_record_id": "p-1"},
        {"resource_id": "ben", "title": "Workshop", "start": "2025-03-05T09:00:00+01:00",
         "end": "2025-03-05T17:00:00+01:00", "kind": "training", "status": "confirmed"},
        {"resource_id": "ben", "title": "Backwards", "start": "2025-03-09", "end": "2025-03-08"},
        {"resource_id": "ana", "title": "Garbage", "start": "soon", "end": "later"}
    ]"##;

    #[test]
    fn test_parse_day_formats() {
        assert_eq!(parse_day("start", "2025-03-05").unwrap(), ymd(2025, 3, 5));
        assert_eq!(
            parse_day("start", "2025-03-05T23:30:00Z").unwrap(),
            ymd(2025, 3, 5)
        );
        assert!(matches!(
            parse_day("end", "05/03/2025"),
            Err(ImportError::InvalidDate { field: "end", .. })
        ));
    }

    #[test]
    fn test_feed_skips_bad_records() {
        let allocations = parse_feed(FEED).unwrap();
        assert_eq!(allocations.len(), 4);

        let events = to_events(&allocations, &Roster::default());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, EventId(1));
        assert_eq!(events[0].kind, EventKind::Implementation);
        assert_eq!(events[0].linked_record_id.as_deref(), Some("p-1"));
        assert_eq!(events[1].id, EventId(2));
        assert_eq!(events[1].start, events[1].end);
        assert_eq!(events[1].status, EventStatus::Confirmed);
    }

    #[test]
    fn test_reversed_range_is_reported() {
        let allocation = FeedAllocation {
            resource_id: "ben".into(),
            title: "Backwards".into(),
            start: "2025-03-09".into(),
            end: "2025-03-08".into(),
            kind: EventKind::Other,
            status: EventStatus::Planned,
            linked_record_id: None,
            color: None,
        };
        assert!(matches!(
            allocation.to_event(EventId(1)),
            Err(ImportError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_feed("{not json"), Err(ImportError::Json(_))));
    }

    #[test]
    fn test_load_feed_and_roster_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let feed_path = dir.path().join("feed.json");
        let roster_path = dir.path().join("roster.json");
        std::fs::File::create(&feed_path)
            .unwrap()
            .write_all(FEED.as_bytes())
            .unwrap();
        std::fs::write(
            &roster_path,
            r##"[{"id": "ana", "name": "Ana", "color": "#3366CC"}]"##,
        )
        .unwrap();

        let roster = load_roster(&roster_path).unwrap();
        let events = load_feed(&feed_path, &roster).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_missing_feed_file_has_context() {
        let err = load_feed(Path::new("/definitely/not/here.json"), &Roster::default()).unwrap_err();
        assert!(err.to_string().contains("failed to read allocation feed"));
    }

    #[test]
    fn test_demo_data_is_valid() {
        let (roster, events) = demo_data(ymd(2025, 3, 15));
        assert_eq!(roster.len(), 4);
        assert_eq!(events.len(), 7);
        assert!(events.iter().all(|e| roster.contains(&e.resource_id)));
        assert!(events.iter().all(|e| e.start <= e.end));
    }
}

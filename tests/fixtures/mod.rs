// Test fixtures - reusable test data
// Provides consistent dates and allocations across all test files

#![allow(dead_code)]

use chrono::NaiveDate;
use resource_calendar::models::event::{CalendarEvent, EventId};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Day of March 2025. The 1st is a Saturday, the 3rd a Monday.
    pub fn march_2025(day: u32) -> NaiveDate {
        ymd(2025, 3, day)
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Allocation for "ana" covering `[start, end]`
    pub fn allocation(id: u64, start: NaiveDate, end: NaiveDate) -> CalendarEvent {
        allocation_for(id, "ana", start, end)
    }

    pub fn allocation_for(id: u64, resource: &str, start: NaiveDate, end: NaiveDate) -> CalendarEvent {
        CalendarEvent::builder()
            .id(EventId(id))
            .resource(resource)
            .title(format!("Allocation {}", id))
            .start(start)
            .end(end)
            .build()
            .unwrap()
    }
}

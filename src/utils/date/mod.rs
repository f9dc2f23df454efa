// Date utility functions
// Whole-day arithmetic used by the month grid, layout and gestures

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone, Weekday};

/// Calendar day of a timestamp; the time-of-day is dropped.
pub fn start_of_day<Tz: TimeZone>(date: &DateTime<Tz>) -> NaiveDate {
    date.date_naive()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Shift a date by a signed number of days, saturating at chrono's range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Signed day count from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    add_days(first_of_month(add_months(date, 1)), -1)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    last_of_month(date).day()
}

/// Move by whole months, clamping the day-of-month (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return date;
    };
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let max_day = next_first
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31);
    first.with_day(date.day().min(max_day)).unwrap_or(first)
}

/// Most recent `week_start` on or before `date`
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    add_days(date, -(offset as i64))
}

use chrono::{Datelike, NaiveDate, Weekday};

use crate::utils::date::{add_days, first_of_month, last_of_month, start_of_week};

/// Days in a week row
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the padding days borrowed from the adjacent months
    pub in_focus_month: bool,
}

/// Seven consecutive days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    days: [CalendarDay; DAYS_PER_WEEK],
}

impl WeekRow {
    /// Row starting at `first`, with days outside `focus_month` flagged
    pub fn starting(first: NaiveDate, focus_month: NaiveDate) -> Self {
        let days = std::array::from_fn(|i| {
            let date = add_days(first, i as i64);
            CalendarDay {
                date,
                in_focus_month: date.year() == focus_month.year()
                    && date.month() == focus_month.month(),
            }
        });
        Self { days }
    }

    pub fn days(&self) -> &[CalendarDay; DAYS_PER_WEEK] {
        &self.days
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[DAYS_PER_WEEK - 1].date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day() <= date && date <= self.last_day()
    }

    /// Column of `date` in this row (0..=6)
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.contains(date)
            .then(|| (date - self.first_day()).num_days() as usize)
    }

    /// ISO week number, taken from the middle of the row
    pub fn iso_week(&self) -> u32 {
        self.days[3].date.iso_week().week()
    }
}

/// Week rows covering the month of `reference`, padded out to whole weeks.
pub fn build_month_grid(reference: NaiveDate, week_start: Weekday) -> Vec<WeekRow> {
    let month_first = first_of_month(reference);
    let month_last = last_of_month(reference);

    let mut rows = Vec::with_capacity(6);
    let mut row_start = start_of_week(month_first, week_start);
    while row_start <= month_last {
        rows.push(WeekRow::starting(row_start, month_first));
        row_start = add_days(row_start, DAYS_PER_WEEK as i64);
    }
    rows
}

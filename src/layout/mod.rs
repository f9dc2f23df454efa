//! Month-grid geometry and per-week event packing.
//!
//! Both halves are pure functions of their inputs: the grid depends only on a
//! reference date and the week-start day, and a week's layout only on the row,
//! the active events and at most one preview override from a resize in flight.

pub mod month_grid;
pub mod week_layout;

pub use month_grid::{build_month_grid, CalendarDay, WeekRow};
pub use week_layout::{layout_month, layout_week, PreviewOverride, Segment, SlotAssignment, WeekLayout};

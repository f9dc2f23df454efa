pub mod month_view;
pub(crate) mod palette;
pub mod utils;

pub use month_view::{MonthView, MonthViewResult};

// egui front end for the resource calendar

mod app;
pub mod drag;
pub mod gesture;
pub mod presentation;
pub mod resize;
pub mod theme;
pub mod views;

pub use app::ResourceCalendarApp;

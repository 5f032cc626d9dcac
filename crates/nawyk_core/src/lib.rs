pub mod calendar;
pub mod date;
pub mod habit;
pub mod store;
pub mod tracker;

pub use crate::tracker::HabitTracker;

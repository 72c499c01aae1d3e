//! Groups case records by date and time and renders them as a printable
//! HTML calendar.

pub mod output;
pub mod render;
pub mod schedule;
pub mod time;

pub use output::{output_filename, save};
pub use render::{NO_CASES_FOUND, render_document};
pub use schedule::{DateGroup, GroupedSchedule, TimeSlot, UNKNOWN_TIME};
pub use time::{ClockTime, format_time_block};

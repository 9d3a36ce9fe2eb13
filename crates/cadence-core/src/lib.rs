//! Calendar primitives shared by the recurrence pipeline.
//!
//! Holds the [`Instance`] value every pipeline stage produces and consumes,
//! the iCalendar enums rule parts are expressed in, and the ambient pieces
//! (errors, configuration, logging) the other workspace crates build on.

pub mod config;
pub mod error;
pub mod instance;
pub mod logging;
pub mod types;

pub use instance::{Instance, days_in_month};
pub use types::{Frequency, Weekday, WeekdayNum};

//! Integration tests for assembled recurrence pipelines.

mod bounds;
mod helpers;
mod pipeline;
mod rrule_oracle;

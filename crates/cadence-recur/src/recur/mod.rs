//! Stages of a compiled recurrence rule.

mod filter;
mod occurrences;
mod scope;
mod seed;
mod set_position;
mod stage;
mod working;

pub mod parts;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use filter::{Expand, FilterMode, FilterStage, Limit};
pub use occurrences::Occurrences;
pub use scope::Scope;
pub use seed::FrequencySeed;
pub use set_position::SetPositionStage;
pub use stage::{InstanceSet, PullStage};
pub use working::WorkingSet;

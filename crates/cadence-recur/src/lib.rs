//! Pull-based recurrence pipeline.
//!
//! A recurrence rule compiles into a chain of stages: a seed that advances
//! the base frequency, followed by filter stages that each expand or limit
//! the candidates of one rule part. Every stage speaks the same
//! [`PullStage`](recur::PullStage) protocol, so stages compose in any order
//! the rule compiler chooses.

pub mod error;
pub mod recur;

pub use error::{IterationBound, RecurError, RecurResult};

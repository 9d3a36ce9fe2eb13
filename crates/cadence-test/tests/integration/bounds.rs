use cadence_core::config::IterationLimits;
use cadence_core::{Frequency, Instance};
use cadence_recur::recur::parts::{ByMonth, ByMonthDay};
use cadence_recur::recur::{FilterStage, PullStage, Scope};
use cadence_recur::{IterationBound, RecurError};
use cadence_test::{Pipeline, ScriptedStage};

use super::helpers::at;

#[test_log::test]
fn test_february_30th_is_unsatisfiable() {
    let mut occurrences = Pipeline::seeded(at(2024, 2, 1), Frequency::Yearly, 1)
        .unwrap()
        .expand(ByMonth::new([2]).unwrap())
        .expand(ByMonthDay::new([30], Scope::Monthly).unwrap())
        .occurrences();

    let err = occurrences.next().unwrap().unwrap_err();
    assert!(matches!(
        err,
        RecurError::IterationBoundExceeded {
            bound: IterationBound::EmptySets,
            limit: 1000
        }
    ));
    assert!(occurrences.next().is_none());
}

#[test]
fn test_sparse_but_valid_rule_survives() {
    // 29 rejected February days sit well inside the single-instance bound.
    let mut stage = Pipeline::seeded(at(2024, 1, 30), Frequency::Daily, 1)
        .unwrap()
        .limit(ByMonth::new([1, 3]).unwrap())
        .into_stage();

    assert_eq!(stage.next().unwrap(), at(2024, 1, 30));
    assert_eq!(stage.next().unwrap(), at(2024, 1, 31));
    assert_eq!(stage.next().unwrap(), at(2024, 3, 1));
}

#[test]
fn test_bounds_are_independent() {
    // Every other cycle is empty; a single-instance limit never sees the gaps.
    let upstream = ScriptedStage::from_fn(|cycle| {
        if cycle % 2 == 0 {
            Instance::date_only(2024, 1, 1).into_iter().collect()
        } else {
            Vec::new()
        }
    });
    let mut stage = FilterStage::limiting(upstream, at(2024, 1, 1), |_: &Instance| true)
        .with_limits(IterationLimits {
            max_empty_sets: 1000,
            max_filtered_instances: 5,
        })
        .unwrap();

    let err = stage.next().unwrap_err();
    assert!(matches!(
        err,
        RecurError::IterationBoundExceeded {
            bound: IterationBound::FilteredInstances,
            limit: 5
        }
    ));
    assert_eq!(stage.upstream().instances_pulled(), 5);
}

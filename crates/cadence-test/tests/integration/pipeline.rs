use cadence_core::{Frequency, Instance, Weekday, days_in_month};
use cadence_recur::recur::parts::{ByDay, ByMonth, ByMonthDay};
use cadence_recur::recur::{InstanceSet, PullStage, Scope};
use cadence_test::{Pipeline, take_occurrences};

use super::helpers::{WORKDAYS, at, weekdays};

fn whole_month(instance: &Instance, _start: &Instance, out: &mut InstanceSet) {
    let length = days_in_month(instance.year(), instance.month());
    out.extend((1..=length).filter_map(|day| instance.with_day(day)));
}

#[test_log::test]
fn test_month_day_31_skips_short_months() {
    let pipeline = Pipeline::seeded(at(2024, 1, 1), Frequency::Monthly, 1)
        .unwrap()
        .expand(whole_month)
        .limit(ByMonthDay::new([31], Scope::Monthly).unwrap());
    let mut stage = pipeline.into_stage();

    let january: Vec<_> = stage.next_set().unwrap().iter().copied().collect();
    assert_eq!(january, vec![at(2024, 1, 31)]);

    let next: Vec<_> = stage.next_set().unwrap().iter().copied().collect();
    assert_eq!(next, vec![at(2024, 3, 31)]);
}

#[test]
fn test_weekly_seed_expands_to_workdays() {
    // 2024-01-01 is a Monday.
    let pipeline = Pipeline::seeded(at(2024, 1, 1), Frequency::Weekly, 1)
        .unwrap()
        .expand(ByDay::new(weekdays(&WORKDAYS), Scope::Weekly, Weekday::Monday).unwrap());
    let mut stage = pipeline.into_stage();

    let week: Vec<_> = stage.next_set().unwrap().iter().copied().collect();
    assert_eq!(week, (1..=5).map(|d| at(2024, 1, d)).collect::<Vec<_>>());
}

#[test]
fn test_expand_runs_before_limit() {
    let all_days = weekdays(&[
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ]);
    // The week of Monday 2024-01-29 straddles January and February.
    let start = at(2024, 1, 29);
    let pipeline = Pipeline::seeded(start, Frequency::Weekly, 1)
        .unwrap()
        .expand(ByDay::new(all_days, Scope::Weekly, Weekday::Monday).unwrap())
        .limit(ByMonth::new([2]).unwrap());
    let mut stage = pipeline.into_stage();

    let batch: Vec<_> = stage.next_set().unwrap().iter().copied().collect();
    assert_eq!(batch, (1..=4).map(|d| at(2024, 2, d)).collect::<Vec<_>>());
}

#[test]
fn test_last_workday_of_month() {
    let start = at(2024, 1, 31);
    let pipeline = Pipeline::seeded(start, Frequency::Monthly, 1)
        .unwrap()
        .expand(ByDay::new(weekdays(&WORKDAYS), Scope::Monthly, Weekday::Monday).unwrap())
        .set_positions([-1])
        .unwrap();

    let occurrences = take_occurrences(pipeline, 6).unwrap();
    assert_eq!(
        occurrences,
        vec![
            at(2024, 1, 31),
            at(2024, 2, 29),
            at(2024, 3, 29),
            at(2024, 4, 30),
            at(2024, 5, 31),
            at(2024, 6, 28),
        ]
    );
}

#[test]
fn test_leap_day_every_year() {
    let pipeline = Pipeline::seeded(at(2024, 2, 29), Frequency::Yearly, 1).unwrap();

    let occurrences = take_occurrences(pipeline, 3).unwrap();
    assert_eq!(
        occurrences,
        vec![at(2024, 2, 29), at(2028, 2, 29), at(2032, 2, 29)]
    );
}

#[test]
fn test_long_run_is_strictly_ascending() {
    let pipeline = Pipeline::seeded(at(2024, 1, 1), Frequency::Monthly, 1)
        .unwrap()
        .expand(ByMonthDay::new([1, -1, 15, 31], Scope::Monthly).unwrap());

    let occurrences = take_occurrences(pipeline, 500).unwrap();
    assert_eq!(occurrences.len(), 500);
    for pair in occurrences.windows(2) {
        assert!(pair[0] < pair[1], "{} should precede {}", pair[0], pair[1]);
    }
}

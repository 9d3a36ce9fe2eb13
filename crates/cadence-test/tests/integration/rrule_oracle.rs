//! Cross-checks assembled pipelines against the `rrule` crate.

use cadence_core::{Frequency, Instance, Weekday};
use cadence_recur::recur::Scope;
use cadence_recur::recur::parts::{ByDay, ByMonth, ByMonthDay};
use cadence_test::{Pipeline, take_occurrences};

use super::helpers::{WORKDAYS, at, weekdays};

fn oracle(start: Instance, rule: &str) -> Vec<Instance> {
    let text = format!("DTSTART:{start}Z\nRRULE:{rule}");
    let set = text
        .parse::<rrule::RRuleSet>()
        .expect("oracle rule should parse");
    set.all(100)
        .dates
        .iter()
        .map(|dt| Instance::from_naive(dt.naive_utc()))
        .collect()
}

fn assert_matches_oracle(pipeline: Pipeline, start: Instance, rule: &str) {
    let expected = oracle(start, rule);
    let actual = take_occurrences(pipeline, expected.len()).expect("pipeline should succeed");
    assert_eq!(actual, expected, "rule {rule}");
}

#[test_log::test]
fn test_monthly_31st() {
    let start = at(2024, 1, 31);
    let pipeline = Pipeline::seeded(start, Frequency::Monthly, 1)
        .unwrap()
        .expand(ByMonthDay::new([31], Scope::Monthly).unwrap());

    assert_matches_oracle(pipeline, start, "FREQ=MONTHLY;BYMONTHDAY=31;COUNT=8");
}

#[test]
fn test_weekly_mon_wed_fri() {
    let start = at(2024, 1, 1);
    let days = weekdays(&[Weekday::Monday, Weekday::Wednesday, Weekday::Friday]);
    let pipeline = Pipeline::seeded(start, Frequency::Weekly, 1)
        .unwrap()
        .expand(ByDay::new(days, Scope::Weekly, Weekday::Monday).unwrap());

    assert_matches_oracle(pipeline, start, "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=12");
}

#[test]
fn test_biweekly_tuesday_thursday() {
    let start = at(2024, 3, 5);
    let days = weekdays(&[Weekday::Tuesday, Weekday::Thursday]);
    let pipeline = Pipeline::seeded(start, Frequency::Weekly, 2)
        .unwrap()
        .expand(ByDay::new(days, Scope::Weekly, Weekday::Monday).unwrap());

    assert_matches_oracle(
        pipeline,
        start,
        "FREQ=WEEKLY;INTERVAL=2;BYDAY=TU,TH;COUNT=10",
    );
}

#[test]
fn test_last_workday_of_month() {
    let start = at(2024, 1, 31);
    let pipeline = Pipeline::seeded(start, Frequency::Monthly, 1)
        .unwrap()
        .expand(ByDay::new(weekdays(&WORKDAYS), Scope::Monthly, Weekday::Monday).unwrap())
        .set_positions([-1])
        .unwrap();

    assert_matches_oracle(
        pipeline,
        start,
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1;COUNT=12",
    );
}

#[test]
fn test_yearly_leap_day() {
    let start = at(2024, 2, 29);
    let pipeline = Pipeline::seeded(start, Frequency::Yearly, 1)
        .unwrap()
        .expand(ByMonth::new([2]).unwrap())
        .expand(ByMonthDay::new([29], Scope::resolve(Frequency::Yearly, false, true)).unwrap());

    assert_matches_oracle(pipeline, start, "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=29;COUNT=3");
}

#[test]
fn test_daily_limited_to_months() {
    let start = at(2024, 1, 25);
    let pipeline = Pipeline::seeded(start, Frequency::Daily, 1)
        .unwrap()
        .limit(ByMonth::new([1, 3]).unwrap());

    assert_matches_oracle(pipeline, start, "FREQ=DAILY;BYMONTH=1,3;COUNT=40");
}

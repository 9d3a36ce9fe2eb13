use cadence_core::{Instance, Weekday, WeekdayNum};

pub fn at(year: i32, month: u8, day: u8) -> Instance {
    Instance::new(year, month, day, 9, 0, 0).expect("valid test instance")
}

pub fn weekdays(days: &[Weekday]) -> Vec<WeekdayNum> {
    days.iter().copied().map(WeekdayNum::every).collect()
}

pub const WORKDAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

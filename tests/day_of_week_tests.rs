// Parameterised tests for day parsing, slot ranges and slot labels

use chrono::NaiveTime;
use test_case::test_case;

use timetable_planner::models::block::{BlockError, DayOfWeek, SlotRange};
use timetable_planner::models::settings::Settings;

#[test_case("월", DayOfWeek::Mon ; "korean monday")]
#[test_case("토", DayOfWeek::Sat ; "korean saturday")]
#[test_case(" 일 ", DayOfWeek::Sun ; "korean with padding")]
#[test_case("Tue", DayOfWeek::Tue ; "short english")]
#[test_case("wednesday", DayOfWeek::Wed ; "long lowercase")]
#[test_case("FRI", DayOfWeek::Fri ; "uppercase")]
fn test_day_parsing(input: &str, expected: DayOfWeek) {
    assert_eq!(input.parse::<DayOfWeek>(), Ok(expected));
}

#[test_case("" ; "empty")]
#[test_case("월요" ; "korean word")]
#[test_case("weekend" ; "unknown word")]
fn test_day_parsing_rejects(input: &str) {
    assert!(input.parse::<DayOfWeek>().is_err());
}

#[test]
fn test_display_parses_back() {
    for day in DayOfWeek::ALL {
        assert_eq!(day.to_string().parse::<DayOfWeek>(), Ok(day));
        assert_eq!(day.korean_label().parse::<DayOfWeek>(), Ok(day));
    }
}

#[test_case(vec![3], true ; "single slot")]
#[test_case(vec![2, 3, 4], true ; "contiguous")]
#[test_case(vec![], false ; "empty")]
#[test_case(vec![2, 4], false ; "gap")]
#[test_case(vec![4, 3], false ; "descending")]
#[test_case(vec![3, 3], false ; "repeated")]
fn test_slot_range_shape(slots: Vec<u32>, valid: bool) {
    assert_eq!(SlotRange::new(slots).is_ok(), valid);
}

#[test]
fn test_slot_range_errors_name_the_problem() {
    assert_eq!(SlotRange::new(vec![]), Err(BlockError::EmptyRange));
    assert!(matches!(
        SlotRange::new(vec![2, 4]),
        Err(BlockError::NotContiguous { previous: 2, found: 4 })
    ));
}

#[test_case(1, "09:00~09:30" ; "first slot")]
#[test_case(2, "09:30~10:00" ; "second slot")]
#[test_case(9, "13:00~13:30" ; "after lunch")]
#[test_case(24, "20:30~21:00" ; "last default slot")]
fn test_default_slot_labels(slot: u32, expected: &str) {
    assert_eq!(Settings::default().slot_label(slot), expected);
}

#[test_case(8, 0, 60, 3, "10:00~11:00" ; "hour slots")]
#[test_case(8, 30, 45, 2, "09:15~10:00" ; "odd length")]
fn test_custom_slot_labels(hour: u32, minute: u32, slot_minutes: u32, slot: u32, expected: &str) {
    let settings = Settings {
        first_slot_start: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
        slot_minutes,
        ..Settings::default()
    };
    assert_eq!(settings.slot_label(slot), expected);
}

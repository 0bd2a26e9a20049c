//! Field encodings for `SimpleTimeZone` constructor arguments.

use super::EmitTarget;
use crate::zone::{Month, RuleDay, TimeType};

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Render a duration in seconds as a millisecond constant expression.
///
/// `0` stays `0`; anything else is the sign followed by the non-zero
/// `ONE_HOUR`/`ONE_MINUTE`/`ONE_SECOND` terms, parenthesized when there is
/// more than one.
pub fn formed_duration(seconds: i32) -> String {
    if seconds == 0 {
        return "0".to_string();
    }

    let magnitude = i64::from(seconds).abs();
    let hours = magnitude / SECONDS_PER_HOUR;
    let minutes = magnitude % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
    let secs = magnitude % SECONDS_PER_MINUTE;

    let terms: Vec<String> = [(hours, "ONE_HOUR"), (minutes, "ONE_MINUTE"), (secs, "ONE_SECOND")]
        .into_iter()
        .filter(|(count, _)| *count != 0)
        .map(|(count, unit)| format!("{count}*{unit}"))
        .collect();

    let sign = if seconds < 0 { "-" } else { "" };
    if terms.len() == 1 {
        format!("{sign}{}", terms[0])
    } else {
        format!("{sign}({})", terms.join("+"))
    }
}

pub fn month(month: Month, target: &EmitTarget) -> String {
    format!("{}.{}", target.calendar_class, month.as_str())
}

/// Day-of-month argument: negative counts back from the given day
pub fn day(day: &RuleDay) -> String {
    match day {
        RuleDay::Exact(d) => d.to_string(),
        RuleDay::Last(_) => "-1".to_string(),
        RuleDay::OnOrAfter { day, .. } => day.to_string(),
        RuleDay::OnOrBefore { day, .. } => format!("-{day}"),
    }
}

/// Day-of-week argument: negative means "on or after/before", zero means exact day
pub fn day_of_week(day: &RuleDay, target: &EmitTarget) -> String {
    match day {
        RuleDay::Exact(_) => "0".to_string(),
        RuleDay::Last(weekday) => format!("{}.{}", target.calendar_class, weekday.as_str()),
        RuleDay::OnOrAfter { weekday, .. } | RuleDay::OnOrBefore { weekday, .. } => {
            format!("-{}.{}", target.calendar_class, weekday.as_str())
        }
    }
}

pub fn time_type(kind: TimeType, target: &EmitTarget) -> String {
    format!("{}.{}", target.class_name, kind.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Weekday;

    #[test]
    fn test_formed_duration() {
        assert_eq!(formed_duration(0), "0");
        assert_eq!(formed_duration(3600), "1*ONE_HOUR");
        assert_eq!(formed_duration(-18000), "-5*ONE_HOUR");
        assert_eq!(formed_duration(1800), "30*ONE_MINUTE");
        assert_eq!(formed_duration(19800), "(5*ONE_HOUR+30*ONE_MINUTE)");
        assert_eq!(formed_duration(-12600), "-(3*ONE_HOUR+30*ONE_MINUTE)");
        assert_eq!(formed_duration(-2670), "-(44*ONE_MINUTE+30*ONE_SECOND)");
    }

    #[test]
    fn test_formed_duration_extremes() {
        assert_eq!(formed_duration(i32::MIN), "-(596523*ONE_HOUR+14*ONE_MINUTE+8*ONE_SECOND)");
    }

    #[test]
    fn test_day_fields() {
        let target = EmitTarget::default();
        let cases = [
            (RuleDay::Exact(15), "15", "0"),
            (RuleDay::Last(Weekday::Sunday), "-1", "Calendar.SUNDAY"),
            (RuleDay::OnOrAfter { weekday: Weekday::Sunday, day: 8 }, "8", "-Calendar.SUNDAY"),
            (RuleDay::OnOrBefore { weekday: Weekday::Friday, day: 25 }, "-25", "-Calendar.FRIDAY"),
        ];
        for (rule_day, d, dow) in cases {
            assert_eq!(day(&rule_day), d);
            assert_eq!(day_of_week(&rule_day, &target), dow);
        }
    }

    #[test]
    fn test_named_constants() {
        let target = EmitTarget::default();
        assert_eq!(month(Month::March, &target), "Calendar.MARCH");
        assert_eq!(time_type(TimeType::Utc, &target), "SimpleTimeZone.UTC_TIME");
    }
}

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Canonical key for a local calendar date. Lexicographic order on keys
/// equals chronological order, which the engine relies on everywhere.
pub fn key_for(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Key for the current local date. Local, never UTC: formatting through
/// UTC shifts the apparent "today" near midnight in non-UTC timezones.
pub fn today_key() -> String {
    key_for(Local::now().date_naive())
}

pub fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Key `delta` days away from `key`, crossing month and year boundaries.
/// Keys always come from this module; a malformed key passes through
/// unchanged rather than poisoning the caller.
pub fn step_day(key: &str, delta: i64) -> String {
    match parse_key(key) {
        Some(date) => key_for(date + Duration::days(delta)),
        None => key.to_string(),
    }
}

/// The current local `(year, month)` pair, months `1..=12`.
pub fn this_month() -> (i32, u32) {
    let today = Local::now().date_naive();
    (today.year(), today.month())
}

/// Pure index arithmetic for month navigation: stepping past December
/// wraps to January of the next year and vice versa.
pub fn step_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year * 12 + (month as i32 - 1) + delta;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = step_month(year, month, 1);
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

/// Weekday index of the 1st of the month, Sunday = 0. This is the count
/// of leading blank cells in the month grid.
pub fn first_weekday_from_sunday(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first.format("%B %Y").to_string(),
        None => format!("{year}-{month:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_across_month_and_year_boundaries() {
        assert_eq!(step_day("2024-01-31", 1), "2024-02-01");
        assert_eq!(step_day("2024-03-01", -1), "2024-02-29");
        assert_eq!(step_day("2023-12-31", 1), "2024-01-01");
        assert_eq!(step_day("2024-01-01", -1), "2023-12-31");
    }

    #[test]
    fn key_ordering_matches_chronology() {
        let a = key_for(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
        let b = key_for(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert!(a < b);
        assert_eq!(step_day(&a, 1), b);
    }

    #[test]
    fn month_navigation_wraps() {
        assert_eq!(step_month(2024, 1, -1), (2023, 12));
        assert_eq!(step_month(2024, 12, 1), (2025, 1));
        assert_eq!(step_month(2024, 6, 0), (2024, 6));
        assert_eq!(step_month(2024, 1, -13), (2022, 12));
    }

    #[test]
    fn month_lengths_honor_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn grid_alignment_starts_at_the_firsts_weekday() {
        // 2024-01-01 was a Monday.
        assert_eq!(first_weekday_from_sunday(2024, 1), 1);
        // 2024-09-01 was a Sunday.
        assert_eq!(first_weekday_from_sunday(2024, 9), 0);
    }

    #[test]
    fn month_labels_are_human_readable() {
        assert_eq!(month_label(2024, 3), "March 2024");
    }
}

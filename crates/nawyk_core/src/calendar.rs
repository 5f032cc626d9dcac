use serde::Serialize;

use crate::date;
use crate::habit::{DayState, Habit};

/// Aggregate completion status of one calendar day across every habit
/// active on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    None,
    Partial,
    Full,
}

/// Status of `date_key` across habits with `created_at <= date_key`.
/// Future days, days with no applicable habit, and days where nothing was
/// done all read `None`; a day with zero applicable habits is therefore
/// indistinguishable from a day with zero completions, which is the
/// inherited policy.
pub fn day_status(habits: &[Habit], date_key: &str, today: &str) -> DayStatus {
    if date_key > today {
        return DayStatus::None;
    }
    let mut valid = 0usize;
    let mut done = 0usize;
    for habit in habits {
        if habit.created_at.as_str() <= date_key {
            valid += 1;
            if habit.is_done(date_key) {
                done += 1;
            }
        }
    }
    if valid == 0 || done == 0 {
        DayStatus::None
    } else if done == valid {
        DayStatus::Full
    } else {
        DayStatus::Partial
    }
}

/// One tooltip line: how a single habit fared on a given day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HabitDayEntry {
    pub habit_name: String,
    pub state: DayState,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: String,
    pub day_of_month: u32,
    pub status: DayStatus,
    /// Every habit active on this day, in collection order.
    pub breakdown: Vec<HabitDayEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub label: String,
    /// Blank cells before day 1 so the grid aligns under weekday headers
    /// starting on Sunday. No trailing blanks.
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

/// Builds the monthly overview: one cell per calendar day carrying the
/// aggregate status and the per-habit breakdown for the tooltip.
pub fn month_grid(habits: &[Habit], year: i32, month: u32, today: &str) -> MonthGrid {
    let day_count = date::days_in_month(year, month);
    let mut cells = Vec::with_capacity(day_count as usize);
    for day in 1..=day_count {
        let key = format!("{year:04}-{month:02}-{day:02}");
        let breakdown = habits
            .iter()
            .filter(|habit| habit.created_at.as_str() <= key.as_str())
            .map(|habit| HabitDayEntry {
                habit_name: habit.name.clone(),
                state: habit.day_state(&key, today),
            })
            .collect();
        cells.push(DayCell {
            status: day_status(habits, &key, today),
            date: key,
            day_of_month: day,
            breakdown,
        });
    }
    MonthGrid {
        label: date::month_label(year, month),
        leading_blanks: date::first_weekday_from_sunday(year, month),
        cells,
    }
}

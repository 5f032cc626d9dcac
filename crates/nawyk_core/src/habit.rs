use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::date;

/// A tracked habit. `created_at` is the lower bound for every streak,
/// progress, and calendar computation; days before it are never counted
/// as missed. `done_dates` holds canonical `YYYY-MM-DD` keys, so the set
/// iterates in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub name: String,
    pub created_at: String,
    pub done_dates: BTreeSet<String>,
}

/// How a single calendar day reads for one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Done,
    Missed,
    Future,
}

impl Habit {
    pub fn new(name: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: created_at.into(),
            done_dates: BTreeSet::new(),
        }
    }

    pub fn is_done(&self, key: &str) -> bool {
        self.done_dates.contains(key)
    }

    /// Idempotent flip of one day's membership: add if absent, remove if
    /// present. Keys before `created_at` are ignored to hold the
    /// invariant that no done entry precedes creation.
    pub fn toggle(&mut self, key: &str) {
        if key < self.created_at.as_str() {
            return;
        }
        if !self.done_dates.remove(key) {
            self.done_dates.insert(key.to_string());
        }
    }

    /// Classifies `key` relative to `today`: exactly one of future, done,
    /// or missed.
    pub fn day_state(&self, key: &str, today: &str) -> DayState {
        if key > today {
            DayState::Future
        } else if self.done_dates.contains(key) {
            DayState::Done
        } else {
            DayState::Missed
        }
    }
}

/// Consecutive done days ending at `today` inclusive. Stops at the first
/// gap, or once the cursor passes before `created_at` so malformed
/// entries earlier than creation never count. 0 when today is not done.
pub fn compute_streak(habit: &Habit, today: &str) -> u32 {
    let mut streak = 0;
    let mut date = today.to_string();
    while date.as_str() >= habit.created_at.as_str() && habit.done_dates.contains(&date) {
        streak += 1;
        date = date::step_day(&date, -1);
    }
    streak
}

/// Done days within the trailing window of `n` days ending at `today`
/// inclusive. Days before `created_at` contribute nothing, but the
/// window size stays `n`: the displayed ratio is always `count / n`.
pub fn count_last_n_days(habit: &Habit, n: usize, today: &str) -> usize {
    let mut count = 0;
    let mut date = today.to_string();
    for _ in 0..n {
        if date.as_str() >= habit.created_at.as_str() && habit.done_dates.contains(&date) {
            count += 1;
        }
        date = date::step_day(&date, -1);
    }
    count
}

/// Exactly `n` keys in increasing order for the mini calendar, starting
/// at `created_at` (or `today` if the clock has skewed behind creation).
/// A habit younger than `n` days leaves the tail in the future; the
/// caller marks those slots via [`Habit::day_state`].
pub fn window_dates(habit: &Habit, n: usize, today: &str) -> Vec<String> {
    let mut date = if habit.created_at.as_str() <= today {
        habit.created_at.clone()
    } else {
        today.to_string()
    };
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(date.clone());
        date = date::step_day(&date, 1);
    }
    out
}

/// One mini-calendar slot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WindowDay {
    pub date: String,
    pub state: DayState,
}

/// Everything the habit row needs to render: streak, the trailing-window
/// ratio, and the classified mini-calendar days.
#[derive(Debug, Clone, Serialize)]
pub struct HabitProgress {
    pub streak_count: u32,
    pub window_count: usize,
    pub window_total: usize,
    pub days: Vec<WindowDay>,
}

pub fn progress(habit: &Habit, n: usize, today: &str) -> HabitProgress {
    let days = window_dates(habit, n, today)
        .into_iter()
        .map(|date| {
            let state = habit.day_state(&date, today);
            WindowDay { date, state }
        })
        .collect();
    HabitProgress {
        streak_count: compute_streak(habit, today),
        window_count: count_last_n_days(habit, n, today),
        window_total: n,
        days,
    }
}

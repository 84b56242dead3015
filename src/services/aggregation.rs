// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trailing 7-day bucketing of meal and workout records.
//!
//! The window is `[today - 6 days, today]`, inclusive, and buckets are
//! ordered oldest first. Records whose date cannot be parsed are skipped
//! and counted, never treated as an error.

use chrono::{Days, NaiveDate};

use crate::models::{MealRecord, WorkoutRecord};

/// Number of calendar days in the window.
pub const WINDOW_DAYS: usize = 7;

/// A record that belongs to a calendar day.
pub trait Dated {
    /// Local date of the record, `None` if its stored date is malformed.
    fn record_date(&self) -> Option<NaiveDate>;
}

impl Dated for MealRecord {
    fn record_date(&self) -> Option<NaiveDate> {
        self.local_date()
    }
}

impl Dated for WorkoutRecord {
    fn record_date(&self) -> Option<NaiveDate> {
        self.local_date()
    }
}

/// Totals of one quantity over the trailing window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyTotals {
    /// Sum for records dated today
    pub today_total: u64,
    /// Sum for records inside the window
    pub week_total: u64,
    /// Per-day sums, oldest first; index 6 is today
    pub per_day: [u64; WINDOW_DAYS],
    /// Records dropped because their date could not be parsed
    pub skipped: usize,
}

/// First day of the window ending on `today`.
///
/// Saturates at the earliest representable date.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(WINDOW_DAYS as u64 - 1))
        .unwrap_or(NaiveDate::MIN)
}

/// The seven dates of the window, oldest first.
pub fn window_dates(today: NaiveDate) -> [NaiveDate; WINDOW_DAYS] {
    let start = window_start(today);
    std::array::from_fn(|i| {
        start
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(today)
    })
}

/// Bucket index of `date` in the window starting at `start`.
///
/// `None` for anything outside `0..WINDOW_DAYS`.
fn bucket_index(date: NaiveDate, start: NaiveDate) -> Option<usize> {
    let offset = (date - start).num_days();
    usize::try_from(offset)
        .ok()
        .filter(|&index| index < WINDOW_DAYS)
}

/// Sum `quantity_of` over `records` into today, week and per-day totals.
///
/// Records dated after `today` or before the window start contribute to
/// nothing. The result does not depend on the order of `records`.
pub fn compute_weekly_buckets<R, F>(records: &[R], today: NaiveDate, quantity_of: F) -> WeeklyTotals
where
    R: Dated,
    F: Fn(&R) -> u64,
{
    let start = window_start(today);
    let mut totals = WeeklyTotals::default();

    for record in records {
        let Some(date) = record.record_date() else {
            totals.skipped += 1;
            continue;
        };
        let quantity = quantity_of(record);

        if date == today {
            totals.today_total += quantity;
        }

        if date < start || date > today {
            continue;
        }

        totals.week_total += quantity;
        if let Some(index) = bucket_index(date, start) {
            totals.per_day[index] += quantity;
        }
    }

    totals
}

/// Calories eaten on `today`. Malformed timestamps are ignored.
pub fn compute_daily_calories(meals: &[MealRecord], today: NaiveDate) -> u64 {
    meals
        .iter()
        .filter(|meal| meal.record_date() == Some(today))
        .map(|meal| u64::from(meal.calories))
        .sum()
}

/// Weekly calorie totals (today, window, per day).
pub fn meal_calories(meals: &[MealRecord], today: NaiveDate) -> WeeklyTotals {
    compute_weekly_buckets(meals, today, |meal| u64::from(meal.calories))
}

/// Weekly workout-minute totals (today, window, per day).
pub fn workout_minutes(workouts: &[WorkoutRecord], today: NaiveDate) -> WeeklyTotals {
    compute_weekly_buckets(workouts, today, |workout| {
        u64::from(workout.duration_minutes)
    })
}

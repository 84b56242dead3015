// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard figures computed from a snapshot of a user's records.

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{GoalSettings, MealRecord, WorkoutRecord};
use crate::services::aggregation::{self, WINDOW_DAYS};
use crate::services::goals::goal_percent_opt;

/// Grams of each macronutrient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MacroTotals {
    pub protein: u64,
    pub carbs: u64,
    pub fats: u64,
}

/// Everything the dashboard and goal screens display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardSummary {
    /// Window dates (YYYY-MM-DD), oldest first
    pub days: Vec<String>,

    // ─── Nutrition ───────────────────────────────────────────────
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub today_calories: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<number>"))]
    pub calories_last_7_days: [u64; WINDOW_DAYS],
    pub today_macros: MacroTotals,

    // ─── Training ────────────────────────────────────────────────
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub today_workout_minutes: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub weekly_workout_minutes: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<number>"))]
    pub workouts_last_7_days: [u64; WINDOW_DAYS],

    // ─── Goals ───────────────────────────────────────────────────
    pub goals: GoalSettings,
    /// Today's calories against the daily goal
    pub calorie_progress: u8,
    /// Trailing-week minutes against the weekly goal
    pub workout_progress: u8,

    /// Records left out because their date could not be parsed
    pub skipped_records: usize,
}

/// Build the dashboard for `today` from in-memory snapshots.
pub fn build_dashboard(
    meals: &[MealRecord],
    workouts: &[WorkoutRecord],
    goals: GoalSettings,
    today: NaiveDate,
) -> DashboardSummary {
    let calories = aggregation::meal_calories(meals, today);
    let minutes = aggregation::workout_minutes(workouts, today);

    let today_macros = meals
        .iter()
        .filter(|meal| meal.local_date() == Some(today))
        .fold(MacroTotals::default(), |acc, meal| MacroTotals {
            protein: acc.protein + u64::from(meal.protein),
            carbs: acc.carbs + u64::from(meal.carbs),
            fats: acc.fats + u64::from(meal.fats),
        });

    let skipped_records = calories.skipped + minutes.skipped;
    if skipped_records > 0 {
        tracing::debug!(
            skipped_meals = calories.skipped,
            skipped_workouts = minutes.skipped,
            "Skipped records with malformed dates"
        );
    }

    DashboardSummary {
        days: aggregation::window_dates(today)
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect(),
        today_calories: calories.today_total,
        calories_last_7_days: calories.per_day,
        today_macros,
        today_workout_minutes: minutes.today_total,
        weekly_workout_minutes: minutes.week_total,
        workouts_last_7_days: minutes.per_day,
        goals,
        calorie_progress: goal_percent_opt(calories.today_total, goals.calorie_goal),
        workout_progress: goal_percent_opt(minutes.week_total, goals.workout_goal),
        skipped_records,
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily reminder preferences and trigger computation.

use chrono::{Days, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::AppError;

/// What a fired reminder should nudge the user to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Meal,
    Workout,
}

/// Reminder preferences, stored at `users/{uid}/settings/reminders`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReminderSettings {
    #[serde(default)]
    pub reminders_enabled: bool,
    #[serde(default = "default_true")]
    pub meal_enabled: bool,
    #[serde(default = "default_true")]
    pub workout_enabled: bool,
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
}

fn default_true() -> bool {
    true
}
fn default_hour() -> u32 {
    20
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            reminders_enabled: false,
            meal_enabled: true,
            workout_enabled: true,
            hour: default_hour(),
            minute: 0,
        }
    }
}

impl ReminderSettings {
    /// Reject times that are not on a 24-hour clock.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.hour > 23 || self.minute > 59 {
            return Err(AppError::BadRequest(format!(
                "Invalid reminder time {:02}:{:02}",
                self.hour, self.minute
            )));
        }
        Ok(())
    }

    /// Kinds of reminder to show when the trigger fires.
    pub fn due_reminders(&self) -> Vec<ReminderKind> {
        if !self.reminders_enabled {
            return Vec::new();
        }
        let mut kinds = Vec::with_capacity(2);
        if self.meal_enabled {
            kinds.push(ReminderKind::Meal);
        }
        if self.workout_enabled {
            kinds.push(ReminderKind::Workout);
        }
        kinds
    }

    /// Next instant the daily reminder fires after `now`.
    ///
    /// Today at `hour:minute` if that is still ahead, otherwise tomorrow.
    pub fn next_trigger(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.due_reminders().is_empty() {
            return None;
        }
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
        let today = now.date().and_time(time);
        if today > now {
            Some(today)
        } else {
            today.checked_add_days(Days::new(1))
        }
    }
}

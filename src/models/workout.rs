// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::parse_local_date;

/// Logged workout, stored at `users/{uid}/workouts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutRecord {
    /// Document ID (empty until persisted). The mobile client writes a
    /// numeric `id` field, so the stored field is never read.
    #[serde(default, skip_deserializing)]
    pub id: String,
    /// Workout date (ISO 8601, date only)
    #[serde(default)]
    pub date: String,
    /// Exercise or workout type label (Run, Bench press, ...)
    #[serde(default, rename = "type")]
    pub workout_type: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    /// Weight lifted per rep (kg)
    #[serde(default)]
    pub weight_per_rep: f64,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub calories_burned: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkoutRecord {
    /// Parsed workout date, or `None` if the stored text is malformed.
    pub fn local_date(&self) -> Option<NaiveDate> {
        parse_local_date(&self.date)
    }

    /// Total weight moved: sets × reps × weight per rep.
    pub fn total_volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight_per_rep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_workout(date: &str) -> WorkoutRecord {
        WorkoutRecord {
            id: String::new(),
            date: date.to_string(),
            workout_type: "Squat".to_string(),
            muscle_group: Some("Legs".to_string()),
            sets: 4,
            reps: 8,
            weight_per_rep: 62.5,
            duration_minutes: 25,
            intensity: None,
            calories_burned: None,
            notes: None,
        }
    }

    #[test]
    fn test_total_volume() {
        assert_eq!(make_workout("2024-01-10").total_volume(), 2000.0);
    }

    #[test]
    fn test_cardio_has_zero_volume() {
        let mut workout = make_workout("2024-01-10");
        workout.sets = 0;
        workout.reps = 0;
        workout.weight_per_rep = 0.0;
        assert_eq!(workout.total_volume(), 0.0);
    }

    #[test]
    fn test_type_field_name_matches_client() {
        let doc = serde_json::json!({
            "date": "2024-01-04",
            "type": "Run",
            "durationMinutes": 30,
            "caloriesBurned": 280
        });

        let workout: WorkoutRecord = serde_json::from_value(doc).unwrap();

        assert_eq!(workout.workout_type, "Run");
        assert_eq!(workout.duration_minutes, 30);
        assert_eq!(workout.calories_burned, Some(280));
        assert_eq!(workout.local_date(), NaiveDate::from_ymd_opt(2024, 1, 4));
    }

    #[test]
    fn test_client_numeric_id_is_ignored() {
        let doc = serde_json::json!({
            "id": 0,
            "date": "2024-01-10",
            "type": "Run",
            "durationMinutes": 30
        });

        let workout: WorkoutRecord = serde_json::from_value(doc).unwrap();

        assert_eq!(workout.id, "");
        assert_eq!(workout.duration_minutes, 30);
    }

    #[test]
    fn test_malformed_date() {
        assert_eq!(make_workout("not-a-date").local_date(), None);
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calorie and workout goals.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::AppError;

/// Highest accepted daily calorie goal.
pub const MAX_CALORIE_GOAL: u32 = 4000;
/// Highest accepted weekly workout goal (minutes).
pub const MAX_WORKOUT_GOAL: u32 = 840;

/// The two per-user goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalKind {
    /// Daily calorie target
    Calories,
    /// Weekly workout-minutes target
    WorkoutMinutes,
}

impl GoalKind {
    /// Document ID under `users/{uid}/Goal`, which is also the name of
    /// the field holding the value.
    pub fn document_id(self) -> &'static str {
        match self {
            GoalKind::Calories => "caloricGoal",
            GoalKind::WorkoutMinutes => "workoutGoal",
        }
    }

    pub fn max_value(self) -> u32 {
        match self {
            GoalKind::Calories => MAX_CALORIE_GOAL,
            GoalKind::WorkoutMinutes => MAX_WORKOUT_GOAL,
        }
    }

    /// Accept a goal in `1..=max_value()`.
    pub fn validate(self, value: i64) -> Result<u32, AppError> {
        match value {
            v if v < 1 => Err(AppError::BadRequest("Goal must be at least 1".to_string())),
            v if v > i64::from(self.max_value()) => Err(AppError::BadRequest(match self {
                GoalKind::Calories => format!("Goal cannot exceed {} calories", MAX_CALORIE_GOAL),
                GoalKind::WorkoutMinutes => {
                    format!("Goal cannot exceed {} minutes", MAX_WORKOUT_GOAL)
                }
            })),
            // In 1..=max_value(), so it fits
            v => Ok(v as u32),
        }
    }
}

/// Stored goal document, `{"caloricGoal": n}` or `{"workoutGoal": n}`.
///
/// Values are signed so that anything the mobile client stored reads back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caloric_goal: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_goal: Option<i64>,
    #[serde(default)]
    pub updated_at: String,
}

impl GoalDocument {
    pub fn new(kind: GoalKind, value: u32, updated_at: String) -> Self {
        let value = Some(i64::from(value));
        match kind {
            GoalKind::Calories => Self {
                caloric_goal: value,
                updated_at,
                ..Default::default()
            },
            GoalKind::WorkoutMinutes => Self {
                workout_goal: value,
                updated_at,
                ..Default::default()
            },
        }
    }

    /// Goal for `kind`. Zero, negative and oversized values mean no goal.
    pub fn value(&self, kind: GoalKind) -> Option<u32> {
        let raw = match kind {
            GoalKind::Calories => self.caloric_goal,
            GoalKind::WorkoutMinutes => self.workout_goal,
        };
        raw.and_then(|v| u32::try_from(v).ok()).filter(|&v| v > 0)
    }
}

/// Snapshot of a user's goals. `None` means "no goal set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalSettings {
    pub calorie_goal: Option<u32>,
    pub workout_goal: Option<u32>,
}

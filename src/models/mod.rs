// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod goal;
pub mod meal;
pub mod profile;
pub mod reminder;
pub mod workout;

pub use goal::{GoalKind, GoalSettings};
pub use meal::MealRecord;
pub use profile::{UnitSystem, UserProfile};
pub use reminder::{ReminderKind, ReminderSettings};
pub use workout::WorkoutRecord;

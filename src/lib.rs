// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! NutriFit: meal and workout tracking with calorie and workout goals
//!
//! This crate provides the backend API for the NutriFit app: storage of
//! meals, workouts, goals and preferences, and the dashboard figures
//! (7-day buckets and goal progress) computed from them.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use std::sync::Arc;
use time_utils::Clock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    /// Source of "today" for dashboards and reminders
    pub clock: Arc<dyn Clock>,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - aggregation and goal logic.
//!
//! Everything here is pure: callers pass record snapshots and the
//! current date explicitly.

pub mod aggregation;
pub mod dashboard;
pub mod goals;
pub mod units;

pub use aggregation::{compute_daily_calories, compute_weekly_buckets, Dated, WeeklyTotals};
pub use dashboard::{build_dashboard, DashboardSummary};
pub use goals::goal_percent;

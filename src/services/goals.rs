// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal progress percentage.

/// Progress towards `goal` as a whole percentage in `0..=100`.
///
/// A goal of zero or less means no goal is set and yields 0, not 100.
/// The ratio is truncated towards zero, so 1999 of 2000 is 99%.
pub fn goal_percent(current: i64, goal: i64) -> u8 {
    if goal <= 0 {
        return 0;
    }
    let percent = i128::from(current) * 100 / i128::from(goal);
    // Clamped to 0..=100, so the cast cannot truncate
    percent.clamp(0, 100) as u8
}

/// `goal_percent` for an optional stored goal.
pub fn goal_percent_opt(current: u64, goal: Option<u32>) -> u8 {
    let current = i64::try_from(current).unwrap_or(i64::MAX);
    goal_percent(current, goal.map(i64::from).unwrap_or(0))
}

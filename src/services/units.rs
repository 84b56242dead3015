// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Height and weight conversion between metric and imperial units.
//!
//! Canonical storage is whole centimeters and kilograms. Conversions
//! round, so round trips are only accurate to about one unit.

const CM_PER_INCH: f64 = 2.54;
const INCHES_PER_FOOT: u32 = 12;
const LB_PER_KG: f64 = 2.2046226218;

/// Split a height in centimeters into feet and inches.
pub fn cm_to_feet_inches(cm: u32) -> (u32, u32) {
    let total_inches = (f64::from(cm) / CM_PER_INCH).round() as u32;
    (total_inches / INCHES_PER_FOOT, total_inches % INCHES_PER_FOOT)
}

/// Height in whole centimeters for `feet` and `inches`.
///
/// `inches` above 11 simply carries into the total.
pub fn feet_inches_to_cm(feet: u32, inches: u32) -> u32 {
    let total_inches = f64::from(feet) * f64::from(INCHES_PER_FOOT) + f64::from(inches);
    (total_inches * CM_PER_INCH).round() as u32
}

/// Weight in whole pounds. Negative or NaN input maps to 0.
pub fn kg_to_lb(kg: f64) -> u32 {
    (kg * LB_PER_KG).round() as u32
}

/// Weight in kilograms. Negative or NaN input maps to 0.
pub fn lb_to_kg(lb: f64) -> f64 {
    if lb.is_nan() || lb <= 0.0 {
        return 0.0;
    }
    lb / LB_PER_KG
}

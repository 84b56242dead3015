// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Property tests for metric/imperial conversion.

use nutrifit_tracker::services::units::{cm_to_feet_inches, feet_inches_to_cm, kg_to_lb, lb_to_kg};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_height_round_trip_within_one_cm(cm in 120u32..=220) {
        let (feet, inches) = cm_to_feet_inches(cm);
        let back = feet_inches_to_cm(feet, inches);
        prop_assert!(back.abs_diff(cm) <= 1, "{} cm -> {}'{}\" -> {} cm", cm, feet, inches, back);
    }

    #[test]
    fn prop_inches_always_below_twelve(cm in 0u32..400) {
        let (_, inches) = cm_to_feet_inches(cm);
        prop_assert!(inches < 12);
    }

    #[test]
    fn prop_weight_round_trip_within_half_kg(kg in 40.0f64..=200.0) {
        let back = lb_to_kg(f64::from(kg_to_lb(kg)));
        prop_assert!((back - kg).abs() <= 0.5, "{} kg -> {} kg", kg, back);
    }

    #[test]
    fn prop_non_positive_pounds_are_zero(lb in -1000.0f64..=0.0) {
        prop_assert_eq!(lb_to_kg(lb), 0.0);
    }
}

#[test]
fn test_known_conversions() {
    assert_eq!(cm_to_feet_inches(180), (5, 11));
    assert_eq!(feet_inches_to_cm(6, 0), 183);
    assert_eq!(kg_to_lb(100.0), 220);
    assert!((lb_to_kg(220.0) - 99.79).abs() < 0.01);
    assert_eq!(lb_to_kg(f64::NAN), 0.0);
}

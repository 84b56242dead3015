// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal log model for storage and API.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::parse_local_date_time;

/// Logged meal, stored at `users/{uid}/meals/{id}`.
///
/// Field names follow the documents written by the mobile client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealRecord {
    /// Document ID (empty until persisted). Never read from stored
    /// fields: the store fills it from the document name.
    #[serde(default, skip_deserializing)]
    pub id: String,
    /// Local date-time the meal was eaten (ISO 8601, no offset)
    #[serde(default)]
    pub date_time: String,
    /// Breakfast, lunch, dinner, snack or anything the user typed
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub calories: u32,
    /// Grams
    #[serde(default)]
    pub protein: u32,
    /// Grams
    #[serde(default)]
    pub carbs: u32,
    /// Grams
    #[serde(default)]
    pub fats: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MealRecord {
    /// Parsed timestamp, or `None` if the stored text is malformed.
    pub fn local_date_time(&self) -> Option<NaiveDateTime> {
        parse_local_date_time(&self.date_time)
    }

    /// Calendar date the meal belongs to.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.local_date_time().map(|dt| dt.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_client_document() {
        let doc = serde_json::json!({
            "dateTime": "2024-01-10T12:15",
            "mealType": "lunch",
            "calories": 650,
            "protein": 30,
            "notes": null
        });

        let meal: MealRecord = serde_json::from_value(doc).unwrap();

        assert_eq!(meal.id, "");
        assert_eq!(meal.meal_type, "lunch");
        assert_eq!(meal.calories, 650);
        assert_eq!(meal.carbs, 0);
        assert_eq!(meal.local_date(), NaiveDate::from_ymd_opt(2024, 1, 10));
    }

    #[test]
    fn test_stored_id_field_is_ignored() {
        let doc = serde_json::json!({
            "id": 17,
            "_firestore_id": "abc",
            "dateTime": "2024-01-10T12:15",
            "mealType": "lunch",
            "calories": 650
        });

        let meal: MealRecord = serde_json::from_value(doc).unwrap();

        assert_eq!(meal.id, "");
        assert_eq!(meal.calories, 650);
    }

    #[test]
    fn test_malformed_timestamp_has_no_date() {
        let meal = MealRecord {
            id: "m1".to_string(),
            date_time: "yesterday-ish".to_string(),
            meal_type: "snack".to_string(),
            calories: 100,
            protein: 0,
            carbs: 0,
            fats: 0,
            notes: None,
        };

        assert_eq!(meal.local_date(), None);
    }
}

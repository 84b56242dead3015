// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Meals and workouts (`users/{uid}/meals`, `users/{uid}/workouts`)
//! - Goals (`users/{uid}/Goal`)
//! - Reminder settings (`users/{uid}/settings/reminders`)
//! - Profiles (fields of `users/{uid}`)

use crate::db::collections;
use crate::error::AppError;
use crate::models::goal::GoalDocument;
use crate::models::profile::PROFILE_FIELDS;
use crate::models::{
    GoalKind, GoalSettings, MealRecord, ReminderSettings, UserProfile, WorkoutRecord,
};
use crate::time_utils::format_utc_rfc3339;
use firestore::{FirestoreDocument, ParentPathBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator does not accept real credentials
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Whether a real (or emulator) connection backs this store.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Parent path `users/{uid}` for the user's subcollections.
    fn user_path(&self, user_id: &str) -> Result<ParentPathBuilder, AppError> {
        self.get_client()?
            .parent_path(collections::USERS, user_id)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Raw documents of one of the user's subcollections, newest first.
    async fn list_documents(
        &self,
        user_id: &str,
        collection: &str,
        order_field: &str,
    ) -> Result<Vec<FirestoreDocument>, AppError> {
        let parent = self.user_path(user_id)?;
        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .parent(&parent)
            .order_by([(order_field, firestore::FirestoreQueryDirection::Descending)])
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn get_document(
        &self,
        user_id: &str,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<FirestoreDocument>, AppError> {
        let parent = self.user_path(user_id)?;
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .parent(&parent)
            .one(doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// IDs of every document in one of the user's subcollections,
    /// including documents that do not decode.
    async fn list_document_ids(
        &self,
        parent: &ParentPathBuilder,
        collection: &str,
    ) -> Result<Vec<String>, AppError> {
        let documents: Vec<FirestoreDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collection)
            .parent(parent)
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(documents
            .iter()
            .map(|doc| document_id(doc).to_string())
            .collect())
    }

    // ─── Meal Operations ─────────────────────────────────────────

    /// All meals for a user, newest first. Documents that do not decode
    /// as a meal are skipped.
    pub async fn list_meals(&self, user_id: &str) -> Result<Vec<MealRecord>, AppError> {
        let documents = self
            .list_documents(user_id, collections::MEALS, "dateTime")
            .await?;
        Ok(decode_records(&documents, collections::MEALS))
    }

    /// Get a meal by document ID. A document that does not decode reads
    /// as missing.
    pub async fn get_meal(
        &self,
        user_id: &str,
        meal_id: &str,
    ) -> Result<Option<MealRecord>, AppError> {
        let document = self
            .get_document(user_id, collections::MEALS, meal_id)
            .await?;
        Ok(document.and_then(|doc| decode_record(&doc).ok()))
    }

    /// Store a new meal under a freshly generated ID and return it.
    pub async fn add_meal(&self, user_id: &str, meal: &MealRecord) -> Result<MealRecord, AppError> {
        let meal = MealRecord {
            id: uuid::Uuid::new_v4().to_string(),
            ..meal.clone()
        };
        self.write_record(user_id, collections::MEALS, &meal.id, &meal)
            .await?;
        tracing::debug!(user_id, meal_id = %meal.id, "Meal added");
        Ok(meal)
    }

    /// Replace an existing meal, matched by its ID.
    pub async fn update_meal(&self, user_id: &str, meal: &MealRecord) -> Result<(), AppError> {
        if meal.id.trim().is_empty() {
            return Err(AppError::BadRequest("Meal has no ID".to_string()));
        }
        self.write_record(user_id, collections::MEALS, &meal.id, meal)
            .await
    }

    /// Delete a meal.
    pub async fn delete_meal(&self, user_id: &str, meal_id: &str) -> Result<(), AppError> {
        self.delete_record(user_id, collections::MEALS, meal_id)
            .await
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// All workouts for a user, newest first. Documents that do not
    /// decode as a workout are skipped.
    pub async fn list_workouts(&self, user_id: &str) -> Result<Vec<WorkoutRecord>, AppError> {
        let documents = self
            .list_documents(user_id, collections::WORKOUTS, "date")
            .await?;
        Ok(decode_records(&documents, collections::WORKOUTS))
    }

    /// Get a workout by document ID.
    pub async fn get_workout(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<Option<WorkoutRecord>, AppError> {
        let document = self
            .get_document(user_id, collections::WORKOUTS, workout_id)
            .await?;
        Ok(document.and_then(|doc| decode_record(&doc).ok()))
    }

    /// Store a new workout under a freshly generated ID and return it.
    pub async fn add_workout(
        &self,
        user_id: &str,
        workout: &WorkoutRecord,
    ) -> Result<WorkoutRecord, AppError> {
        let workout = WorkoutRecord {
            id: uuid::Uuid::new_v4().to_string(),
            ..workout.clone()
        };
        self.write_record(user_id, collections::WORKOUTS, &workout.id, &workout)
            .await?;
        tracing::debug!(user_id, workout_id = %workout.id, "Workout added");
        Ok(workout)
    }

    /// Replace an existing workout, matched by its ID.
    pub async fn update_workout(
        &self,
        user_id: &str,
        workout: &WorkoutRecord,
    ) -> Result<(), AppError> {
        if workout.id.trim().is_empty() {
            return Err(AppError::BadRequest("Workout has no ID".to_string()));
        }
        self.write_record(user_id, collections::WORKOUTS, &workout.id, workout)
            .await
    }

    /// Delete a workout.
    pub async fn delete_workout(&self, user_id: &str, workout_id: &str) -> Result<(), AppError> {
        self.delete_record(user_id, collections::WORKOUTS, workout_id)
            .await
    }

    async fn write_record<T>(
        &self,
        user_id: &str,
        collection: &str,
        doc_id: &str,
        record: &T,
    ) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Sync + Send,
    {
        let parent = self.user_path(user_id)?;
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(doc_id)
            .parent(&parent)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_record(
        &self,
        user_id: &str,
        collection: &str,
        doc_id: &str,
    ) -> Result<(), AppError> {
        let parent = self.user_path(user_id)?;
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(doc_id)
            .parent(&parent)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        tracing::debug!(user_id, collection, doc_id, "Record deleted");
        Ok(())
    }

    // ─── Goal Operations ─────────────────────────────────────────

    /// Stored goal value, `None` if the user never set a usable one.
    pub async fn get_goal(&self, user_id: &str, kind: GoalKind) -> Result<Option<u32>, AppError> {
        let parent = self.user_path(user_id)?;
        let doc: Option<GoalDocument> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::GOALS)
            .parent(&parent)
            .obj()
            .one(kind.document_id())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(doc.and_then(|d| d.value(kind)))
    }

    /// Create or replace a goal.
    pub async fn set_goal(&self, user_id: &str, kind: GoalKind, value: u32) -> Result<(), AppError> {
        let parent = self.user_path(user_id)?;
        let doc = GoalDocument::new(kind, value, format_utc_rfc3339(chrono::Utc::now()));
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::GOALS)
            .document_id(kind.document_id())
            .parent(&parent)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(user_id, goal = ?kind, value, "Goal updated");
        Ok(())
    }

    /// Both goals of a user.
    pub async fn get_goal_settings(&self, user_id: &str) -> Result<GoalSettings, AppError> {
        let (calorie_goal, workout_goal) = futures_util::future::try_join(
            self.get_goal(user_id, GoalKind::Calories),
            self.get_goal(user_id, GoalKind::WorkoutMinutes),
        )
        .await?;

        Ok(GoalSettings {
            calorie_goal,
            workout_goal,
        })
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Profile fields of the `users/{uid}` document. A document whose
    /// profile fields do not decode reads as no profile.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        let document: Option<FirestoreDocument> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(document.and_then(|doc| {
            firestore::firestore_document_to_serializable(&doc)
                .map_err(|e| tracing::warn!(user_id, error = %e, "Unreadable profile fields"))
                .ok()
        }))
    }

    /// Merge the profile fields into `users/{uid}`, leaving any other
    /// fields of the document untouched.
    pub async fn upsert_profile(&self, user_id: &str, profile: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(PROFILE_FIELDS)
            .in_col(collections::USERS)
            .document_id(user_id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Reminder Settings ───────────────────────────────────────

    /// Reminder settings, defaults when never saved.
    pub async fn get_reminder_settings(&self, user_id: &str) -> Result<ReminderSettings, AppError> {
        let parent = self.user_path(user_id)?;
        let settings: Option<ReminderSettings> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::SETTINGS)
            .parent(&parent)
            .obj()
            .one(collections::REMINDERS_DOC)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(settings.unwrap_or_default())
    }

    /// Replace reminder settings.
    pub async fn set_reminder_settings(
        &self,
        user_id: &str,
        settings: &ReminderSettings,
    ) -> Result<(), AppError> {
        let parent = self.user_path(user_id)?;
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::SETTINGS)
            .document_id(collections::REMINDERS_DOC)
            .parent(&parent)
            .object(settings)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch delete documents of one subcollection using transactions.
    async fn batch_delete(
        &self,
        parent: &ParentPathBuilder,
        collection: &str,
        doc_ids: &[String],
    ) -> Result<(), AppError> {
        let client = self.get_client()?;

        for chunk in doc_ids.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for doc_id in chunk {
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(doc_id)
                    .parent(parent)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    // ─── User Data Deletion ────────────────────────────────────────

    /// Delete ALL data for a user.
    ///
    /// Deletes meals, workouts, goals, reminder settings and the user
    /// document with its profile. Returns the number of record documents
    /// deleted.
    pub async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        let parent = self.user_path(user_id)?;

        let (meal_ids, workout_ids) = futures_util::future::try_join(
            self.list_document_ids(&parent, collections::MEALS),
            self.list_document_ids(&parent, collections::WORKOUTS),
        )
        .await?;

        self.batch_delete(&parent, collections::MEALS, &meal_ids)
            .await?;
        tracing::debug!(user_id, count = meal_ids.len(), "Deleted meals");

        self.batch_delete(&parent, collections::WORKOUTS, &workout_ids)
            .await?;
        tracing::debug!(user_id, count = workout_ids.len(), "Deleted workouts");

        let goal_ids: Vec<String> = [GoalKind::Calories, GoalKind::WorkoutMinutes]
            .iter()
            .map(|kind| kind.document_id().to_string())
            .collect();
        self.batch_delete(&parent, collections::GOALS, &goal_ids)
            .await?;
        self.batch_delete(
            &parent,
            collections::SETTINGS,
            &[collections::REMINDERS_DOC.to_string()],
        )
        .await?;

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(user_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted_count = meal_ids.len() + workout_ids.len();
        tracing::info!(user_id, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}

// ─── Document Decoding ───────────────────────────────────────────

/// A record whose ID is the name of its document.
trait StoredRecord: DeserializeOwned {
    fn set_id(&mut self, id: String);
}

impl StoredRecord for MealRecord {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl StoredRecord for WorkoutRecord {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Last segment of a document name.
fn document_id(doc: &FirestoreDocument) -> &str {
    doc.name.rsplit('/').next().unwrap_or_default()
}

fn decode_record<T: StoredRecord>(doc: &FirestoreDocument) -> Result<T, AppError> {
    let mut record: T = firestore::firestore_document_to_serializable(doc)
        .map_err(|e| AppError::Database(e.to_string()))?;
    record.set_id(document_id(doc).to_string());
    Ok(record)
}

/// Decode each document on its own, skipping the ones that do not fit.
fn decode_records<T: StoredRecord>(documents: &[FirestoreDocument], collection: &str) -> Vec<T> {
    let mut records = Vec::with_capacity(documents.len());
    for doc in documents {
        match decode_record(doc) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::debug!(collection, doc_id = document_id(doc), error = %e, "Skipping undecodable document");
            }
        }
    }
    records
}

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// User documents (keyed by uid); profile fields live on the document
    pub const USERS: &str = "users";
    /// `users/{uid}/meals`
    pub const MEALS: &str = "meals";
    /// `users/{uid}/workouts`
    pub const WORKOUTS: &str = "workouts";
    /// `users/{uid}/Goal`, one document per goal kind
    pub const GOALS: &str = "Goal";
    /// `users/{uid}/settings`
    pub const SETTINGS: &str = "settings";
    /// Document ID of the reminder settings under `settings`
    pub const REMINDERS_DOC: &str = "reminders";
}

/// Longest document ID Firestore accepts, in bytes.
pub const MAX_DOCUMENT_ID_BYTES: usize = 1500;

/// Whether `id` can name a Firestore document.
///
/// Rejects empty IDs, `.` and `..`, anything containing `/`, reserved
/// `__name__` style IDs and IDs over 1500 bytes.
pub fn is_valid_document_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_DOCUMENT_ID_BYTES
        && id != "."
        && id != ".."
        && !id.contains('/')
        && !(id.len() >= 4 && id.starts_with("__") && id.ends_with("__"))
}

/// Repository interfaces for birthday sources, manual entries and notes
mod contacts;
#[cfg(test)]
mod memory;

use std::future::Future;

use crate::engine::BirthdayRecord;
use crate::utils::string_utils::full_name;

pub use contacts::GuildContacts;
#[cfg(test)]
pub use memory::MemoryStore;

/// Error types for persistent stores
#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A birthday typed in by hand, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualBirthdayDraft {
    pub first_name: String,
    pub last_name: String,
    pub month: u32,
    pub day: u32,
    pub year: Option<i32>,
}

impl ManualBirthdayDraft {
    pub fn with_id(self, id: i64) -> ManualBirthday {
        ManualBirthday {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            month: self.month,
            day: self.day,
            year: self.year,
        }
    }
}

/// A persisted manual birthday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualBirthday {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub month: u32,
    pub day: u32,
    pub year: Option<i32>,
}

impl ManualBirthday {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    pub fn to_record(&self) -> BirthdayRecord {
        BirthdayRecord::manual(self.id, self.full_name(), self.month, self.day, self.year)
    }
}

/// Supplies contact-backed birthdays
///
/// Failures (missing permissions, unreachable upstream) degrade to an empty
/// list and are logged, never propagated.
pub trait ContactSource {
    fn fetch_birthdays(&self) -> impl Future<Output = Vec<BirthdayRecord>> + Send;

    /// Contacts whose name contains `query`, ignoring case
    #[allow(dead_code)]
    fn search(&self, query: &str) -> impl Future<Output = Vec<BirthdayRecord>> + Send
    where
        Self: Sync,
    {
        let needle = query.to_lowercase();
        async move {
            if needle.is_empty() {
                return Vec::new();
            }
            self.fetch_birthdays()
                .await
                .into_iter()
                .filter(|record| record.full_name.to_lowercase().contains(&needle))
                .collect()
        }
    }
}

/// Persisted list of manually entered birthdays
pub trait ManualStore {
    fn load(&self) -> impl Future<Output = StoreResult<Vec<ManualBirthday>>> + Send;

    /// Replace the whole list
    #[allow(dead_code)]
    fn save(&self, items: &[ManualBirthday]) -> impl Future<Output = StoreResult<()>> + Send;

    fn add(&self, draft: ManualBirthdayDraft)
    -> impl Future<Output = StoreResult<ManualBirthday>> + Send;

    /// Returns false when no entry has this id
    fn update(&self, item: &ManualBirthday) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Returns false when no entry has this id
    fn remove(&self, id: i64) -> impl Future<Output = StoreResult<bool>> + Send;
}

/// Free-text notes keyed by person id
pub trait NotesStore {
    /// The note for `person_id`, or an empty string
    fn load(&self, person_id: &str) -> impl Future<Output = StoreResult<String>> + Send;

    /// Save a note; blank text deletes it
    fn save(&self, person_id: &str, text: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

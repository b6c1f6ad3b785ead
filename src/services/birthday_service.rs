/// Birthday service - merges birthday sources and resolves people for the commands
use chrono::NaiveDate;
use tracing::warn;

use crate::engine::{search, BirthdayRecord};
use crate::store::{ContactSource, ManualStore};

/// Outcome of looking a person up by id or name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonLookup {
    Found(BirthdayRecord),
    Ambiguous(Vec<BirthdayRecord>),
    NotFound,
}

/// Service combining contact-backed and manual birthdays
pub struct BirthdayService<'a, C, M> {
    contacts: &'a C,
    manual: &'a M,
}

impl<'a, C, M> BirthdayService<'a, C, M>
where
    C: ContactSource + Sync,
    M: ManualStore + Sync,
{
    /// Create a new birthday service
    pub fn new(contacts: &'a C, manual: &'a M) -> Self {
        Self { contacts, manual }
    }

    /// Every known birthday, contacts first then manual entries
    ///
    /// A failing manual store degrades to contacts only.
    pub async fn load_all(&self) -> Vec<BirthdayRecord> {
        let mut records = self.contacts.fetch_birthdays().await;

        match self.manual.load().await {
            Ok(items) => records.extend(items.iter().map(|item| item.to_record())),
            Err(e) => warn!("Failed to load manual birthdays: {}", e),
        }

        records
    }

    /// Resolve a person among all known birthdays
    pub async fn find_person(&self, query: &str, today: NaiveDate) -> PersonLookup {
        let records = self.load_all().await;
        resolve_person(&records, query, today)
    }
}

/// Resolve a person by record id, `#<manual id>`, exact name, or name fragment
pub fn resolve_person(records: &[BirthdayRecord], query: &str, today: NaiveDate) -> PersonLookup {
    let query = query.trim();
    if query.is_empty() {
        return PersonLookup::NotFound;
    }

    let manual_id = query.strip_prefix('#').and_then(|id| id.parse::<i64>().ok());
    if let Some(record) = records.iter().find(|record| {
        record.id.as_str() == query || (manual_id.is_some() && record.id.manual_id() == manual_id)
    }) {
        return PersonLookup::Found(record.clone());
    }

    let lowered = query.to_lowercase();
    let exact: Vec<&BirthdayRecord> = records
        .iter()
        .filter(|record| record.full_name.to_lowercase() == lowered)
        .collect();
    if let [only] = exact.as_slice() {
        return PersonLookup::Found((*only).clone());
    }

    let matches = search(records, query, today);
    match matches.as_slice() {
        [] => PersonLookup::NotFound,
        [only] => PersonLookup::Found((*only).clone()),
        many => PersonLookup::Ambiguous(many.iter().map(|record| (*record).clone()).collect()),
    }
}

/// Birthday records consumed by the engine (source-agnostic)
use std::fmt;

/// Where a record came from, carried through for edit/delete routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A server member who registered their own birthday
    Contact,
    /// An entry typed in by hand and persisted per server
    Manual,
}

/// Opaque identifier, unique within a merged record set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn contact(user_id: u64) -> Self {
        Self(format!("contact:{}", user_id))
    }

    pub fn manual(id: i64) -> Self {
        Self(format!("manual:{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Row id of a manual record, if this id belongs to one
    pub fn manual_id(&self) -> Option<i64> {
        self.0.strip_prefix("manual:")?.parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person's birthday as the engine sees it
///
/// `month` is 1-12 and `day` is 1-31. Callers validate before building
/// records; the engine never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayRecord {
    pub id: RecordId,
    pub full_name: String,
    pub month: u32,
    pub day: u32,
    pub year: Option<i32>,
    pub origin: Origin,
}

impl BirthdayRecord {
    /// Build a contact-backed record for a server member
    pub fn contact(
        user_id: u64,
        full_name: impl Into<String>,
        month: u32,
        day: u32,
        year: Option<i32>,
    ) -> Self {
        Self {
            id: RecordId::contact(user_id),
            full_name: full_name.into(),
            month,
            day,
            year,
            origin: Origin::Contact,
        }
    }

    /// Build a record for a manually entered birthday
    pub fn manual(
        id: i64,
        full_name: impl Into<String>,
        month: u32,
        day: u32,
        year: Option<i32>,
    ) -> Self {
        Self {
            id: RecordId::manual(id),
            full_name: full_name.into(),
            month,
            day,
            year,
            origin: Origin::Manual,
        }
    }

    /// Lowercased name used for case-insensitive ordering and matching
    pub(crate) fn sort_name(&self) -> String {
        self.full_name.to_lowercase()
    }
}

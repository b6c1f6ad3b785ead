use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

use super::{ManualBirthday, ManualBirthdayDraft, ManualStore, NotesStore, StoreResult};
use crate::utils::string_utils::is_empty_or_whitespace;

/// In-process store for manual birthdays and notes
///
/// Nothing survives a restart; ids are handed out in increasing order.
#[derive(Debug)]
pub struct MemoryStore {
    birthdays: DashMap<i64, ManualBirthday>,
    notes: DashMap<String, String>,
    next_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            birthdays: DashMap::new(),
            notes: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl ManualStore for MemoryStore {
    async fn load(&self) -> StoreResult<Vec<ManualBirthday>> {
        let mut items: Vec<ManualBirthday> = self
            .birthdays
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn save(&self, items: &[ManualBirthday]) -> StoreResult<()> {
        self.birthdays.clear();
        for item in items {
            self.birthdays.insert(item.id, item.clone());
        }

        let max_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        self.next_id.fetch_max(max_id + 1, Ordering::SeqCst);
        Ok(())
    }

    async fn add(&self, draft: ManualBirthdayDraft) -> StoreResult<ManualBirthday> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let item = draft.with_id(id);
        self.birthdays.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: &ManualBirthday) -> StoreResult<bool> {
        match self.birthdays.get_mut(&item.id) {
            Some(mut existing) => {
                *existing = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: i64) -> StoreResult<bool> {
        Ok(self.birthdays.remove(&id).is_some())
    }
}

impl NotesStore for MemoryStore {
    async fn load(&self, person_id: &str) -> StoreResult<String> {
        Ok(self
            .notes
            .get(person_id)
            .map(|note| note.value().clone())
            .unwrap_or_default())
    }

    async fn save(&self, person_id: &str, text: &str) -> StoreResult<()> {
        if is_empty_or_whitespace(text) {
            self.notes.remove(person_id);
        } else {
            self.notes.insert(person_id.to_string(), text.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first_name: &str, month: u32, day: u32) -> ManualBirthdayDraft {
        ManualBirthdayDraft {
            first_name: first_name.to_string(),
            last_name: String::new(),
            month,
            day,
            year: None,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let ana = store.add(draft("Ana", 3, 10)).await.unwrap();
        let ben = store.add(draft("Ben", 3, 15)).await.unwrap();

        assert!(ben.id > ana.id);
        let loaded = ManualStore::load(&store).await.unwrap();
        assert_eq!(loaded, vec![ana, ben]);
    }

    #[tokio::test]
    async fn test_update_existing_and_unknown() {
        let store = MemoryStore::new();
        let mut ana = store.add(draft("Ana", 3, 10)).await.unwrap();

        ana.day = 11;
        assert!(store.update(&ana).await.unwrap());
        assert_eq!(ManualStore::load(&store).await.unwrap()[0].day, 11);

        let ghost = draft("Ghost", 1, 1).with_id(999);
        assert!(!store.update(&ghost).await.unwrap());
        assert_eq!(ManualStore::load(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryStore::new();
        let ana = store.add(draft("Ana", 3, 10)).await.unwrap();

        assert!(store.remove(ana.id).await.unwrap());
        assert!(!store.remove(ana.id).await.unwrap());
        assert!(ManualStore::load(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_list_and_keeps_ids_unique() {
        let store = MemoryStore::new();
        store.add(draft("Old", 1, 1)).await.unwrap();

        let imported = vec![draft("Ana", 3, 10).with_id(10), draft("Ben", 3, 15).with_id(20)];
        ManualStore::save(&store, &imported).await.unwrap();
        assert_eq!(ManualStore::load(&store).await.unwrap(), imported);

        let next = store.add(draft("Cleo", 1, 1)).await.unwrap();
        assert_eq!(next.id, 21);
    }

    #[tokio::test]
    async fn test_notes_round_trip_and_blank_deletes() {
        let store = MemoryStore::new();
        assert_eq!(NotesStore::load(&store, "manual:1").await.unwrap(), "");

        NotesStore::save(&store, "manual:1", "Likes tulips").await.unwrap();
        assert_eq!(NotesStore::load(&store, "manual:1").await.unwrap(), "Likes tulips");

        NotesStore::save(&store, "manual:1", "   \n").await.unwrap();
        assert_eq!(NotesStore::load(&store, "manual:1").await.unwrap(), "");
    }
}

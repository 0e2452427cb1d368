use std::rc::Rc;

use crate::app::infrastructure::error::StoreError;
use crate::app::infrastructure::store::{keys, DurableStore, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyFavorite,
}

/// Duplicate-free, insertion-ordered list of favorite passages.
///
/// Every change rewrites the whole `favorites` value; there is no partial
/// update on disk.
pub struct FavoritesLedger {
    store: Rc<dyn DurableStore>,
    entries: Vec<String>,
}

impl FavoritesLedger {
    pub fn new(store: Rc<dyn DurableStore>) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Reload from the store and return the persisted collection.
    /// Unreadable or malformed data reads as empty.
    pub fn list(&mut self) -> &[String] {
        self.entries = self.read_persisted();
        &self.entries
    }

    /// Last loaded collection, without touching the store
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Append `entry` unless an identical one is already stored.
    ///
    /// The persisted collection is re-read first so the rewrite never drops
    /// entries written by another session. If that read fails or the record
    /// is malformed nothing is written. On write failure the in-memory
    /// collection is left as it was.
    pub fn add(&mut self, entry: &str) -> StoreResult<AddOutcome> {
        let mut updated = self.try_read_persisted()?;
        if updated.iter().any(|e| e == entry) {
            self.entries = updated;
            tracing::debug!(entry, "already a favorite");
            return Ok(AddOutcome::AlreadyFavorite);
        }

        updated.push(entry.to_string());
        self.write(&updated)?;
        self.entries = updated;
        tracing::info!(count = self.entries.len(), "favorite added");
        Ok(AddOutcome::Added)
    }

    /// Remove an exact match. Returns whether anything was removed.
    pub fn remove(&mut self, entry: &str) -> StoreResult<bool> {
        let mut updated = self.try_read_persisted()?;
        let before = updated.len();
        updated.retain(|e| e != entry);
        if updated.len() == before {
            self.entries = updated;
            return Ok(false);
        }

        self.write(&updated)?;
        self.entries = updated;
        tracing::info!(count = self.entries.len(), "favorite removed");
        Ok(true)
    }

    /// Forget the in-memory copy after the store has been wiped.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    fn read_persisted(&self) -> Vec<String> {
        self.try_read_persisted().unwrap_or_else(|err| {
            tracing::warn!(%err, "could not load favorites; treating as empty");
            Vec::new()
        })
    }

    /// Persisted collection, failing on unreadable or malformed data so a
    /// rewrite is never based on a partial view.
    fn try_read_persisted(&self) -> StoreResult<Vec<String>> {
        let Some(json) = self.store.get(keys::FAVORITES)? else {
            return Ok(Vec::new());
        };
        let entries = serde_json::from_str::<Vec<String>>(&json).map_err(|source| {
            StoreError::Decode {
                key: keys::FAVORITES.to_string(),
                source,
            }
        })?;
        Ok(dedup_in_order(entries))
    }

    fn write(&self, entries: &[String]) -> StoreResult<()> {
        let json = serde_json::to_string(entries).map_err(|source| StoreError::Encode {
            key: keys::FAVORITES.to_string(),
            source,
        })?;
        self.store.set(keys::FAVORITES, &json)
    }
}

fn dedup_in_order(entries: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::store::MemoryStore;
    use crate::app::infrastructure::test_support::FlakyStore;

    const PSALM: &str = "Salmos 23:1 - O Senhor é o meu pastor; nada me faltará.";
    const JOHN: &str = "João 3:16 - Porque Deus amou o mundo de tal maneira";
    const RUTH: &str = "Rute 1:16 - o teu povo é o meu povo";

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let store = Rc::new(MemoryStore::new());
        let mut ledger = FavoritesLedger::new(store.clone());

        assert_eq!(ledger.add(PSALM).unwrap(), AddOutcome::Added);
        assert_eq!(ledger.add(PSALM).unwrap(), AddOutcome::AlreadyFavorite);
        assert_eq!(ledger.list(), &[PSALM.to_string()]);
    }

    #[test]
    fn test_duplicate_add_does_not_write() {
        let store = Rc::new(FlakyStore::new());
        let mut ledger = FavoritesLedger::new(store.clone());
        ledger.add(PSALM).unwrap();
        ledger.add(PSALM).unwrap();
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_insertion_order_is_preserved_across_sessions() {
        let store = Rc::new(MemoryStore::new());
        let mut ledger = FavoritesLedger::new(store.clone());
        ledger.add(JOHN).unwrap();
        ledger.add(PSALM).unwrap();

        let mut reopened = FavoritesLedger::new(store.clone());
        assert_eq!(reopened.list(), &[JOHN.to_string(), PSALM.to_string()]);
        assert_eq!(
            store.get(keys::FAVORITES).unwrap().unwrap(),
            serde_json::to_string(&[JOHN, PSALM]).unwrap()
        );
    }

    #[test]
    fn test_add_merges_with_entries_written_elsewhere() {
        let store = Rc::new(MemoryStore::new());
        let mut first = FavoritesLedger::new(store.clone());
        let mut second = FavoritesLedger::new(store.clone());

        first.add(JOHN).unwrap();
        second.add(PSALM).unwrap();

        assert_eq!(first.list().len(), 2);
    }

    #[test]
    fn test_unreadable_or_malformed_reads_as_empty() {
        let store = Rc::new(MemoryStore::new());
        store.set(keys::FAVORITES, r#"{"not": "a list"}"#).unwrap();
        let mut ledger = FavoritesLedger::new(store);
        assert!(ledger.list().is_empty());

        let flaky = Rc::new(FlakyStore::new());
        flaky.fail_reads(true);
        let mut ledger = FavoritesLedger::new(flaky);
        assert!(ledger.list().is_empty());
    }

    #[test]
    fn test_persisted_duplicates_are_collapsed() {
        let store = Rc::new(MemoryStore::new());
        store
            .set(keys::FAVORITES, &serde_json::to_string(&[PSALM, JOHN, PSALM]).unwrap())
            .unwrap();
        let mut ledger = FavoritesLedger::new(store);
        assert_eq!(ledger.list(), &[PSALM.to_string(), JOHN.to_string()]);
    }

    #[test]
    fn test_failed_write_leaves_collection_unchanged() {
        let store = Rc::new(FlakyStore::new());
        let mut ledger = FavoritesLedger::new(store.clone());
        ledger.add(JOHN).unwrap();

        store.fail_writes(true);
        assert!(ledger.add(PSALM).is_err());
        assert!(!ledger.contains(PSALM));
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn test_add_after_failed_read_keeps_stored_favorites() {
        let store = Rc::new(FlakyStore::new());
        let mut ledger = FavoritesLedger::new(store.clone());
        ledger.add(JOHN).unwrap();
        ledger.add(PSALM).unwrap();

        store.fail_reads(true);
        assert!(matches!(ledger.add(RUTH), Err(StoreError::Read { .. })));
        assert!(matches!(ledger.remove(JOHN), Err(StoreError::Read { .. })));
        assert_eq!(store.writes(), 2);

        store.fail_reads(false);
        assert_eq!(ledger.list(), &[JOHN.to_string(), PSALM.to_string()]);
    }

    #[test]
    fn test_add_to_malformed_record_leaves_it_alone() {
        let store = Rc::new(MemoryStore::new());
        let corrupt = r#"["João 3:16 - a", 7]"#;
        store.set(keys::FAVORITES, corrupt).unwrap();
        let mut ledger = FavoritesLedger::new(store.clone());

        assert!(matches!(ledger.add(RUTH), Err(StoreError::Decode { .. })));
        assert!(!ledger.contains(RUTH));
        assert_eq!(store.get(keys::FAVORITES).unwrap().as_deref(), Some(corrupt));
    }

    #[test]
    fn test_entry_from_verse_matches_stored_text_verbatim() {
        use crate::app::infrastructure::test_support::verses_for;

        let mut verse = verses_for("Salmos", 23, 1).remove(0);
        verse.text.push('\n');
        let store = Rc::new(MemoryStore::new());
        store
            .set(keys::FAVORITES, &serde_json::to_string(&[verse.favorite_entry()]).unwrap())
            .unwrap();

        let mut ledger = FavoritesLedger::new(store);
        assert_eq!(
            ledger.add(&verse.favorite_entry()).unwrap(),
            AddOutcome::AlreadyFavorite
        );
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = Rc::new(FlakyStore::new());
        let mut ledger = FavoritesLedger::new(store.clone());
        ledger.add(JOHN).unwrap();
        ledger.add(PSALM).unwrap();

        assert!(ledger.remove(JOHN).unwrap());
        assert!(!ledger.remove(JOHN).unwrap());
        assert_eq!(store.writes(), 3);
        assert_eq!(ledger.list(), &[PSALM.to_string()]);
    }
}

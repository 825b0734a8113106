// Saved Text Store
// Keeps original/humanized pairs with search, paging and summary stats

use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use super::humanizer::HumanizeLevel;
use super::storage::{default_data_dir, read_json, write_json, StoreError};
use crate::models::{SavedText, TextStoreStats};

const TEXTS_FILE: &str = "saved_texts.json";

pub trait TextStore {
    /// Store a pair and return its new id.
    fn save(
        &mut self,
        original: &str,
        humanized: &str,
        level: HumanizeLevel,
        metadata: HashMap<String, Value>,
    ) -> Result<String, StoreError>;

    fn get(&self, id: &str) -> Option<SavedText>;

    /// Newest first.
    fn list(&self, limit: usize, offset: usize) -> Vec<SavedText>;

    /// Case-insensitive substring match against either text.
    fn search(&self, query: &str) -> Vec<SavedText>;

    /// `Ok(false)` when no entry has `id`.
    fn delete(&mut self, id: &str) -> Result<bool, StoreError>;

    fn stats(&self) -> TextStoreStats;
}

/// Process-lifetime store. Entries are kept in insertion order.
#[derive(Default)]
pub struct InMemoryTextStore {
    entries: Vec<SavedText>,
}

impl InMemoryTextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries oldest first, as stored.
    pub fn from_entries(entries: Vec<SavedText>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SavedText] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

impl TextStore for InMemoryTextStore {
    fn save(
        &mut self,
        original: &str,
        humanized: &str,
        level: HumanizeLevel,
        mut metadata: HashMap<String, Value>,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        metadata.insert("word_count_original".to_string(), Value::from(word_count(original)));
        metadata.insert("word_count_humanized".to_string(), Value::from(word_count(humanized)));

        self.entries.push(SavedText {
            id: id.clone(),
            original_text: original.to_string(),
            humanized_text: humanized.to_string(),
            level,
            created_at: Utc::now().to_rfc3339(),
            metadata,
        });
        debug!(id = %id, level = level.get(), total = self.entries.len(), "text_store.saved");
        Ok(id)
    }

    fn get(&self, id: &str) -> Option<SavedText> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }

    fn list(&self, limit: usize, offset: usize) -> Vec<SavedText> {
        self.entries
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    fn search(&self, query: &str) -> Vec<SavedText> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.original_text.to_lowercase().contains(&query)
                    || e.humanized_text.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        match self.entries.iter().position(|e| e.id == id) {
            Some(idx) => {
                self.entries.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn stats(&self) -> TextStoreStats {
        if self.entries.is_empty() {
            return TextStoreStats::default();
        }

        let total_entries = self.entries.len();
        let level_sum: u32 = self.entries.iter().map(|e| u32::from(e.level.get())).sum();
        let avg_level = (level_sum as f64 / total_entries as f64 * 10.0).round() / 10.0;
        let total_words_processed = self
            .entries
            .iter()
            .filter_map(|e| e.metadata.get("word_count_original").and_then(Value::as_u64))
            .sum::<u64>() as usize;

        TextStoreStats {
            total_entries,
            avg_level,
            most_recent: self.entries.last().map(|e| e.created_at.clone()),
            total_words_processed,
        }
    }
}

/// Store backed by `saved_texts.json`; every change rewrites the file.
pub struct JsonTextStore {
    file: PathBuf,
    inner: InMemoryTextStore,
}

impl JsonTextStore {
    /// Load entries from `file`; a missing file starts empty.
    ///
    /// An unreadable file is an error rather than a fresh start so saved texts are never overwritten.
    pub fn open(file: PathBuf) -> Result<Self, StoreError> {
        let entries: Vec<SavedText> = read_json(&file)?.unwrap_or_default();
        debug!(file = %file.display(), entries = entries.len(), "text_store.opened");
        Ok(Self {
            file,
            inner: InMemoryTextStore::from_entries(entries),
        })
    }

    /// Store under the default data directory, if the platform has one.
    pub fn open_default() -> Option<Result<Self, StoreError>> {
        default_data_dir().map(|dir| Self::open(dir.join(TEXTS_FILE)))
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        write_json(&self.file, self.inner.entries())
    }
}

impl TextStore for JsonTextStore {
    fn save(
        &mut self,
        original: &str,
        humanized: &str,
        level: HumanizeLevel,
        metadata: HashMap<String, Value>,
    ) -> Result<String, StoreError> {
        let id = self.inner.save(original, humanized, level, metadata)?;
        if let Err(e) = self.persist() {
            // keep memory and disk in step
            self.inner.delete(&id)?;
            return Err(e);
        }
        Ok(id)
    }

    fn get(&self, id: &str) -> Option<SavedText> {
        self.inner.get(id)
    }

    fn list(&self, limit: usize, offset: usize) -> Vec<SavedText> {
        self.inner.list(limit, offset)
    }

    fn search(&self, query: &str) -> Vec<SavedText> {
        self.inner.search(query)
    }

    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.inner.delete(id)? {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn stats(&self) -> TextStoreStats {
        self.inner.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn scratch_file(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("humanizer-texts-{}-{}", tag, Uuid::new_v4()))
            .join(TEXTS_FILE)
    }

    fn level(n: i64) -> HumanizeLevel {
        HumanizeLevel::clamped(n)
    }

    #[test]
    fn test_save_and_get() {
        let mut store = InMemoryTextStore::new();
        let mut meta = HashMap::new();
        meta.insert("source".to_string(), json!("cli"));

        let id = store.save("one two three", "one, two three four", level(3), meta).unwrap();
        let saved = store.get(&id).unwrap();
        assert_eq!(saved.original_text, "one two three");
        assert_eq!(saved.metadata["source"], json!("cli"));
        assert_eq!(saved.metadata["word_count_original"], json!(3));
        assert_eq!(saved.metadata["word_count_humanized"], json!(4));
        assert!(chrono::DateTime::parse_from_rfc3339(&saved.created_at).is_ok());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_list_is_newest_first() {
        let mut store = InMemoryTextStore::new();
        let ids: Vec<String> = (0..5)
            .map(|i| store.save(&format!("text {i}"), "out", level(1), HashMap::new()).unwrap())
            .collect();

        let page = store.list(2, 1);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, ids[3]);
        assert_eq!(page[1].id, ids[2]);
        assert!(store.list(10, 5).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut store = InMemoryTextStore::new();
        store.save("The Quick Fox", "a fast fox", level(2), HashMap::new()).unwrap();
        store.save("Slow turtle", "a SLOW tortoise", level(2), HashMap::new()).unwrap();

        assert_eq!(store.search("quick").len(), 1);
        assert_eq!(store.search("TORTOISE").len(), 1);
        assert_eq!(store.search("fox").len(), 1);
        assert_eq!(store.search("a ").len(), 2);
        assert!(store.search("zebra").is_empty());
    }

    #[test]
    fn test_delete() {
        let mut store = InMemoryTextStore::new();
        let id = store.save("a", "b", level(1), HashMap::new()).unwrap();
        assert!(store.delete(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_stats() {
        let mut store = InMemoryTextStore::new();
        assert_eq!(store.stats(), TextStoreStats::default());

        store.save("one two", "x", level(1), HashMap::new()).unwrap();
        store.save("three four five", "y", level(2), HashMap::new()).unwrap();
        let last = store.save("six", "z", level(5), HashMap::new()).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_entries, 3);
        assert!((stats.avg_level - 2.7).abs() < 1e-9);
        assert_eq!(stats.total_words_processed, 6);
        assert_eq!(stats.most_recent, store.get(&last).map(|e| e.created_at));
    }

    #[test]
    fn test_json_store_survives_reopen() {
        let file = scratch_file("reopen");
        let mut store = JsonTextStore::open(file.clone()).unwrap();
        assert!(store.is_empty());
        let kept = store.save("Keep this text", "kept", level(4), HashMap::new()).unwrap();
        let dropped = store.save("Drop this one", "gone", level(2), HashMap::new()).unwrap();
        assert!(store.delete(&dropped).unwrap());
        assert!(!store.delete(&dropped).unwrap());

        let reopened = JsonTextStore::open(file.clone()).unwrap();
        assert_eq!(reopened.len(), 1);
        let saved = reopened.get(&kept).unwrap();
        assert_eq!(saved.original_text, "Keep this text");
        assert_eq!(saved.level.get(), 4);
        assert_eq!(reopened.search("KEEP").len(), 1);
        assert_eq!(reopened.stats().total_words_processed, 3);
        let _ = fs::remove_dir_all(file.parent().unwrap());
    }

    #[test]
    fn test_json_store_keeps_insertion_order_on_reload() {
        let file = scratch_file("order");
        let mut store = JsonTextStore::open(file.clone()).unwrap();
        let first = store.save("first", "a", level(1), HashMap::new()).unwrap();
        let second = store.save("second", "b", level(1), HashMap::new()).unwrap();

        let reopened = JsonTextStore::open(file.clone()).unwrap();
        let listed: Vec<String> = reopened.list(10, 0).into_iter().map(|e| e.id).collect();
        assert_eq!(listed, vec![second, first]);
        let _ = fs::remove_dir_all(file.parent().unwrap());
    }

    #[test]
    fn test_json_store_refuses_corrupt_file() {
        let file = scratch_file("corrupt");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "not json").unwrap();
        assert!(matches!(JsonTextStore::open(file.clone()), Err(StoreError::Parse(_))));
        assert_eq!(fs::read_to_string(&file).unwrap(), "not json");
        let _ = fs::remove_dir_all(file.parent().unwrap());
    }
}

use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    state::HISTORY_LIMIT,
    HistoryEntry,
    LexiError,
    VocabularyEntry,
};

const APP_NAME: &str = "lexiread";

pub const VOCAB_LIST_FILE: &str = "vocab_list.json";
pub const HISTORY_FILE: &str = "history.json";
pub const SETTINGS_FILE: &str = "settings.json";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

/// JSON documents stored side by side in one directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(get_app_data_dir())
    }
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn save_json<T: Serialize>(&self, data: &T, filename: &str) -> Result<(), LexiError> {
        fs::create_dir_all(&self.root)?;
        let file_path = self.data_file_path(filename);
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&file_path, json)?;
        log::debug!("Data saved to: {}", file_path.display());
        Ok(())
    }

    pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
        &self,
        filename: &str,
    ) -> Result<T, LexiError> {
        let file_path = self.data_file_path(filename);

        if !file_path.exists() {
            return Ok(T::default());
        }

        let json = fs::read_to_string(&file_path)?;
        let data: T = serde_json::from_str(&json)?;
        log::debug!("Data loaded from: {}", file_path.display());
        Ok(data)
    }

    pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(&self, filename: &str) -> T {
        match self.load_json::<T>(filename) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to load {}: {}. Using defaults.", filename, e);
                T::default()
            }
        }
    }

    pub fn data_file_exists(&self, filename: &str) -> bool {
        self.data_file_path(filename).exists()
    }

    pub fn get_vocabulary_list(&self) -> Vec<VocabularyEntry> {
        let mut words: Vec<VocabularyEntry> = self.load_json_or_default(VOCAB_LIST_FILE);
        for word in &mut words {
            word.save_count = word.save_count.max(1);
        }
        words
    }

    /// Write failures are logged; the in-memory list stays authoritative.
    pub fn save_vocabulary_list(&self, words: &[VocabularyEntry]) {
        if let Err(e) = self.save_json(&words, VOCAB_LIST_FILE) {
            log::error!("Failed to save vocabulary list: {}", e);
        }
    }

    /// Prepends `entry` unless the word is already present.
    pub fn add_word_to_vocabulary(&self, entry: VocabularyEntry) -> bool {
        let mut words = self.get_vocabulary_list();
        if words.iter().any(|w| w.matches(&entry.word)) {
            return false;
        }
        words.insert(0, entry);
        self.save_vocabulary_list(&words);
        true
    }

    pub fn remove_word_from_vocabulary(&self, word: &str) {
        let mut words = self.get_vocabulary_list();
        words.retain(|w| !w.matches(word));
        self.save_vocabulary_list(&words);
    }

    pub fn get_history(&self) -> Vec<HistoryEntry> {
        self.load_json_or_default(HISTORY_FILE)
    }

    /// Persists at most `HISTORY_LIMIT` entries, newest first.
    pub fn save_history(&self, history: &[HistoryEntry]) {
        let capped = &history[..history.len().min(HISTORY_LIMIT)];
        if let Err(e) = self.save_json(&capped, HISTORY_FILE) {
            log::error!("Failed to save history: {}", e);
        }
    }

    pub fn add_history_entry(&self, entry: HistoryEntry) {
        let mut history = self.get_history();
        history.insert(0, entry);
        history.truncate(HISTORY_LIMIT);
        self.save_history(&history);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;

    // The guard must outlive the storage; dropping it removes the directory.
    fn temp_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("data"));
        (dir, storage)
    }

    fn history_entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("id-{n}"), format!("text {n}"), Utc::now())
    }

    #[test]
    fn test_missing_files_load_empty() {
        let (_dir, storage) = temp_storage();
        assert!(storage.get_vocabulary_list().is_empty());
        assert!(storage.get_history().is_empty());
        assert!(!storage.data_file_exists(VOCAB_LIST_FILE));
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let (_dir, storage) = temp_storage();
        fs::create_dir_all(storage.root()).unwrap();
        fs::write(storage.data_file_path(HISTORY_FILE), "{ not json").unwrap();
        fs::write(storage.data_file_path(VOCAB_LIST_FILE), "[{\"word\": 3}]").unwrap();

        assert!(storage.get_history().is_empty());
        assert!(storage.get_vocabulary_list().is_empty());
    }

    #[test]
    fn test_vocabulary_helpers() {
        let (_dir, storage) = temp_storage();
        assert!(storage.add_word_to_vocabulary(VocabularyEntry::new("Sun", "star", "The sun.")));
        assert!(!storage.add_word_to_vocabulary(VocabularyEntry::new("sun", "dup", "dup")));
        assert!(storage.add_word_to_vocabulary(VocabularyEntry::new("sky", "above", "Blue sky.")));

        let words = storage.get_vocabulary_list();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "sky");
        assert_eq!(words[1].definition, "star");

        storage.remove_word_from_vocabulary("SUN");
        let words = storage.get_vocabulary_list();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "sky");
    }

    #[test]
    fn test_legacy_entries_get_save_count() {
        let (_dir, storage) = temp_storage();
        fs::create_dir_all(storage.root()).unwrap();
        fs::write(
            storage.data_file_path(VOCAB_LIST_FILE),
            r#"[{"word":"sun","definition":"star","usage":"The sun.","saveCount":0},
                {"word":"sky","definition":"above","usage":"Blue sky."}]"#,
        )
        .unwrap();

        let words = storage.get_vocabulary_list();
        assert!(words.iter().all(|w| w.save_count == 1));
    }

    #[test]
    fn test_history_is_capped_on_save() {
        let (_dir, storage) = temp_storage();
        let history: Vec<HistoryEntry> = (0..HISTORY_LIMIT + 3).map(history_entry).collect();
        storage.save_history(&history);

        let loaded = storage.get_history();
        assert_eq!(loaded.len(), HISTORY_LIMIT);
        assert_eq!(loaded[0].id, "id-0");

        storage.add_history_entry(history_entry(999));
        let loaded = storage.get_history();
        assert_eq!(loaded.len(), HISTORY_LIMIT);
        assert_eq!(loaded[0].id, "id-999");
        assert_eq!(loaded.last().unwrap().id, format!("id-{}", HISTORY_LIMIT - 2));
    }
}

use std::collections::BTreeMap;

use chrono::{
    DateTime,
    Duration,
    SecondsFormat,
    Utc,
};

use super::models::{
    HistoryEntry,
    VocabularyEntry,
    View,
};

/// Oldest sessions beyond this are evicted.
pub const HISTORY_LIMIT: usize = 50;

/// Which persisted collections an update touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub vocabulary: bool,
    pub history: bool,
}

impl Dirty {
    pub const NONE: Dirty = Dirty { vocabulary: false, history: false };

    pub fn vocabulary() -> Self {
        Self { vocabulary: true, history: false }
    }

    pub fn history() -> Self {
        Self { vocabulary: false, history: true }
    }

    pub fn merge(self, other: Dirty) -> Dirty {
        Dirty {
            vocabulary: self.vocabulary || other.vocabulary,
            history: self.history || other.history,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StartSession { text: String, at: DateTime<Utc> },
    SaveWord(VocabularyEntry),
    DeleteWord(String),
    SetTitle(String),
    SetHighlight { phrase: String, color: String },
    RemoveHighlight(String),
    SetHighlights(BTreeMap<String, String>),
    SelectHistory(String),
    DeleteHistory(String),
    Navigate(View),
}

#[derive(Debug, Default)]
pub struct AppState {
    pub view: View,
    pub current_article: Option<HistoryEntry>,
    pub all_words: Vec<VocabularyEntry>,
    pub history: Vec<HistoryEntry>,
}

impl AppState {
    pub fn new(mut all_words: Vec<VocabularyEntry>, mut history: Vec<HistoryEntry>) -> Self {
        for word in &mut all_words {
            word.save_count = word.save_count.max(1);
        }
        history.truncate(HISTORY_LIMIT);

        Self { view: View::Home, current_article: None, all_words, history }
    }

    pub fn apply(&mut self, action: Action) -> Dirty {
        match action {
            Action::StartSession { text, at } => {
                self.start_session(text, at);
                Dirty::history()
            }
            Action::SaveWord(entry) => self.save_word(entry),
            Action::DeleteWord(word) => self.delete_word(&word),
            Action::SetTitle(title) => self.set_title(title),
            Action::SetHighlight { phrase, color } => self.set_highlight(&phrase, &color),
            Action::RemoveHighlight(phrase) => self.remove_highlight(&phrase),
            Action::SetHighlights(highlights) => self.set_highlights(highlights),
            Action::SelectHistory(id) => {
                self.select_history(&id);
                Dirty::NONE
            }
            Action::DeleteHistory(id) => self.delete_history(&id),
            Action::Navigate(view) => {
                self.navigate(view);
                Dirty::NONE
            }
        }
    }

    /// Opens a fresh session for `text`, prepends it to history and switches to reading.
    pub fn start_session(&mut self, text: String, at: DateTime<Utc>) -> &HistoryEntry {
        let id = self.fresh_id(at);
        let article = HistoryEntry::new(id, text, at);

        self.history.insert(0, article.clone());
        self.history.truncate(HISTORY_LIMIT);
        self.current_article = Some(article);
        self.view = View::Reading;

        log::info!("Started reading session {}", self.history[0].id);
        &self.history[0]
    }

    // Ids are millisecond timestamps; bump forward on collision so they stay unique.
    fn fresh_id(&self, at: DateTime<Utc>) -> String {
        let mut stamp = at;
        loop {
            let id = stamp.to_rfc3339_opts(SecondsFormat::Millis, true);
            if !self.history.iter().any(|entry| entry.id == id) {
                return id;
            }
            stamp += Duration::milliseconds(1);
        }
    }

    pub fn save_word(&mut self, entry: VocabularyEntry) -> Dirty {
        let mut dirty = Dirty::vocabulary();

        if let Some(existing) = self.all_words.iter_mut().find(|w| w.matches(&entry.word)) {
            existing.save_count = existing.save_count.max(1) + 1;
        } else {
            self.all_words.insert(0, VocabularyEntry { save_count: 1, ..entry.clone() });
        }

        let needs_article_copy =
            self.current_article.as_ref().is_some_and(|article| article.find_word(&entry.word).is_none());
        if needs_article_copy {
            dirty = dirty.merge(self.update_article(|article| article.vocabulary.insert(0, entry)));
        }

        dirty
    }

    pub fn delete_word(&mut self, word: &str) -> Dirty {
        self.all_words.retain(|w| !w.matches(word));

        let mut dirty = Dirty::vocabulary();
        if self.current_article.is_some() {
            dirty = dirty.merge(self.update_article(|article| {
                article.vocabulary.retain(|w| !w.matches(word));
            }));
        }
        dirty
    }

    pub fn set_title(&mut self, title: String) -> Dirty {
        self.update_article(|article| article.title = title)
    }

    pub fn set_highlight(&mut self, phrase: &str, color: &str) -> Dirty {
        let key = phrase.to_lowercase();
        if key.trim().is_empty() {
            return Dirty::NONE;
        }
        let color = color.to_string();
        self.update_article(|article| {
            article.highlights.insert(key, color);
        })
    }

    pub fn remove_highlight(&mut self, phrase: &str) -> Dirty {
        let key = phrase.to_lowercase();
        self.update_article(|article| {
            article.highlights.remove(&key);
        })
    }

    pub fn set_highlights(&mut self, highlights: BTreeMap<String, String>) -> Dirty {
        let normalized: BTreeMap<String, String> =
            highlights.into_iter().map(|(phrase, color)| (phrase.to_lowercase(), color)).collect();
        self.update_article(|article| article.highlights = normalized)
    }

    pub fn select_history(&mut self, id: &str) -> bool {
        match self.history.iter().find(|entry| entry.id == id) {
            Some(entry) => {
                self.current_article = Some(entry.clone());
                self.view = View::Reading;
                true
            }
            None => {
                log::warn!("History entry {} not found", id);
                false
            }
        }
    }

    pub fn delete_history(&mut self, id: &str) -> Dirty {
        let before = self.history.len();
        self.history.retain(|entry| entry.id != id);
        if self.history.len() == before {
            return Dirty::NONE;
        }
        Dirty::history()
    }

    /// Home clears the open article; every other view leaves it in place.
    pub fn navigate(&mut self, view: View) {
        if view == View::Home {
            self.current_article = None;
        }
        self.view = view;
    }

    pub fn article_highlight(&self, phrase: &str) -> Option<&str> {
        self.current_article.as_ref().and_then(|article| article.highlight_color(phrase))
    }

    /// Applies `update` to the open article and echoes the result into its history entry.
    fn update_article<F>(&mut self, update: F) -> Dirty
    where
        F: FnOnce(&mut HistoryEntry),
    {
        let Some(article) = self.current_article.as_mut() else {
            return Dirty::NONE;
        };
        update(article);

        match self.history.iter_mut().find(|entry| entry.id == article.id) {
            Some(entry) => {
                *entry = article.clone();
                Dirty::history()
            }
            None => Dirty::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_714_557_600_000 + millis).unwrap()
    }

    fn entry(word: &str) -> VocabularyEntry {
        VocabularyEntry::new(word, format!("definition of {word}"), format!("{word} in a sentence"))
    }

    fn with_session() -> AppState {
        let mut state = AppState::default();
        state.start_session("The sun rises over the sky".to_string(), at(0));
        state
    }

    #[test]
    fn test_save_word_twice_counts_case_insensitively() {
        let mut state = with_session();

        state.save_word(entry("Sky"));
        let dirty = state.save_word(entry("sKY"));

        assert_eq!(state.all_words.len(), 1);
        assert_eq!(state.all_words[0].save_count, 2);
        assert_eq!(state.all_words[0].word, "Sky");

        let article = state.current_article.as_ref().unwrap();
        assert_eq!(article.vocabulary.len(), 1);
        assert!(dirty.vocabulary);
        assert!(!dirty.history, "word already in article, history untouched");
        assert_eq!(state.history[0].vocabulary.len(), 1);
    }

    #[test]
    fn test_save_word_prepends_new_entries() {
        let mut state = with_session();
        state.save_word(entry("sun"));
        state.save_word(entry("rises"));

        let words: Vec<&str> = state.all_words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["rises", "sun"]);

        let article_words: Vec<&str> = state.current_article.as_ref().unwrap()
            .vocabulary
            .iter()
            .map(|w| w.word.as_str())
            .collect();
        assert_eq!(article_words, vec!["rises", "sun"]);
    }

    #[test]
    fn test_save_word_without_article_only_touches_global_list() {
        let mut state = AppState::default();
        let dirty = state.save_word(entry("alone"));
        assert_eq!(dirty, Dirty::vocabulary());
        assert_eq!(state.all_words.len(), 1);
    }

    #[test]
    fn test_delete_word_removes_from_both_lists() {
        let mut state = with_session();
        state.save_word(entry("Sun"));
        state.save_word(entry("sky"));

        let dirty = state.delete_word("SUN");
        assert!(dirty.vocabulary && dirty.history);
        assert!(state.all_words.iter().all(|w| !w.matches("sun")));
        assert!(state.current_article.as_ref().unwrap().find_word("sun").is_none());
        assert!(state.history[0].find_word("sun").is_none());
        assert!(state.history[0].find_word("sky").is_some());

        // Absent everywhere: still fine
        state.delete_word("nonexistent");
        assert_eq!(state.all_words.len(), 1);

        // Absent from the article only
        state.navigate(View::Home);
        state.save_word(entry("orphan"));
        state.delete_word("orphan");
        assert!(state.all_words.iter().all(|w| !w.matches("orphan")));
    }

    #[test]
    fn test_highlight_keys_are_lowercase() {
        let mut state = with_session();
        state.set_highlight("Sky", "#fed7aa");

        assert_eq!(state.article_highlight("sky"), Some("#fed7aa"));
        assert_eq!(state.article_highlight("SKY"), Some("#fed7aa"));
        assert!(state.current_article.as_ref().unwrap().highlights.contains_key("sky"));
        assert_eq!(state.history[0].highlight_color("Sky"), Some("#fed7aa"));

        state.remove_highlight("SKY");
        assert_eq!(state.article_highlight("sky"), None);
        assert!(state.history[0].highlights.is_empty());

        let mut bulk = BTreeMap::new();
        bulk.insert("The Sun".to_string(), "#fef08a".to_string());
        state.set_highlights(bulk);
        assert!(state.current_article.as_ref().unwrap().highlights.contains_key("the sun"));
    }

    #[test]
    fn test_start_session_prepends_fresh_entry() {
        let mut state = AppState::default();
        state.start_session("first".to_string(), at(0));
        state.save_word(entry("first"));
        state.set_highlight("first", "#fef08a");
        state.start_session("second".to_string(), at(0));

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].source_text, "second");
        assert_ne!(state.history[0].id, state.history[1].id);
        assert!(state.history[0].vocabulary.is_empty());
        assert!(state.history[0].highlights.is_empty());
        assert_eq!(state.view, View::Reading);
        assert_eq!(state.current_article.as_ref().unwrap().id, state.history[0].id);
    }

    #[test]
    fn test_history_is_capped() {
        let mut state = AppState::default();
        for i in 0..(HISTORY_LIMIT as i64 + 5) {
            state.start_session(format!("text {i}"), at(i * 1000));
        }
        assert_eq!(state.history.len(), HISTORY_LIMIT);
        assert_eq!(state.history[0].source_text, format!("text {}", HISTORY_LIMIT + 4));
        assert_eq!(state.history.last().unwrap().source_text, "text 5");
    }

    #[test]
    fn test_title_change_is_echoed_into_history() {
        let mut state = with_session();
        let dirty = state.apply(Action::SetTitle("Morning".to_string()));
        assert_eq!(dirty, Dirty::history());
        assert_eq!(state.history[0].title, "Morning");

        state.navigate(View::Home);
        assert!(state.current_article.is_none());
        assert_eq!(state.set_title("ignored".to_string()), Dirty::NONE);
    }

    #[test]
    fn test_navigation_keeps_article_except_home() {
        let mut state = with_session();
        state.navigate(View::AllWords);
        assert!(state.current_article.is_some());
        state.navigate(View::Home);
        assert!(state.current_article.is_none());
        assert_eq!(state.view, View::Home);
    }

    #[test]
    fn test_select_and_delete_history() {
        let mut state = with_session();
        let id = state.history[0].id.clone();
        state.navigate(View::Home);

        assert!(state.apply(Action::SelectHistory(id.clone())) == Dirty::NONE);
        assert_eq!(state.view, View::Reading);
        assert_eq!(state.current_article.as_ref().unwrap().id, id);

        assert!(!state.select_history("missing"));
        assert_eq!(state.delete_history("missing"), Dirty::NONE);
        assert_eq!(state.delete_history(&id), Dirty::history());
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_loaded_words_have_positive_save_count() {
        let mut word = entry("zero");
        word.save_count = 0;
        let state = AppState::new(vec![word], Vec::new());
        assert_eq!(state.all_words[0].save_count, 1);
    }
}

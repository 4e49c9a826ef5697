use std::collections::BTreeMap;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

pub const DEFAULT_TITLE: &str = "Text";

fn default_save_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub definition: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default = "default_save_count")]
    pub save_count: u32,
}

impl VocabularyEntry {
    pub fn new(word: impl Into<String>, definition: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pronunciation: None,
            definition: definition.into(),
            usage: usage.into(),
            save_count: 1,
        }
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    /// Case-insensitive word comparison; vocabulary membership is keyed on this.
    pub fn matches(&self, word: &str) -> bool {
        self.word.to_lowercase() == word.to_lowercase()
    }

    pub fn format_save_count(&self) -> String {
        if self.save_count == 1 {
            "Saved 1 time".to_string()
        } else {
            format!("Saved {} times", self.save_count)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    pub source_text: String,
    #[serde(default)]
    pub highlights: BTreeMap<String, String>,
    #[serde(default)]
    pub vocabulary: Vec<VocabularyEntry>,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(id: String, source_text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            source_text,
            highlights: BTreeMap::new(),
            vocabulary: Vec::new(),
            created_at,
        }
    }

    pub fn find_word(&self, word: &str) -> Option<&VocabularyEntry> {
        self.vocabulary.iter().find(|entry| entry.matches(word))
    }

    pub fn highlight_color(&self, phrase: &str) -> Option<&str> {
        self.highlights.get(&phrase.to_lowercase()).map(String::as_str)
    }

    pub fn format_created_at(&self) -> String {
        let local_time = self.created_at.with_timezone(&chrono::Local);
        local_time.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Reading,
    History,
    AllWords,
    Tutorial,
}

impl View {
    /// Views reachable from the sidebar. Reading is only entered through a session.
    pub const NAVIGABLE: [View; 4] = [View::Home, View::History, View::AllWords, View::Tutorial];

    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Reading => "Reading",
            View::History => "History",
            View::AllWords => "All Words",
            View::Tutorial => "Tutorial",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            View::Home => "🏠",
            View::Reading => "📖",
            View::History => "🕘",
            View::AllWords => "🔖",
            View::Tutorial => "🎓",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_save_count_loads_as_one() {
        let json = r#"{"word":"Ephemeral","definition":"Short-lived","usage":"An ephemeral joy."}"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.save_count, 1);
        assert!(entry.pronunciation.is_none());
        assert!(entry.matches("EPHEMERAL"));
    }

    #[test]
    fn test_history_entry_uses_camel_case_fields() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.000Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut entry = HistoryEntry::new(
            "2024-05-01T10:00:00.000Z".to_string(),
            "The sun rises".to_string(),
            created_at,
        );
        entry.highlights.insert("sun".to_string(), "#fef08a".to_string());

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["sourceText"], "The sun rises");
        assert_eq!(value["title"], DEFAULT_TITLE);
        assert_eq!(value["highlights"]["sun"], "#fef08a");
        assert!(value.get("createdAt").is_some());
        assert_eq!(entry.highlight_color("SUN"), Some("#fef08a"));
    }
}

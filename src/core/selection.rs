use super::{
    errors::{
        LexiError,
        QUOTA_MESSAGE,
    },
    models::VocabularyEntry,
};

pub const MAX_SELECTION_CHARS: usize = 100;

/// Reduces a raw selection to letters, whitespace and hyphens.
///
/// Returns `None` unless the result is non-empty, shorter than
/// `MAX_SELECTION_CHARS` and on a single line.
pub fn sanitize_selection(raw: &str) -> Option<String> {
    let filtered: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace() || *c == '-')
        .collect();
    let word = filtered.trim();

    let len = word.chars().count();
    if len == 0 || len >= MAX_SELECTION_CHARS || word.contains('\n') {
        return None;
    }
    Some(word.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupContent {
    Pending,
    Entry(VocabularyEntry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub word: String,
    pub content: PopupContent,
    pub anchor: Anchor,
    pub generation: u64,
    pub show_color_picker: bool,
}

impl PopupState {
    pub fn is_loading(&self) -> bool {
        matches!(self.content, PopupContent::Pending)
    }

    pub fn entry(&self) -> Option<&VocabularyEntry> {
        match &self.content {
            PopupContent::Entry(entry) => Some(entry),
            PopupContent::Pending => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    Quota(String),
    Other { word: String },
}

impl LookupFailure {
    /// Expects errors already classified by the Gemini client; falls back to
    /// the generic quota message for unclassified exhaustion errors.
    pub fn from_error(word: &str, error: &LexiError) -> Self {
        match error {
            LexiError::Quota(message) => LookupFailure::Quota(message.clone()),
            other if other.is_quota() => LookupFailure::Quota(QUOTA_MESSAGE.to_string()),
            _ => LookupFailure::Other { word: word.to_string() },
        }
    }

    pub fn message(&self) -> String {
        match self {
            LookupFailure::Quota(message) => message.clone(),
            LookupFailure::Other { word } => LexiError::DefinitionFailed(word.clone()).to_string(),
        }
    }

    pub fn notice(&self) -> ErrorNotice {
        match self {
            LookupFailure::Quota(_) => ErrorNotice::persistent(self.message()),
            LookupFailure::Other { .. } => ErrorNotice::transient(self.message()),
        }
    }
}

/// A page-level error message. Persistent notices survive new lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub message: String,
    pub persistent: bool,
}

impl ErrorNotice {
    pub fn persistent(message: impl Into<String>) -> Self {
        Self { message: message.into(), persistent: true }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self { message: message.into(), persistent: false }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Selection did not qualify; popup untouched.
    Ignored,
    /// Empty selection; popup closed.
    Closed,
    /// Filled from the article's vocabulary.
    Cached,
    /// A definition request must be dispatched for this generation.
    Fetch { word: String, generation: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Response belonged to a closed or replaced popup.
    Stale,
    Filled,
    Failed(ErrorNotice),
}

/// Owns the popup and the generation counter tying responses to it.
#[derive(Debug, Default)]
pub struct SelectionController {
    popup: Option<PopupState>,
    generation: u64,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn popup(&self) -> Option<&PopupState> {
        self.popup.as_ref()
    }

    pub fn popup_mut(&mut self) -> Option<&mut PopupState> {
        self.popup.as_mut()
    }

    pub fn on_selection(
        &mut self,
        raw: &str,
        anchor: Anchor,
        article_vocabulary: &[VocabularyEntry],
    ) -> SelectionOutcome {
        if raw.trim().is_empty() {
            self.close();
            return SelectionOutcome::Closed;
        }

        let Some(word) = sanitize_selection(raw) else {
            return SelectionOutcome::Ignored;
        };

        self.generation += 1;
        let generation = self.generation;

        if let Some(entry) = article_vocabulary.iter().find(|entry| entry.matches(&word)) {
            self.popup = Some(PopupState {
                word,
                content: PopupContent::Entry(entry.clone()),
                anchor,
                generation,
                show_color_picker: false,
            });
            return SelectionOutcome::Cached;
        }

        self.popup = Some(PopupState {
            word: word.clone(),
            content: PopupContent::Pending,
            anchor,
            generation,
            show_color_picker: false,
        });
        log::debug!("Looking up \"{}\" (generation {})", word, generation);
        SelectionOutcome::Fetch { word, generation }
    }

    pub fn resolve(
        &mut self,
        generation: u64,
        result: Result<VocabularyEntry, LookupFailure>,
    ) -> Resolution {
        let is_current = self.popup.as_ref().is_some_and(|popup| popup.generation == generation);
        if !is_current {
            log::debug!("Discarding stale definition response (generation {})", generation);
            return Resolution::Stale;
        }

        match result {
            Ok(entry) => {
                if let Some(popup) = self.popup.as_mut() {
                    popup.content = PopupContent::Entry(entry);
                }
                Resolution::Filled
            }
            Err(failure) => {
                self.popup = None;
                Resolution::Failed(failure.notice())
            }
        }
    }

    /// Closing invalidates any in-flight request for the popup.
    pub fn close(&mut self) {
        if self.popup.take().is_some() {
            self.generation += 1;
        }
    }
}

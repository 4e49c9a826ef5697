use crate::{
    core::{
        selection::{
            Anchor,
            ErrorNotice,
            LookupFailure,
            Resolution,
            SelectionController,
            SelectionOutcome,
        },
        LexiError,
        VocabularyEntry,
    },
    gui::error_banner::ErrorBanner,
};

/// Popup and error banner for the page on screen.
pub struct PageState {
    selection: SelectionController,
    banner: ErrorBanner,
}

impl PageState {
    pub fn new() -> Self {
        Self { selection: SelectionController::new(), banner: ErrorBanner::default() }
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionController {
        &mut self.selection
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn dismiss_error(&mut self) {
        self.banner.clear();
    }

    pub fn close_popup(&mut self) {
        self.selection.close();
    }

    /// Navigation, opening a history entry or starting a session.
    pub fn leave(&mut self) {
        self.banner.clear();
        self.selection.close();
    }

    /// Returns the word and generation to fetch, if the selection needs a request.
    pub fn lookup(
        &mut self,
        text: &str,
        anchor: Anchor,
        article_vocabulary: &[VocabularyEntry],
        has_client: bool,
    ) -> Option<(String, u64)> {
        match self.selection.on_selection(text, anchor, article_vocabulary) {
            SelectionOutcome::Fetch { word, generation } => {
                self.banner.clear_transient();
                if has_client {
                    Some((word, generation))
                } else {
                    self.report_missing_key();
                    self.selection.close();
                    None
                }
            }
            SelectionOutcome::Cached | SelectionOutcome::Closed | SelectionOutcome::Ignored => None,
        }
    }

    pub fn report_missing_key(&mut self) {
        self.banner.set(ErrorNotice::persistent(format!(
            "{}. Add one in Settings.",
            LexiError::MissingApiKey
        )));
    }

    pub fn extraction_failed(&mut self, message: String) {
        self.banner.set(ErrorNotice::transient(message));
    }

    pub fn definition_fetched(
        &mut self,
        generation: u64,
        word: &str,
        result: Result<VocabularyEntry, LookupFailure>,
    ) {
        match self.selection.resolve(generation, result) {
            Resolution::Filled => log::debug!("Definition ready for \"{}\"", word),
            Resolution::Failed(notice) => self.banner.set(notice),
            Resolution::Stale => {}
        }
    }

    /// Escape belongs to the title editor while it has focus.
    pub fn escape_closes_popup(&self, editing_title: bool) -> bool {
        self.selection.popup().is_some() && !editing_title
    }
}

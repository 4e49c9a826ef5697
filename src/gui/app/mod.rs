mod page;

use std::{
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use chrono::Utc;
use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    message_overlay::MessageOverlay,
    popup,
    settings::{
        SettingsData,
        SettingsModal,
    },
    sidebar::Sidebar,
    theme::{
        set_theme,
        Theme,
    },
    views::{
        history,
        tutorial,
        AllWordsView,
        HomeView,
        ReadingView,
    },
};
use crate::{
    core::{
        selection::Anchor,
        tasks::{
            TaskManager,
            TaskResult,
        },
        Action,
        AppState,
        Dirty,
        LexiError,
        View,
    },
    gemini::GeminiClient,
    persistence::{
        Storage,
        SETTINGS_FILE,
    },
};
use page::PageState;

pub struct LexiApp {
    // Data
    pub state: AppState,
    storage: Storage,

    // Configuration
    pub settings_data: SettingsData,

    // UI State
    pub theme: Theme,
    pub message_overlay: MessageOverlay,
    page: PageState,
    extracting: bool,

    // Views
    home: HomeView,
    reading: ReadingView,
    all_words: AllWordsView,
    settings_modal: SettingsModal,

    // External Services
    gemini: Option<Arc<GeminiClient>>,
    task_manager: TaskManager,
}

impl LexiApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, LexiError> {
        Self::with_storage(cc, Storage::default())
    }

    pub fn with_storage(
        cc: &eframe::CreationContext<'_>,
        storage: Storage,
    ) -> Result<Self, LexiError> {
        let task_manager = TaskManager::new()?;

        log::info!("Loading data from {}", storage.root().display());
        let state = AppState::new(storage.get_vocabulary_list(), storage.get_history());
        let settings_data = storage.load_json_or_default::<SettingsData>(SETTINGS_FILE);

        let mut app = Self {
            state,
            storage,
            settings_data,
            theme: Theme::slate(),
            message_overlay: MessageOverlay::new(),
            page: PageState::new(),
            extracting: false,
            home: HomeView::default(),
            reading: ReadingView::default(),
            all_words: AllWordsView::default(),
            settings_modal: SettingsModal::new(),
            gemini: None,
            task_manager,
        };

        app.rebuild_client();
        set_theme(&cc.egui_ctx, &app.theme);
        apply_dark_mode(&cc.egui_ctx, app.settings_data.dark_mode);

        Ok(app)
    }

    fn rebuild_client(&mut self) {
        self.gemini = match self.settings_data.gemini_config().map(GeminiClient::new) {
            Some(Ok(client)) => {
                log::info!("Gemini client ready (model {})", client.model());
                Some(Arc::new(client))
            }
            Some(Err(e)) => {
                log::error!("Failed to create Gemini client: {}", e);
                None
            }
            None => {
                log::warn!("No Gemini API key configured");
                None
            }
        };
    }

    fn client(&mut self) -> Option<Arc<GeminiClient>> {
        if self.gemini.is_none() {
            self.page.report_missing_key();
        }
        self.gemini.clone()
    }

    fn save_settings(&self) {
        if let Err(e) = self.storage.save_json(&self.settings_data, SETTINGS_FILE) {
            log::error!("Failed to save settings: {}", e);
        }
    }

    fn persist(&self, dirty: Dirty) {
        if dirty.vocabulary {
            self.storage.save_vocabulary_list(&self.state.all_words);
        }
        if dirty.history {
            self.storage.save_history(&self.state.history);
        }
    }
}

pub fn apply_dark_mode(ctx: &egui::Context, dark_mode: bool) {
    ctx.set_theme(if dark_mode { egui::Theme::Dark } else { egui::Theme::Light });
}

impl eframe::App for LexiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let task_results = self.task_manager.poll_results();

        for result in task_results {
            self.handle_task_result(result);
        }

        let mut actions = ActionQueue::new();

        Sidebar::show(ctx, self.state.view, &self.theme, &mut actions);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.page.banner().show(ui, &self.theme, &mut actions);

            match self.state.view {
                View::Home => self.home.show(ui, self.extracting, &self.theme, &mut actions),
                View::Reading => self.reading.show(
                    ui,
                    self.state.current_article.as_ref(),
                    &self.theme,
                    &mut actions,
                ),
                View::History => history::show(ui, &self.state.history, &self.theme, &mut actions),
                View::AllWords => {
                    self.all_words.show(ui, &self.state.all_words, &self.theme, &mut actions)
                }
                View::Tutorial => tutorial::show(ui, &self.theme),
            }
        });

        self.show_popup(ctx, &mut actions);
        self.message_overlay.show(ctx, &self.theme);

        if self.settings_modal.is_settings_open() {
            if let Some(settings) = self.settings_modal.show(ctx) {
                self.settings_data = settings;
                apply_dark_mode(ctx, self.settings_data.dark_mode);
                self.rebuild_client();
                self.save_settings();
            }
        }

        let had_actions = !actions.is_empty();
        self.execute_actions(&mut actions);

        if had_actions {
            ctx.request_repaint();
        } else if self.task_manager.has_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl LexiApp {
    fn show_popup(&self, ctx: &egui::Context, actions: &mut ActionQueue) {
        if self.state.view != View::Reading {
            return;
        }
        let Some(popup_state) = self.page.selection().popup() else {
            return;
        };

        if self.page.escape_closes_popup(self.reading.is_editing_title())
            && ctx.input(|i| i.key_pressed(egui::Key::Escape))
        {
            actions.push(UiAction::ClosePopup);
        }

        let highlight = popup_state
            .entry()
            .and_then(|entry| self.state.article_highlight(&entry.word))
            .or_else(|| self.state.article_highlight(&popup_state.word));
        let container = self.reading.container().unwrap_or(ctx.screen_rect());

        popup::show(ctx, popup_state, highlight, container, &self.theme, actions);
    }

    fn execute_actions(&mut self, actions: &mut ActionQueue) {
        for action in actions.drain() {
            match action {
                UiAction::Apply(action) => self.apply(action),
                UiAction::SubmitText(text) => self.submit_text(text),
                UiAction::SubmitImage(path) => self.submit_image(path),
                UiAction::SelectText { text, anchor } => self.select_text(&text, anchor),
                UiAction::ClosePopup => self.page.close_popup(),
                UiAction::ToggleColorPicker => {
                    if let Some(popup) = self.page.selection_mut().popup_mut() {
                        popup.show_color_picker = !popup.show_color_picker;
                    }
                }
                UiAction::DismissError => self.page.dismiss_error(),
                UiAction::OpenSettings => {
                    self.settings_modal.open_settings(self.settings_data.clone());
                }
            }
        }
    }

    fn apply(&mut self, action: Action) {
        // Leaving the current page drops its popup and error.
        if matches!(action, Action::Navigate(_) | Action::SelectHistory(_)) {
            self.page.leave();
            self.reading.reset();
        }

        let dirty = self.state.apply(action);
        self.persist(dirty);
    }

    fn submit_text(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        self.start_session(text);
    }

    fn start_session(&mut self, text: String) {
        self.page.leave();
        self.reading.reset();

        let dirty = self.state.apply(Action::StartSession { text, at: Utc::now() });
        self.persist(dirty);
    }

    fn submit_image(&mut self, path: PathBuf) {
        if self.extracting {
            log::warn!("Image extraction already running; ignoring {}", path.display());
            return;
        }
        self.page.dismiss_error();

        let Some(client) = self.client() else {
            return;
        };

        self.extracting = true;
        self.message_overlay.set_message("Analyzing your content...");
        self.task_manager.extract_text(client, path);
    }

    fn select_text(&mut self, text: &str, anchor: Anchor) {
        if self.state.view != View::Reading || self.reading.is_editing_title() {
            return;
        }

        let vocabulary =
            self.state.current_article.as_ref().map(|a| a.vocabulary.as_slice()).unwrap_or(&[]);

        let request = self.page.lookup(text, anchor, vocabulary, self.gemini.is_some());
        if let (Some((word, generation)), Some(client)) = (request, self.gemini.clone()) {
            self.task_manager.fetch_definition(client, word, generation);
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        log::debug!("Task finished: {}", result.task_type());

        match result {
            TaskResult::TextExtracted(result) => {
                self.extracting = false;
                self.message_overlay.clear_message();
                match result {
                    Ok(text) => self.start_session(text),
                    Err(message) => self.page.extraction_failed(message),
                }
            }

            TaskResult::DefinitionFetched { generation, word, result } => {
                self.page.definition_fetched(generation, &word, result);
            }
        }
    }
}

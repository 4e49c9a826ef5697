use eframe::egui;

use crate::{
    core::{
        Action,
        VocabularyEntry,
    },
    gui::{
        actions::ActionQueue,
        theme::Theme,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Full,
    /// Definition only.
    Compact,
}

pub struct VocabularyList<'a> {
    id_salt: &'a str,
    title: &'a str,
    words: &'a [VocabularyEntry],
    mode: DisplayMode,
    deletable: bool,
    scroll: bool,
}

impl<'a> VocabularyList<'a> {
    pub fn new(id_salt: &'a str, title: &'a str, words: &'a [VocabularyEntry]) -> Self {
        Self { id_salt, title, words, mode: DisplayMode::Full, deletable: false, scroll: true }
    }

    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn deletable(mut self, deletable: bool) -> Self {
        self.deletable = deletable;
        self
    }

    /// Lay entries out inline, for lists nested in an outer scroll area.
    pub fn inline(mut self) -> Self {
        self.scroll = false;
        self
    }

    pub fn show(self, ui: &mut egui::Ui, theme: &Theme, actions: &mut ActionQueue) {
        let ctx = ui.ctx().clone();

        if self.words.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(egui::RichText::new(self.title).size(18.0).strong());
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new("No vocabulary words for this article yet.")
                        .color(theme.muted(&ctx)),
                );
            });
            return;
        }

        if !self.title.is_empty() {
            ui.label(egui::RichText::new(self.title).size(18.0).strong());
            ui.add_space(8.0);
        }

        if !self.scroll {
            self.show_entries(ui, theme, actions);
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt(self.id_salt)
            .auto_shrink([false, true])
            .show(ui, |ui| self.show_entries(ui, theme, actions));
    }

    fn show_entries(&self, ui: &mut egui::Ui, theme: &Theme, actions: &mut ActionQueue) {
        for (i, entry) in self.words.iter().enumerate() {
            if i > 0 {
                ui.separator();
            }
            self.show_entry(ui, entry, theme, actions);
        }
    }

    fn show_entry(
        &self,
        ui: &mut egui::Ui,
        entry: &VocabularyEntry,
        theme: &Theme,
        actions: &mut ActionQueue,
    ) {
        let ctx = ui.ctx().clone();
        ui.horizontal(|ui| {
            ui.label(theme.word(&ctx, &entry.word));
            if let Some(pronunciation) = &entry.pronunciation {
                ui.label(egui::RichText::new(pronunciation).monospace().small().color(theme.muted(&ctx)));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.deletable
                    && ui
                        .small_button("🗑")
                        .on_hover_text(format!("Remove {}", entry.word))
                        .clicked()
                {
                    actions.apply(Action::DeleteWord(entry.word.clone()));
                }
            });
        });

        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Definition:").strong());
            ui.label(egui::RichText::new(&entry.definition).color(theme.muted(&ctx)));
        });
        if self.mode == DisplayMode::Full {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new("Example:").strong());
                ui.label(
                    egui::RichText::new(format!("\"{}\"", entry.usage)).italics().color(theme.muted(&ctx)),
                );
            });
        }
        ui.add_space(4.0);
    }
}

use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

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
pub enum SortBy {
    /// Insertion order; new words are prepended.
    #[default]
    Time,
    Count,
}

impl SortBy {
    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Time => "Time",
            SortBy::Count => "Count",
        }
    }
}

/// Row order for `words`. Count sorting is stable, so ties keep time order.
pub fn sorted_indices(words: &[VocabularyEntry], sort: SortBy) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..words.len()).collect();
    if sort == SortBy::Count {
        indices.sort_by(|&a, &b| words[b].save_count.max(1).cmp(&words[a].save_count.max(1)));
    }
    indices
}

#[derive(Default)]
pub struct AllWordsView {
    sort: SortBy,
}

impl AllWordsView {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        words: &[VocabularyEntry],
        theme: &Theme,
        actions: &mut ActionQueue,
    ) {
        let ctx = ui.ctx().clone();

        ui.horizontal(|ui| {
            ui.label(theme.heading(&ctx, "All Saved Words"));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for sort in [SortBy::Count, SortBy::Time] {
                    ui.selectable_value(&mut self.sort, sort, sort.label());
                }
                ui.label(egui::RichText::new("Sort by:").color(theme.muted(&ctx)));
            });
        });
        ui.separator();
        ui.add_space(8.0);

        if words.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(
                    egui::RichText::new("No saved words yet. Select a word while reading to save it.")
                        .color(theme.muted(&ctx)),
                );
            });
            return;
        }

        let order = sorted_indices(words, self.sort);

        TableBuilder::new(ui)
            .id_salt("all_words_table")
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(160.0))
            .column(Column::remainder().at_least(200.0).clip(true))
            .column(Column::exact(60.0))
            .column(Column::exact(40.0))
            .header(25.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Word");
                });
                header.col(|ui| {
                    ui.strong("Definition");
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
                header.col(|_| {});
            })
            .body(|body| {
                body.rows(48.0, order.len(), |mut row| {
                    let entry = &words[order[row.index()]];

                    row.col(|ui| {
                        ui.vertical(|ui| {
                            ui.label(theme.word(&ctx, &entry.word));
                            if let Some(pronunciation) = &entry.pronunciation {
                                ui.label(
                                    egui::RichText::new(pronunciation)
                                        .monospace()
                                        .small()
                                        .color(theme.muted(&ctx)),
                                );
                            }
                        });
                    });
                    row.col(|ui| {
                        ui.add(egui::Label::new(&entry.definition).truncate())
                            .on_hover_text(format!("{}\n\n\"{}\"", entry.definition, entry.usage));
                    });
                    row.col(|ui| {
                        ui.label(entry.save_count.to_string()).on_hover_text(entry.format_save_count());
                    });
                    row.col(|ui| {
                        if ui
                            .small_button("🗑")
                            .on_hover_text(format!("Remove {}", entry.word))
                            .clicked()
                        {
                            actions.apply(Action::DeleteWord(entry.word.clone()));
                        }
                    });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(name: &str, count: u32) -> VocabularyEntry {
        VocabularyEntry { save_count: count, ..VocabularyEntry::new(name, "d", "u") }
    }

    #[test]
    fn test_time_sort_keeps_insertion_order() {
        let words = vec![word("c", 1), word("b", 5), word("a", 2)];
        assert_eq!(sorted_indices(&words, SortBy::Time), vec![0, 1, 2]);
    }

    #[test]
    fn test_count_sort_is_descending_and_stable() {
        let words = vec![word("newest", 2), word("big", 7), word("older", 2), word("zero", 0)];
        let order: Vec<&str> = sorted_indices(&words, SortBy::Count)
            .into_iter()
            .map(|i| words[i].word.as_str())
            .collect();
        assert_eq!(order, ["big", "newest", "older", "zero"]);
    }
}

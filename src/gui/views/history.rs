use eframe::egui;

use crate::{
    core::{
        Action,
        HistoryEntry,
    },
    gui::{
        actions::ActionQueue,
        theme::Theme,
        vocabulary_list::VocabularyList,
    },
};

pub fn show(ui: &mut egui::Ui, history: &[HistoryEntry], theme: &Theme, actions: &mut ActionQueue) {
    let ctx = ui.ctx().clone();

    if history.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.label(theme.heading(&ctx, "No History Yet"));
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(
                    "Your past sessions will appear here. Start by analyzing some text or an image from the Home screen.",
                )
                .color(theme.muted(&ctx)),
            );
        });
        return;
    }

    ui.label(theme.heading(&ctx, "History"));
    ui.separator();
    ui.add_space(8.0);

    egui::ScrollArea::vertical().id_salt("history_scroll").auto_shrink([false, false]).show(
        ui,
        |ui| {
            for entry in history {
                history_card(ui, entry, theme, actions);
                ui.add_space(12.0);
            }
        },
    );
}

fn history_card(ui: &mut egui::Ui, entry: &HistoryEntry, theme: &Theme, actions: &mut ActionQueue) {
    let ctx = ui.ctx().clone();

    egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(16)).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&entry.title).size(18.0).strong());
                ui.label(
                    egui::RichText::new(entry.format_created_at()).small().color(theme.muted(&ctx)),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑").on_hover_text("Delete entry").clicked() {
                    actions.apply(Action::DeleteHistory(entry.id.clone()));
                }
                if ui.button("View Reading").clicked() {
                    actions.apply(Action::SelectHistory(entry.id.clone()));
                }
            });
        });

        ui.add_space(6.0);
        egui::CollapsingHeader::new(
            egui::RichText::new(format!(
                "View {} vocabulary words from this session",
                entry.vocabulary.len()
            ))
            .color(theme.accent(&ctx)),
        )
        .id_salt(("history_words", &entry.id))
        .default_open(false)
        .show(ui, |ui| {
            VocabularyList::new(&entry.id, "", &entry.vocabulary).inline().show(ui, theme, actions);
        });
    });
}

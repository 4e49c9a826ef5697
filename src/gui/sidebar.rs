use eframe::egui;

use crate::{
    core::View,
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        theme::Theme,
    },
};

pub struct Sidebar;

impl Sidebar {
    pub fn show(ctx: &egui::Context, current: View, theme: &Theme, actions: &mut ActionQueue) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new("📚 Lexiread").size(20.0).strong().color(theme.accent(ctx)),
                );
                ui.add_space(16.0);

                for view in View::NAVIGABLE {
                    // Reading belongs to Home in the navigation.
                    let active = current == view || (view == View::Home && current == View::Reading);
                    let label = format!("{}  {}", view.icon(), view.label());
                    let text = if active {
                        egui::RichText::new(label).strong().color(theme.accent(ctx))
                    } else {
                        egui::RichText::new(label)
                    };

                    let button = egui::Button::new(text)
                        .selected(active)
                        .min_size(egui::vec2(ui.available_width(), 32.0));
                    if ui.add(button).clicked() && current != view {
                        actions.push(UiAction::navigate(view));
                    }
                    ui.add_space(4.0);
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(12.0);
                    if ui.button("⚙ Settings").clicked() {
                        actions.push(UiAction::OpenSettings);
                    }
                });
            });
    }
}

use eframe::egui;

use super::data::{
    SettingsData,
    API_KEY_ENV_VARS,
};

pub struct SettingsModal {
    open: bool,
    temp_settings: SettingsData,
    original_settings: SettingsData,
    show_key: bool,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self {
            open: false,
            temp_settings: SettingsData::default(),
            original_settings: SettingsData::default(),
            show_key: false,
        }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.temp_settings = current_settings.clone();
        self.original_settings = current_settings;
        self.show_key = false;
        self.open = true;
    }

    pub fn is_settings_open(&self) -> bool {
        self.open
    }

    fn is_dirty(&self) -> bool {
        self.temp_settings != self.original_settings
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut result: Option<SettingsData> = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            self.ui_api_configuration(ui);
            ui.add_space(10.0);

            ui.checkbox(&mut self.temp_settings.dark_mode, "Dark mode");
            ui.add_space(10.0);

            ui.separator();

            let is_dirty = self.is_dirty();

            ui.horizontal(|ui| {
                if is_dirty {
                    ui.colored_label(egui::Color32::YELLOW, "⚠");
                    ui.label("Settings have been modified");
                } else {
                    ui.colored_label(egui::Color32::TRANSPARENT, "⚠");
                    ui.label("");
                }
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                let save_clicked =
                    ui.add_enabled(is_dirty, egui::Button::new("Save Settings")).clicked();
                let cancel_clicked = ui.button("Cancel").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Restore Default").clicked();
                });

                if save_clicked {
                    self.original_settings = self.temp_settings.clone();
                    result = Some(self.temp_settings.clone());
                    ui.close();
                } else if cancel_clicked {
                    self.temp_settings = self.original_settings.clone();
                    ui.close();
                } else if reset_clicked {
                    self.temp_settings = SettingsData {
                        api_key: self.temp_settings.api_key.clone(),
                        ..SettingsData::default()
                    };
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }

    fn ui_api_configuration(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("gemini_settings_grid").num_columns(2).spacing([10.0, 8.0]).show(
            ui,
            |ui| {
                ui.label("Gemini API key:");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.temp_settings.api_key)
                            .password(!self.show_key)
                            .desired_width(240.0),
                    );
                    let eye = if self.show_key { "🙈" } else { "👁" };
                    if ui.small_button(eye).on_hover_text("Show or hide the key").clicked() {
                        self.show_key = !self.show_key;
                    }
                });
                ui.end_row();

                ui.label("Model:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.temp_settings.model).desired_width(240.0),
                );
                ui.end_row();
            },
        );

        if self.temp_settings.api_key.trim().is_empty() {
            ui.add_space(4.0);
            ui.small(format!(
                "Leave empty to use the {} environment variable.",
                API_KEY_ENV_VARS.join(" or ")
            ));
        }
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}

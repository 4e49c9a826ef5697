use std::path::{
    Path,
    PathBuf,
};

use eframe::egui;

use crate::{
    gemini::{
        api::image_mime_type,
        IMAGE_EXTENSIONS,
    },
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        theme::Theme,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    Image,
}

#[derive(Default)]
pub struct HomeView {
    mode: InputMode,
    text: String,
    file_name: Option<String>,
}

/// First dropped path that looks like a supported image.
pub fn first_image<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    paths.into_iter().find(|path| image_mime_type(path).is_ok()).map(Path::to_path_buf)
}

impl HomeView {
    pub fn show(&mut self, ui: &mut egui::Ui, loading: bool, theme: &Theme, actions: &mut ActionQueue) {
        let ctx = ui.ctx().clone();

        ui.vertical_centered(|ui| {
            ui.set_max_width(720.0);
            ui.add_space(24.0);

            ui.label(theme.heading(&ctx, "Start Learning"));
            ui.label(
                egui::RichText::new(
                    "Paste your text or upload an image to begin building your vocabulary.",
                )
                .color(theme.muted(&ctx)),
            );
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.mode, InputMode::Text, "📝 Paste Text");
                ui.selectable_value(&mut self.mode, InputMode::Image, "📤 Upload Image");
            });
            ui.separator();
            ui.add_space(8.0);

            if loading {
                ui.add_space(60.0);
                ui.add(egui::Spinner::new().size(36.0));
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Analyzing your content...").strong().color(theme.muted(&ctx)),
                );
                return;
            }

            match self.mode {
                InputMode::Text => self.ui_text_input(ui, actions),
                InputMode::Image => self.ui_image_input(ui, theme, actions),
            }
        });
    }

    fn ui_text_input(&mut self, ui: &mut egui::Ui, actions: &mut ActionQueue) {
        ui.add(
            egui::TextEdit::multiline(&mut self.text)
                .hint_text("Paste your article or text here...")
                .desired_width(f32::INFINITY)
                .desired_rows(14),
        );
        ui.add_space(12.0);

        let can_submit = !self.text.trim().is_empty();
        let button = egui::Button::new(egui::RichText::new("Start Learning").strong())
            .min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add_enabled(can_submit, button).clicked() {
            actions.push(UiAction::SubmitText(std::mem::take(&mut self.text)));
        }
    }

    fn ui_image_input(&mut self, ui: &mut egui::Ui, theme: &Theme, actions: &mut ActionQueue) {
        let ctx = ui.ctx().clone();
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let stroke_color = if hovering { theme.accent(&ctx) } else { theme.muted(&ctx) };

        let drop_zone = egui::Frame::NONE
            .stroke(egui::Stroke::new(2.0, stroke_color))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(24, 48))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("📤").size(40.0).color(theme.muted(&ctx)));
                    ui.add_space(6.0);
                    let caption = self
                        .file_name
                        .as_deref()
                        .unwrap_or("Drag & drop an image, or click to browse");
                    ui.label(egui::RichText::new(caption).strong());
                });
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);

        if drop_zone.clicked() {
            if let Some(path) =
                rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS).pick_file()
            {
                self.submit_image(path, actions);
            }
        }

        let dropped = ctx.input(|i| {
            first_image(i.raw.dropped_files.iter().filter_map(|file| file.path.as_deref()))
        });
        if let Some(path) = dropped {
            self.submit_image(path, actions);
        }
    }

    fn submit_image(&mut self, path: PathBuf, actions: &mut ActionQueue) {
        self.file_name = path.file_name().map(|name| name.to_string_lossy().into_owned());
        log::info!("Selected image {}", path.display());
        actions.push(UiAction::SubmitImage(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_image_skips_unsupported_files() {
        let paths = [PathBuf::from("notes.txt"), PathBuf::from("page.JPG"), PathBuf::from("b.png")];
        let picked = first_image(paths.iter().map(PathBuf::as_path));
        assert_eq!(picked, Some(PathBuf::from("page.JPG")));

        let none = [PathBuf::from("archive.zip")];
        assert_eq!(first_image(none.iter().map(PathBuf::as_path)), None);
    }
}

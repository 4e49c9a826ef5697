use eframe::egui;

use crate::gui::theme::Theme;

pub struct TutorialStep {
    pub title: &'static str,
    pub intro: &'static str,
    pub points: &'static [(&'static str, &'static str)],
}

pub const TUTORIAL_STEPS: [TutorialStep; 4] = [
    TutorialStep {
        title: "Start a New Session",
        intro: "From the Home page, you have two ways to begin:",
        points: &[
            (
                "Paste Text",
                "Choose \"Paste Text\", enter any text you want to read and click \"Start Learning\".",
            ),
            (
                "Upload Image",
                "Choose \"Upload Image\" to pick or drop an image containing text. The text is extracted for you.",
            ),
        ],
    },
    TutorialStep {
        title: "Read and Learn",
        intro: "Once your text is loaded, you are in the Reading view:",
        points: &[
            (
                "Get Definitions",
                "Select any word or short phrase. A popup shows its definition, pronunciation and an example sentence.",
            ),
            (
                "Save Words",
                "Click ➕ in the popup to add the word to this article's list and your global collection.",
            ),
            (
                "Highlight Text",
                "Click 🖍 in the popup to mark the word. Click it again to pick another color or remove it.",
            ),
        ],
    },
    TutorialStep {
        title: "Review Your Vocabulary",
        intro: "All your saved words are stored for easy review:",
        points: &[
            (
                "Article Vocabulary",
                "The list on the right of the Reading view shows the words saved from the current article.",
            ),
            (
                "All Words",
                "Open \"All Words\" from the sidebar to see every word you have saved, sorted by time or save count.",
            ),
        ],
    },
    TutorialStep {
        title: "Check Your History",
        intro: "The History page keeps a record of your past reading sessions. Revisit any session to review the text and the vocabulary you learned.",
        points: &[],
    },
];

pub fn show(ui: &mut egui::Ui, theme: &Theme) {
    let ctx = ui.ctx().clone();

    egui::ScrollArea::vertical().id_salt("tutorial_scroll").show(ui, |ui| {
        ui.label(theme.heading(&ctx, "How to Use Lexiread"));
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("This guide walks you through the features to help you get started.")
                .color(theme.muted(&ctx)),
        );
        ui.separator();
        ui.add_space(12.0);

        for (number, step) in TUTORIAL_STEPS.iter().enumerate() {
            ui.horizontal_top(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}", number + 1))
                        .size(28.0)
                        .strong()
                        .color(theme.accent(&ctx)),
                );
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(step.title).size(20.0).strong());
                    ui.add_space(4.0);
                    ui.label(step.intro);
                    for (name, text) in step.points {
                        ui.horizontal_wrapped(|ui| {
                            ui.label("•");
                            ui.label(egui::RichText::new(format!("{name}:")).strong());
                            ui.label(*text);
                        });
                    }
                });
            });
            ui.add_space(20.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorial_step_order() {
        let titles: Vec<&str> = TUTORIAL_STEPS.iter().map(|step| step.title).collect();
        assert_eq!(
            titles,
            ["Start a New Session", "Read and Learn", "Review Your Vocabulary", "Check Your History"]
        );
    }
}

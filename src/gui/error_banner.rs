use eframe::egui;

use crate::{
    core::selection::ErrorNotice,
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        theme::Theme,
    },
};

/// Page-level error shown above the active view until dismissed.
#[derive(Default)]
pub struct ErrorBanner {
    notice: Option<ErrorNotice>,
}

impl ErrorBanner {
    pub fn set(&mut self, notice: ErrorNotice) {
        log::warn!("{}", notice.message);
        self.notice = Some(notice);
    }

    pub fn clear(&mut self) {
        self.notice = None;
    }

    /// Drops the banner unless it is persistent.
    pub fn clear_transient(&mut self) {
        if self.notice.as_ref().is_some_and(|notice| !notice.persistent) {
            self.notice = None;
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.notice.as_ref().map(|notice| notice.message.as_str())
    }

    pub fn show(&self, ui: &mut egui::Ui, theme: &Theme, actions: &mut ActionQueue) {
        let Some(notice) = &self.notice else {
            return;
        };

        let ctx = ui.ctx().clone();
        egui::Frame::NONE
            .fill(theme.danger_background(&ctx))
            .stroke(egui::Stroke::new(1.0, theme.danger(&ctx)))
            .corner_radius(4.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Error:").strong().color(theme.danger(&ctx)));
                    ui.label(egui::RichText::new(&notice.message).color(theme.danger(&ctx)));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").on_hover_text("Close").clicked() {
                            actions.push(UiAction::DismissError);
                        }
                    });
                });
            });

        ui.add_space(12.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_notice_is_cleared_but_persistent_is_kept() {
        let mut banner = ErrorBanner::default();
        banner.set(ErrorNotice::transient("Failed to get definition for \"sun\"."));
        banner.clear_transient();
        assert!(banner.message().is_none());

        banner.set(ErrorNotice::persistent("quota"));
        banner.clear_transient();
        assert_eq!(banner.message(), Some("quota"));

        banner.clear();
        assert!(banner.message().is_none());
    }
}

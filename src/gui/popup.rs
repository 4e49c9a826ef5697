use eframe::egui::{
    self,
    Color32,
    Pos2,
    Rect,
    Vec2,
};

use crate::{
    core::{
        highlight::{
            DEFAULT_HIGHLIGHT,
            HIGHLIGHT_COLORS,
        },
        selection::PopupState,
        Action,
    },
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        theme::Theme,
    },
};

pub const POPUP_WIDTH: f32 = 320.0;
const ANCHOR_GAP: f32 = 15.0;
const EDGE_MARGIN: f32 = 10.0;

pub fn popup_id() -> egui::Id {
    egui::Id::new("vocabulary_popup")
}

/// Top-left corner for a popup of `size` opened at `anchor`.
///
/// The popup sits below the anchor, is pulled back inside `container`
/// horizontally, and flips above the anchor when it would run past
/// `viewport_bottom`.
pub fn place_popup(anchor: Pos2, size: Vec2, container: Rect, viewport_bottom: f32) -> Pos2 {
    let mut left = anchor.x - container.left();
    let mut top = anchor.y - container.top() + ANCHOR_GAP;

    if left + size.x > container.width() {
        left = container.width() - size.x - EDGE_MARGIN;
    }
    if left < 0.0 {
        left = EDGE_MARGIN;
    }
    if anchor.y + size.y > viewport_bottom {
        top = anchor.y - container.top() - size.y - ANCHOR_GAP;
    }

    Pos2::new(container.left() + left, container.top() + top)
}

pub fn parse_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::from_rgb(254, 240, 138))
}

/// Draws the popup beside its anchor, kept inside `container`.
pub fn show(
    ctx: &egui::Context,
    popup: &PopupState,
    highlight: Option<&str>,
    container: Rect,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let id = popup_id();
    let size = ctx
        .memory(|mem| mem.area_rect(id))
        .map(|rect| rect.size())
        .unwrap_or(Vec2::new(POPUP_WIDTH, 160.0));
    let anchor = Pos2::new(popup.anchor.x, popup.anchor.y);
    let position = place_popup(anchor, size, container, ctx.screen_rect().bottom());

    egui::Area::new(id)
        .order(egui::Order::Foreground)
        .fixed_pos(position)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).inner_margin(egui::Margin::same(14)).show(ui, |ui| {
                ui.set_width(POPUP_WIDTH - 28.0);
                popup_header(ui, popup, highlight, theme, actions);
                ui.add_space(8.0);
                popup_body(ui, popup, theme);
            });
        });
}

fn popup_header(
    ui: &mut egui::Ui,
    popup: &PopupState,
    highlight: Option<&str>,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let ctx = ui.ctx().clone();
    ui.horizontal(|ui| {
        let word = popup.entry().map(|entry| entry.word.as_str()).unwrap_or(&popup.word);
        ui.label(theme.word(&ctx, word).size(20.0));

        if let Some(entry) = popup.entry() {
            if ui.button("➕").on_hover_text("Save word").clicked() {
                actions.apply(Action::SaveWord(entry.clone()));
            }

            let highlight_button = match highlight {
                Some(color) => egui::Button::new(
                    egui::RichText::new("🖍").color(theme.highlighted_text()),
                )
                .fill(parse_color(color)),
                None => egui::Button::new("🖍"),
            };
            if ui.add(highlight_button).on_hover_text("Highlight word").clicked() {
                match highlight {
                    None => actions.apply(Action::SetHighlight {
                        phrase: entry.word.clone(),
                        color: DEFAULT_HIGHLIGHT.to_string(),
                    }),
                    Some(_) => actions.push(UiAction::ToggleColorPicker),
                }
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui.small_button("✕").on_hover_text("Close").clicked() {
                actions.push(UiAction::ClosePopup);
            }
        });
    });

    if let (Some(entry), true) = (popup.entry(), popup.show_color_picker) {
        ui.horizontal(|ui| {
            for (name, color) in HIGHLIGHT_COLORS {
                let swatch = egui::Button::new("")
                    .fill(parse_color(color))
                    .min_size(Vec2::splat(22.0))
                    .corner_radius(11.0);
                if ui.add(swatch).on_hover_text(name).clicked() {
                    actions.apply(Action::SetHighlight {
                        phrase: entry.word.clone(),
                        color: color.to_string(),
                    });
                    actions.push(UiAction::ToggleColorPicker);
                }
            }
            let clear = egui::Button::new("⊘").min_size(Vec2::splat(22.0)).corner_radius(11.0);
            if ui.add(clear).on_hover_text("No color").clicked() {
                actions.apply(Action::RemoveHighlight(entry.word.clone()));
                actions.push(UiAction::ToggleColorPicker);
            }
        });
    }
}

fn popup_body(ui: &mut egui::Ui, popup: &PopupState, theme: &Theme) {
    let ctx = ui.ctx().clone();
    let Some(entry) = popup.entry() else {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Fetching definition...").color(theme.muted(&ctx)));
        });
        return;
    };

    if let Some(pronunciation) = &entry.pronunciation {
        ui.label(egui::RichText::new(pronunciation).monospace().color(theme.muted(&ctx)));
        ui.add_space(4.0);
    }

    ui.label(egui::RichText::new("Definition").strong());
    ui.label(&entry.definition);
    ui.add_space(6.0);

    ui.label(egui::RichText::new("Example").strong());
    ui.label(egui::RichText::new(format!("\"{}\"", entry.usage)).italics());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(800.0, 600.0))
    }

    const SIZE: Vec2 = Vec2::new(320.0, 200.0);

    #[test]
    fn test_popup_opens_below_anchor() {
        let pos = place_popup(Pos2::new(100.0, 100.0), SIZE, container(), 600.0);
        assert_eq!(pos, Pos2::new(100.0, 115.0));
    }

    #[test]
    fn test_popup_is_pulled_left_at_right_edge() {
        let pos = place_popup(Pos2::new(700.0, 100.0), SIZE, container(), 600.0);
        assert_eq!(pos.x, 800.0 - 320.0 - 10.0);
    }

    #[test]
    fn test_popup_left_overflow_uses_margin() {
        let container = Rect::from_min_size(Pos2::new(50.0, 0.0), Vec2::new(800.0, 600.0));
        let pos = place_popup(Pos2::new(20.0, 100.0), SIZE, container, 600.0);
        assert_eq!(pos.x, 60.0);
    }

    #[test]
    fn test_popup_flips_above_near_viewport_bottom() {
        let pos = place_popup(Pos2::new(100.0, 500.0), SIZE, container(), 600.0);
        assert_eq!(pos.y, 500.0 - 200.0 - 15.0);
    }

    #[test]
    fn test_parse_color_falls_back_to_yellow() {
        assert_eq!(parse_color("#fed7aa"), Color32::from_rgb(0xfe, 0xd7, 0xaa));
        assert_eq!(parse_color("nope"), Color32::from_rgb(254, 240, 138));
    }
}

use std::collections::BTreeMap;

use eframe::egui::{
    self,
    text::{
        CCursor,
        LayoutJob,
        TextFormat,
    },
    FontId,
    Pos2,
    Rect,
};

use crate::{
    core::{
        highlight::{
            HighlightIndex,
            Segment,
        },
        selection::Anchor,
        Action,
        HistoryEntry,
        View,
    },
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        popup::parse_color,
        theme::Theme,
        vocabulary_list::{
            DisplayMode,
            VocabularyList,
        },
    },
};

const READING_FONT_SIZE: f32 = 18.0;

/// Screen point under the start of a selection, given the start cursor's
/// galley-relative rect.
fn selection_anchor(cursor_rect: Rect, galley_pos: Pos2) -> Anchor {
    let rect = cursor_rect.translate(galley_pos.to_vec2());
    Anchor { x: rect.left(), y: rect.bottom() }
}

/// Characters `[start, end)` of `text`, counted in chars rather than bytes.
pub fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Span index cached against the article and highlight map it was built from.
#[derive(Default)]
struct CachedIndex {
    article_id: String,
    highlights: BTreeMap<String, String>,
    index: HighlightIndex,
}

impl CachedIndex {
    fn refresh(&mut self, article: &HistoryEntry) -> &HighlightIndex {
        if self.article_id != article.id || self.highlights != article.highlights {
            self.index = HighlightIndex::build(&article.source_text, &article.highlights);
            self.article_id = article.id.clone();
            self.highlights = article.highlights.clone();
            log::debug!("Rebuilt highlight index: {} spans", self.index.spans().len());
        }
        &self.index
    }
}

#[derive(Default)]
pub struct ReadingView {
    editing_title: Option<String>,
    focus_title: bool,
    cache: CachedIndex,
    container: Option<Rect>,
}

impl ReadingView {
    /// Rect of the reading pane from the last frame, used to place the popup.
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    /// Drops an uncommitted title edit when the article changes.
    pub fn reset(&mut self) {
        self.editing_title = None;
        self.focus_title = false;
    }

    pub fn is_editing_title(&self) -> bool {
        self.editing_title.is_some()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        article: Option<&HistoryEntry>,
        theme: &Theme,
        actions: &mut ActionQueue,
    ) {
        let Some(article) = article else {
            self.container = None;
            self.ui_no_article(ui, theme, actions);
            return;
        };

        if ui.button("← Back to Home").clicked() {
            actions.push(UiAction::navigate(View::Home));
        }
        ui.add_space(8.0);

        egui::SidePanel::right("article_vocabulary")
            .resizable(true)
            .default_width(300.0)
            .min_width(220.0)
            .show_inside(ui, |ui| {
                ui.add_space(8.0);
                VocabularyList::new("article_vocabulary_list", "Article Vocabulary", &article.vocabulary)
                    .mode(DisplayMode::Compact)
                    .deletable(true)
                    .show(ui, theme, actions);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            self.ui_title(ui, article, theme, actions);
            ui.separator();
            ui.add_space(8.0);
            self.ui_text(ui, article, theme, actions);
        });
    }

    fn ui_no_article(&self, ui: &mut egui::Ui, theme: &Theme, actions: &mut ActionQueue) {
        let ctx = ui.ctx().clone();
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.label(theme.heading(&ctx, "No article selected"));
            ui.add_space(8.0);
            if ui.button("← Back to Home").clicked() {
                actions.push(UiAction::navigate(View::Home));
            }
        });
    }

    fn ui_title(
        &mut self,
        ui: &mut egui::Ui,
        article: &HistoryEntry,
        theme: &Theme,
        actions: &mut ActionQueue,
    ) {
        let ctx = ui.ctx().clone();

        if let Some(buffer) = self.editing_title.as_mut() {
            let response = ui.add(
                egui::TextEdit::singleline(buffer)
                    .font(FontId::proportional(24.0))
                    .desired_width(f32::INFINITY),
            );
            if self.focus_title {
                response.request_focus();
                self.focus_title = false;
            }
            // Enter also drops focus from a single-line edit.
            if response.lost_focus() {
                let title = std::mem::take(buffer);
                self.editing_title = None;
                if title != article.title {
                    actions.apply(Action::SetTitle(title));
                }
            }
            return;
        }

        ui.horizontal(|ui| {
            let title = ui
                .add(egui::Label::new(theme.heading(&ctx, &article.title)).sense(egui::Sense::click()))
                .on_hover_text("Click to edit title");
            let edit = ui.small_button("✏").on_hover_text("Edit title");
            if title.clicked() || edit.clicked() {
                self.editing_title = Some(article.title.clone());
                self.focus_title = true;
            }
        });
    }

    fn ui_text(
        &mut self,
        ui: &mut egui::Ui,
        article: &HistoryEntry,
        theme: &Theme,
        actions: &mut ActionQueue,
    ) {
        let index = self.cache.refresh(article);
        let text_color = ui.visuals().text_color();
        let highlighted_text = theme.highlighted_text();
        let font = FontId::proportional(READING_FONT_SIZE);

        let mut source: &str = &article.source_text;

        let scroll = egui::ScrollArea::vertical().id_salt("reading_scroll").auto_shrink([false, false]).show(
            ui,
            |ui| {
                egui::TextEdit::multiline(&mut source)
                    .id_salt("reading_text")
                    .frame(false)
                    .desired_width(f32::INFINITY)
                    .layouter(&mut |ui, _buf, wrap_width| {
                        let mut job = LayoutJob::default();
                        for segment in index.segments(&article.source_text) {
                            let (text, format) = match segment {
                                Segment::Plain(text) => {
                                    (text, TextFormat::simple(font.clone(), text_color))
                                }
                                Segment::Highlighted { text, color } => (
                                    text,
                                    TextFormat {
                                        font_id: font.clone(),
                                        color: highlighted_text,
                                        background: parse_color(color),
                                        ..Default::default()
                                    },
                                ),
                            };
                            job.append(text, 0.0, format);
                        }
                        job.wrap.max_width = wrap_width;
                        ui.fonts(|f| f.layout_job(job))
                    })
                    .show(ui)
            },
        );
        self.container = Some(scroll.inner_rect);

        let output = scroll.inner;
        let response = &output.response;
        let released = response.drag_stopped() || response.clicked() || response.double_clicked();
        if !released || self.is_editing_title() {
            return;
        }

        let (text, anchor) = match output.state.cursor.char_range() {
            Some(range) => {
                let start = range.primary.index.min(range.secondary.index);
                let end = range.primary.index.max(range.secondary.index);
                let cursor_rect = output.galley.pos_from_cursor(CCursor::new(start));
                (
                    char_slice(&article.source_text, start, end),
                    selection_anchor(cursor_rect, output.galley_pos),
                )
            }
            None => {
                let corner = response.rect.left_bottom();
                (String::new(), Anchor { x: corner.x, y: corner.y })
            }
        };

        actions.push(UiAction::SelectText { text, anchor });
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_char_slice_counts_chars() {
        assert_eq!(char_slice("naïve sun", 0, 5), "naïve");
        assert_eq!(char_slice("naïve sun", 6, 9), "sun");
        assert_eq!(char_slice("sun", 2, 1), "");
        assert_eq!(char_slice("sun", 1, 99), "un");
    }

    #[test]
    fn test_selection_anchor_sits_below_start_of_selection() {
        let cursor_rect = Rect::from_min_max(Pos2::new(12.0, 20.0), Pos2::new(12.0, 38.0));
        let anchor = selection_anchor(cursor_rect, Pos2::new(100.0, 50.0));
        assert_eq!(anchor, Anchor { x: 112.0, y: 88.0 });
    }

    #[test]
    fn test_index_cache_rebuilds_on_highlight_change() {
        let mut article =
            HistoryEntry::new("a".to_string(), "The sun rises.".to_string(), Utc::now());
        let mut cache = CachedIndex::default();
        assert!(cache.refresh(&article).is_empty());

        article.highlights.insert("sun".to_string(), "#fef08a".to_string());
        assert_eq!(cache.refresh(&article).spans().len(), 1);

        article.highlights.clear();
        assert!(cache.refresh(&article).is_empty());
    }
}

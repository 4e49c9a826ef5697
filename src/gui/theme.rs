use eframe::egui::{
    self,
    Color32,
    RichText,
    Stroke,
    Visuals,
};
use egui::style::{
    Selection,
    WidgetVisuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: ThemeDetails,
    light: ThemeDetails,
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate()
    }
}

impl Theme {
    pub fn slate() -> Self {
        Theme { dark: ThemeDetails::slate_dark(), light: ThemeDetails::slate_light() }
    }

    fn details(&self, ctx: &egui::Context) -> &ThemeDetails {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).accent
    }

    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).muted
    }

    pub fn danger(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).danger
    }

    pub fn danger_background(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).danger_background
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).size(24.0).strong().color(self.details(ctx).foreground)
    }

    pub fn word(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).size(17.0).strong().color(self.accent(ctx))
    }

    /// Text drawn over a highlight swatch; swatches are always light.
    pub fn highlighted_text(&self) -> Color32 {
        Color32::from_rgb(30, 41, 59)
    }
}

#[derive(Clone)]
struct ThemeDetails {
    background: Color32,
    panel: Color32,
    raised: Color32,
    border: Color32,
    foreground: Color32,
    muted: Color32,
    accent: Color32,
    accent_soft: Color32,
    danger: Color32,
    danger_background: Color32,
}

impl ThemeDetails {
    // Tailwind slate/indigo
    fn slate_light() -> Self {
        Self {
            background: Color32::from_rgb(248, 250, 252),
            panel: Color32::from_rgb(255, 255, 255),
            raised: Color32::from_rgb(241, 245, 249),
            border: Color32::from_rgb(226, 232, 240),
            foreground: Color32::from_rgb(30, 41, 59),
            muted: Color32::from_rgb(100, 116, 139),
            accent: Color32::from_rgb(79, 70, 229),
            accent_soft: Color32::from_rgb(199, 210, 254),
            danger: Color32::from_rgb(185, 28, 28),
            danger_background: Color32::from_rgb(254, 226, 226),
        }
    }

    fn slate_dark() -> Self {
        Self {
            background: Color32::from_rgb(15, 23, 42),
            panel: Color32::from_rgb(30, 41, 59),
            raised: Color32::from_rgb(51, 65, 85),
            border: Color32::from_rgb(71, 85, 105),
            foreground: Color32::from_rgb(226, 232, 240),
            muted: Color32::from_rgb(148, 163, 184),
            accent: Color32::from_rgb(129, 140, 248),
            accent_soft: Color32::from_rgb(55, 48, 163),
            danger: Color32::from_rgb(252, 165, 165),
            danger_background: Color32::from_rgb(127, 29, 29),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn set_theme_variant(ctx: &egui::Context, theme: &ThemeDetails, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let widget = |base: WidgetVisuals, fill: Color32, stroke: Color32| WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: theme.foreground, ..base.fg_stroke },
        ..base
    };

    let mut visuals = Visuals {
        dark_mode: is_dark,
        selection: Selection {
            bg_fill: theme.accent_soft,
            stroke: Stroke { color: theme.foreground, ..default.selection.stroke },
        },
        hyperlink_color: theme.accent,
        faint_bg_color: theme.raised,
        extreme_bg_color: theme.background,
        code_bg_color: theme.raised,
        error_fg_color: theme.danger,
        window_fill: theme.panel,
        window_stroke: Stroke { color: theme.border, ..default.window_stroke },
        panel_fill: theme.background,
        ..default.clone()
    };

    visuals.widgets.noninteractive =
        widget(default.widgets.noninteractive, theme.panel, theme.border);
    visuals.widgets.inactive = widget(default.widgets.inactive, theme.raised, theme.border);
    visuals.widgets.hovered = widget(default.widgets.hovered, theme.accent_soft, theme.accent);
    visuals.widgets.active = widget(default.widgets.active, theme.accent_soft, theme.accent);
    visuals.widgets.open = widget(default.widgets.open, theme.raised, theme.accent);

    ctx.set_visuals_of(variant, visuals);
}

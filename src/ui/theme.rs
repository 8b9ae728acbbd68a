use egui::style::WidgetVisuals;
use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(19, 22, 28);
pub const BG_PANEL: Color32 = Color32::from_rgb(26, 29, 36);
pub const BG_HEADER: Color32 = Color32::from_rgb(31, 35, 44);
pub const BG_WEEKEND: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 7);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(56, 120, 200, 40);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(46, 51, 62);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(96, 165, 250);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 116, 139);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;

pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
pub const TODAY_LINE: Color32 = Color32::from_rgb(244, 63, 94);
pub const GRID_LINE: Color32 = Color32::from_rgb(38, 42, 52);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(241, 245, 249);
pub const GHOST_BAR: Color32 = Color32::from_rgba_premultiplied(40, 40, 50, 90);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 46.0;
/// Width of the owner-name column to the left of the bars.
pub const LABEL_WIDTH: f32 = 180.0;
pub const HANDLE_WIDTH: f32 = 8.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const BAR_INSET: f32 = 3.0; // vertical inset so stacked bars don't touch
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_owner() -> FontId {
    FontId::proportional(13.0)
}

// ── Owner color palette ──────────────────────────────────────────────────────

const OWNER_COLORS: &[Color32] = &[
    Color32::from_rgb(239, 68, 68),  // red
    Color32::from_rgb(59, 130, 246), // blue
    Color32::from_rgb(34, 197, 94),  // green
    Color32::from_rgb(234, 179, 8),  // yellow
    Color32::from_rgb(168, 85, 247), // purple
];

/// Bar color for the owner row at `index`.
pub fn owner_color(index: usize) -> Color32 {
    OWNER_COLORS[index % OWNER_COLORS.len()]
}

// ── Visuals ──────────────────────────────────────────────────────────────────

fn widget(bg: Color32, border: Color32, fg: Color32, fg_width: f32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: Stroke::new(1.0, border),
        fg_stroke: Stroke::new(fg_width, fg),
        rounding: Rounding::same(4.0),
        expansion: 0.0,
    }
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 28);
    visuals.faint_bg_color = BG_PANEL;

    visuals.widgets.noninteractive = widget(BG_PANEL, BORDER_SUBTLE, TEXT_SECONDARY, 1.0);
    visuals.widgets.inactive =
        widget(Color32::from_rgb(42, 44, 56), BORDER_SUBTLE, TEXT_PRIMARY, 1.0);
    visuals.widgets.hovered = widget(Color32::from_rgb(52, 54, 68), ACCENT, TEXT_PRIMARY, 1.0);
    visuals.widgets.active = widget(Color32::from_rgb(60, 62, 76), ACCENT, Color32::WHITE, 2.0);
    visuals.widgets.open = widget(Color32::from_rgb(50, 52, 66), ACCENT, TEXT_PRIMARY, 1.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(10.0, 3.0);
    ctx.set_style(style);
}

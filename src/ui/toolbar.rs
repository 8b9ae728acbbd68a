use crate::app::PlannerApp;
use crate::model::{Direction, Granularity};
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar: window paging, granularity and zoom.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  View  ").font(theme::font_header()), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.viewport.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.viewport.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Fit to Tasks").clicked() {
                app.fit_to_tasks();
                ui.close_menu();
            }
        });

        ui.separator();

        let mut granularity = app.viewport.granularity;
        ui.radio_value(&mut granularity, Granularity::Week, "Week");
        ui.radio_value(&mut granularity, Granularity::Month, "Month");
        if granularity != app.viewport.granularity {
            app.set_granularity(granularity);
        }

        ui.separator();

        if ui.button("◀").on_hover_text("Previous").clicked() {
            app.navigate(Direction::Backward);
        }
        ui.label(
            RichText::new(app.viewport.range_label())
                .font(theme::font_header())
                .color(theme::TEXT_PRIMARY),
        );
        if ui.button("▶").on_hover_text("Next").clicked() {
            app.navigate(Direction::Forward);
        }

        // Right-aligned project name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(&app.project.name).size(11.0).weak());
        });
    });
}

use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::app::SchedulerApp;
use crate::timeline::Granularity;

/// Render the top toolbar.
pub fn show_toolbar(app: &mut SchedulerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.label(RichText::new("Timescale").weak());
        let mut selection: Option<&'static str> = None;
        egui::ComboBox::from_id_salt("timescale")
            .selected_text(app.granularity().label())
            .show_ui(ui, |ui| {
                for granularity in Granularity::ALL {
                    let selected = app.granularity() == granularity;
                    if ui.selectable_label(selected, granularity.label()).clicked() {
                        selection = Some(granularity.id());
                    }
                }
            });
        if selection.is_some() {
            app.on_timescale_change(selection);
        }

        if ui.button(format!("{}  Today", icons::CROSSHAIR)).clicked() {
            app.scroll_to_today();
        }

        ui.separator();

        if ui.button(format!("{}  New Order", icons::PLUS)).clicked() {
            app.open_create_dialog(None);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(app.data_file_label())
                    .size(11.0)
                    .weak(),
            );
        });
    });
}

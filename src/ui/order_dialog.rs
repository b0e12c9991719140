use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Window};

use crate::error::Result;
use crate::model::{Schedule, WorkCenter, WorkOrder, WorkOrderStatus};
use crate::timeline::{parse_calendar_date, DATE_FORMAT};
use crate::ui::theme;

/// Editable state of the create/edit order dialog.
#[derive(Debug, Clone)]
pub struct OrderForm {
    /// Id of the order being edited; `None` when creating.
    pub editing: Option<String>,
    pub name: String,
    pub work_center_id: String,
    pub status: WorkOrderStatus,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub error: Option<String>,
}

impl OrderForm {
    pub fn create(work_center_id: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            editing: None,
            name: String::new(),
            work_center_id: work_center_id.into(),
            status: WorkOrderStatus::Open,
            start,
            end: start + chrono::Duration::days(7),
            error: None,
        }
    }

    pub fn edit(order: &WorkOrder) -> Result<Self> {
        Ok(Self {
            editing: Some(order.id().to_string()),
            name: order.data.name.clone(),
            work_center_id: order.data.work_center_id.clone(),
            status: order.data.status,
            start: parse_calendar_date(&order.data.start_date)?,
            end: parse_calendar_date(&order.data.end_date)?,
            error: None,
        })
    }

    /// Build the order this form describes, reusing the edited id.
    pub fn to_order(&self) -> WorkOrder {
        let id = self.editing.clone().unwrap_or_else(Schedule::next_order_id);
        WorkOrder::new(
            id,
            self.name.trim(),
            self.work_center_id.clone(),
            self.status,
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    Submit,
    Cancel,
}

/// Render the create/edit order dialog.
pub fn show_order_dialog(form: &mut OrderForm, work_centers: &[WorkCenter], ctx: &Context) -> DialogAction {
    let mut action = DialogAction::None;
    let title = if form.editing.is_some() {
        "Edit Work Order"
    } else {
        "New Work Order"
    };

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("order_form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut form.name).hint_text("Order name..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Work center").color(theme::TEXT_SECONDARY));
                    let selected_name = work_centers
                        .iter()
                        .find(|wc| wc.id() == form.work_center_id)
                        .map(|wc| wc.name().to_string())
                        .unwrap_or_default();
                    egui::ComboBox::from_id_salt("order_form_work_center")
                        .width(220.0)
                        .selected_text(selected_name)
                        .show_ui(ui, |ui| {
                            for wc in work_centers {
                                ui.selectable_value(
                                    &mut form.work_center_id,
                                    wc.id().to_string(),
                                    wc.name(),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Status").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("order_form_status")
                        .width(220.0)
                        .selected_text(form.status.label())
                        .show_ui(ui, |ui| {
                            for status in WorkOrderStatus::ALL {
                                ui.selectable_value(&mut form.status, status, status.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut form.start).id_salt("order_dp_start"));
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut form.end).id_salt("order_dp_end"));
                    ui.end_row();
                });

            if let Some(error) = &form.error {
                ui.add_space(4.0);
                ui.label(RichText::new(error).color(theme::TEXT_ERROR));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let label = if form.editing.is_some() { "Save" } else { "Create" };
                let submit = egui::Button::new(RichText::new(label).color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], submit).clicked() {
                    action = DialogAction::Submit;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    action = DialogAction::Cancel;
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = DialogAction::Cancel;
    }
    action
}

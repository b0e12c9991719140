use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::{self, AppSettings};
use crate::model::Schedule;
use crate::timeline::{local_today, Granularity, ScrollTarget, TimelineEngine, TimelineLayout};
use crate::ui;
use crate::ui::order_dialog::{DialogAction, OrderForm};

/// Frames to wait after a layout change before re-centering, so the scroll
/// area has seen the new content width.
const RECENTER_DELAY_FRAMES: u8 = 1;

/// Main application state.
pub struct SchedulerApp {
    pub schedule: Schedule,
    settings: AppSettings,
    settings_path: Option<PathBuf>,
    data_file: Option<PathBuf>,
    engine: TimelineEngine,
    granularity: Granularity,
    layout: TimelineLayout,

    recenter_in_frames: Option<u8>,
    viewport_width: f32,

    /// Schedule revision the selection was last reconciled against.
    seen_revision: u64,
    pub selected_order: Option<String>,
    pub order_form: Option<OrderForm>,
    pub status_message: String,
    skipped_orders: usize,
}

impl SchedulerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let config_dir = config::config_dir();
        let settings_path = config::settings_path(&config_dir);
        let settings = AppSettings::load(&settings_path);
        let orders_path = settings.orders_path(&config_dir);

        let mut status_message = "Ready".to_string();
        let (schedule, data_file) = match Schedule::open(orders_path.clone()) {
            Ok(schedule) => (schedule, Some(orders_path)),
            Err(e) => {
                warn!(error = %e, "could not load work orders, changes will not be saved");
                status_message = format!("Error loading work orders: {}", e);
                (Schedule::default(), None)
            }
        };

        let mut app = Self::with_state(settings, schedule);
        app.settings_path = Some(settings_path);
        app.data_file = data_file;
        app.status_message = status_message;
        app
    }

    /// Build the app without touching the filesystem.
    pub fn with_state(settings: AppSettings, schedule: Schedule) -> Self {
        let engine = settings.engine();
        let granularity = settings.granularity;
        let layout = engine.layout(granularity, local_today());
        let seen_revision = schedule.revision();
        Self {
            schedule,
            settings,
            settings_path: None,
            data_file: None,
            engine,
            granularity,
            layout,
            recenter_in_frames: Some(RECENTER_DELAY_FRAMES),
            viewport_width: 0.0,
            seen_revision,
            selected_order: None,
            order_form: None,
            status_message: "Ready".to_string(),
            skipped_orders: 0,
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    pub fn data_file_label(&self) -> String {
        match &self.data_file {
            Some(path) => path.display().to_string(),
            None => "not saved".to_string(),
        }
    }

    // --- Timescale ---

    /// Handle a timescale selection. Empty or unknown values are ignored.
    pub fn on_timescale_change(&mut self, selection: Option<&str>) {
        match Granularity::from_selection(selection) {
            Some(granularity) => self.set_granularity(granularity),
            None => warn!(?selection, "ignoring timescale selection"),
        }
    }

    /// Switch the timescale, recompute the layout and re-center on today.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        info!(granularity = granularity.id(), "timescale changed");
        self.granularity = granularity;
        self.refresh_timeline();
        self.scroll_to_today();

        self.settings.granularity = granularity;
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save(path) {
                warn!(error = %e, "could not save settings");
            }
        }
        self.status_message = format!("Timescale: {}", granularity.label());
    }

    fn refresh_timeline(&mut self) {
        self.layout = self.engine.layout(self.granularity, local_today());
    }

    /// Ask for the viewport to be centered on today once layout settles.
    pub fn scroll_to_today(&mut self) {
        self.recenter_in_frames = Some(RECENTER_DELAY_FRAMES);
    }

    /// Scroll target to apply this frame, if a re-center is due.
    fn next_scroll_request(&mut self) -> Option<ScrollTarget> {
        match self.recenter_in_frames {
            Some(0) => {
                self.recenter_in_frames = None;
                Some(self.layout.scroll_target(self.viewport_width))
            }
            Some(n) => {
                self.recenter_in_frames = Some(n - 1);
                None
            }
            None => None,
        }
    }

    // --- Work orders ---

    /// Open the create dialog, optionally prefilled with a work center and
    /// start date.
    pub fn open_create_dialog(&mut self, at: Option<(String, NaiveDate)>) {
        let (work_center_id, start) = at.unwrap_or_else(|| {
            let first = self
                .schedule
                .work_centers()
                .first()
                .map(|wc| wc.id().to_string())
                .unwrap_or_default();
            (first, local_today())
        });
        self.order_form = Some(OrderForm::create(work_center_id, start));
    }

    pub fn open_edit_dialog(&mut self, id: &str) {
        let Some(order) = self.schedule.find_order(id) else {
            return;
        };
        match OrderForm::edit(order) {
            Ok(form) => self.order_form = Some(form),
            Err(e) => self.status_message = format!("Cannot edit '{}': {}", order.data.name, e),
        }
    }

    /// Validate and save the open dialog. On failure the dialog stays open
    /// with the error shown.
    pub fn submit_order_form(&mut self) {
        let Some(form) = self.order_form.as_mut() else {
            return;
        };
        let order = form.to_order();
        if let Err(e) = self.schedule.validate_order(&order) {
            form.error = Some(e.to_string());
            return;
        }

        let name = order.data.name.clone();
        let result = if form.editing.is_some() {
            self.schedule.update_order(order).map(|_| "updated")
        } else {
            self.schedule.add_order(order).map(|_| "created")
        };
        match result {
            Ok(verb) => {
                self.status_message = format!("Work order '{}' {}", name, verb);
                self.order_form = None;
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    pub fn delete_order(&mut self, id: &str) {
        match self.schedule.delete_order(id) {
            Ok(true) => self.status_message = "Work order deleted".to_string(),
            Ok(false) => {}
            Err(e) => self.status_message = format!("Error saving: {}", e),
        }
        self.sync_with_schedule();
    }

    /// Drop a selection whose order no longer exists once the schedule changes.
    fn sync_with_schedule(&mut self) {
        let revision = self.schedule.revision();
        if revision == self.seen_revision {
            return;
        }
        self.seen_revision = revision;
        if let Some(id) = &self.selected_order {
            if self.schedule.find_order(id).is_none() {
                debug!(id = %id, revision, "selected order is gone");
                self.selected_order = None;
            }
        }
    }
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        self.sync_with_schedule();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} · {} px/day · Orders: {}",
                                self.granularity.label(),
                                self.layout.pixels_per_day(),
                                self.schedule.work_orders().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        if self.skipped_orders > 0 {
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} with invalid dates ·",
                                    self.skipped_orders
                                ))
                                .size(10.5)
                                .color(ui::theme::TEXT_ERROR),
                            );
                        }
                    });
                });
            });

        egui::SidePanel::left("work_center_panel")
            .exact_width(ui::theme::SIDE_PANEL_WIDTH)
            .resizable(false)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui::work_center_panel::show_work_center_panel(&self.schedule, ui);
            });

        let scroll_to = self.next_scroll_request();
        if self.recenter_in_frames.is_some() {
            ctx.request_repaint();
        }

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::timeline_grid::show_timeline_grid(
                    &self.schedule,
                    &self.layout,
                    self.selected_order.as_deref(),
                    scroll_to,
                    ui,
                )
            })
            .inner;

        self.viewport_width = interaction.viewport_width;
        if interaction.skipped != self.skipped_orders {
            if interaction.skipped > 0 {
                warn!(count = interaction.skipped, "work orders with invalid dates not shown");
            }
            self.skipped_orders = interaction.skipped;
        }
        if let Some(id) = interaction.select {
            self.selected_order = Some(id);
        }
        if let Some(id) = interaction.edit {
            self.open_edit_dialog(&id);
        }
        if let Some(id) = interaction.delete {
            self.delete_order(&id);
        }
        if let Some(at) = interaction.create_at {
            if self.order_form.is_none() {
                self.selected_order = None;
                self.open_create_dialog(Some(at));
            }
        }

        if let Some(form) = self.order_form.as_mut() {
            match ui::order_dialog::show_order_dialog(form, self.schedule.work_centers(), ctx) {
                DialogAction::Submit => self.submit_order_form(),
                DialogAction::Cancel => self.order_form = None,
                DialogAction::None => {}
            }
        }
    }
}

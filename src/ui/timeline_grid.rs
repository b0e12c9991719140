use chrono::NaiveDate;
use egui::{Color32, Pos2, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};
use egui_phosphor::regular as icons;
use tracing::debug;

use crate::model::{Schedule, WorkOrder};
use crate::timeline::{ScrollTarget, Span, TimelineLayout};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const MENU_BUTTON_WIDTH: f32 = 22.0;

/// Requests raised by the timeline grid for the app to handle.
#[derive(Debug, Default)]
pub struct GridInteraction {
    pub select: Option<String>,
    pub edit: Option<String>,
    pub delete: Option<String>,
    /// Empty row area clicked: work center id and the date under the pointer.
    pub create_at: Option<(String, NaiveDate)>,
    /// Orders not drawn because their dates failed to parse.
    pub skipped: usize,
    /// Width of the visible scroll viewport this frame.
    pub viewport_width: f32,
}

/// Render the timeline: header increments, one row per work center, the
/// order bars and the today line.
///
/// `scroll_to` is applied to the scroll area this frame, clamped to the
/// scrollable range.
pub fn show_timeline_grid(
    schedule: &Schedule,
    layout: &TimelineLayout,
    selected_order: Option<&str>,
    scroll_to: Option<ScrollTarget>,
    ui: &mut Ui,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();
    let available = ui.available_size();
    interaction.viewport_width = available.x;

    let chart_width = (layout.total_width_px() as f32).max(available.x);
    let rows = schedule.work_centers().len();
    let chart_height = HEADER_HEIGHT + rows as f32 * (ROW_HEIGHT + ROW_GAP);

    let mut scroll_area = egui::ScrollArea::horizontal()
        .id_salt("timeline_grid")
        .auto_shrink([false, false]);
    if let Some(target) = scroll_to {
        let max_left = (chart_width - available.x).max(0.0);
        scroll_area = scroll_area.horizontal_scroll_offset(target.left_px.clamp(0.0, max_left));
    }

    scroll_area.show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(
            Vec2::new(chart_width, chart_height.max(available.y)),
            Sense::click(),
        );
        let origin = response.rect.min;
        let mut consumed_click = false;

        painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

        draw_header(&painter, origin, layout, chart_height);

        for i in 0..rows {
            let y = row_top(origin, i);
            if i % 2 == 0 {
                painter.rect_filled(
                    Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(chart_width, ROW_HEIGHT)),
                    0.0,
                    theme::BG_PANEL,
                );
            }
            painter.line_segment(
                [
                    Pos2::new(origin.x, y + ROW_HEIGHT + ROW_GAP / 2.0),
                    Pos2::new(origin.x + chart_width, y + ROW_HEIGHT + ROW_GAP / 2.0),
                ],
                Stroke::new(0.5, theme::BORDER_SUBTLE),
            );
        }

        draw_today_line(&painter, origin, layout, chart_height);

        for (i, work_center) in schedule.work_centers().iter().enumerate() {
            let y = row_top(origin, i);
            for order in schedule.orders_for(work_center.id()) {
                let span = match layout.place(order) {
                    Ok(span) => span,
                    Err(e) => {
                        debug!(id = order.id(), error = %e, "skipping unplaceable order");
                        interaction.skipped += 1;
                        continue;
                    }
                };
                let is_selected = selected_order == Some(order.id());
                let bar_rect = draw_order_bar(&painter, origin, span, order, y, is_selected);

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("order-bar", order.id())),
                    Sense::click(),
                );
                if bar_response.clicked() {
                    interaction.select = Some(order.id().to_string());
                    consumed_click = true;
                }
                if bar_response.double_clicked() {
                    interaction.edit = Some(order.id().to_string());
                    consumed_click = true;
                }
                bar_response.clone().on_hover_ui_at_pointer(|ui| {
                    ui.strong(&order.data.name);
                    ui.label(format!("{} → {}", order.data.start_date, order.data.end_date));
                    ui.label(order.data.status.label());
                });

                if bar_rect.width() > MENU_BUTTON_WIDTH * 2.0 {
                    let menu_rect = Rect::from_min_max(
                        Pos2::new(bar_rect.right() - MENU_BUTTON_WIDTH, bar_rect.top()),
                        bar_rect.max,
                    );
                    #[allow(deprecated)]
                    ui.allocate_ui_at_rect(menu_rect, |ui| {
                        ui.menu_button(RichText::new(icons::DOTS_THREE).color(theme::TEXT_ON_BAR), |ui| {
                            order_actions(order, &mut interaction, ui);
                        });
                    });
                }
                bar_response.context_menu(|ui| {
                    order_actions(order, &mut interaction, ui);
                });
            }
        }

        if response.clicked() && !consumed_click {
            if let Some(pos) = response.interact_pointer_pos() {
                let row = ((pos.y - origin.y - HEADER_HEIGHT) / (ROW_HEIGHT + ROW_GAP)).floor();
                if row >= 0.0 {
                    let work_center = schedule.work_centers().get(row as usize);
                    let date = layout.mapper().x_to_date(pos.x - origin.x);
                    if let (Some(work_center), Some(date)) = (work_center, date) {
                        interaction.create_at = Some((work_center.id().to_string(), date));
                    }
                }
            }
        }
    });

    interaction
}

fn order_actions(order: &WorkOrder, interaction: &mut GridInteraction, ui: &mut Ui) {
    if ui.button(format!("{}  Edit", icons::PENCIL_SIMPLE)).clicked() {
        interaction.edit = Some(order.id().to_string());
        ui.close_menu();
    }
    if ui.button(format!("{}  Delete", icons::TRASH)).clicked() {
        interaction.delete = Some(order.id().to_string());
        ui.close_menu();
    }
}

fn row_top(origin: Pos2, index: usize) -> f32 {
    origin.y + HEADER_HEIGHT + index as f32 * (ROW_HEIGHT + ROW_GAP)
}

fn draw_header(painter: &egui::Painter, origin: Pos2, layout: &TimelineLayout, height: f32) {
    let width = layout.total_width_px() as f32;
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );

    let mut x = origin.x;
    for increment in layout.increments() {
        let w = increment.width_px as f32;
        let cell = Rect::from_min_size(Pos2::new(x, origin.y), Vec2::new(w, HEADER_HEIGHT));

        if increment.is_current {
            painter.rect_filled(
                Rect::from_min_max(cell.min, Pos2::new(cell.right(), origin.y + height)),
                0.0,
                theme::BG_CURRENT,
            );
        }

        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let color = if increment.is_current {
            theme::ACCENT
        } else {
            theme::TEXT_SECONDARY
        };
        painter.with_clip_rect(cell).text(
            Pos2::new(x + 5.0, origin.y + HEADER_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            &increment.label,
            theme::font_header(),
            color,
        );

        x += w;
    }

    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, layout: &TimelineLayout, height: f32) {
    let x = origin.x + layout.today_offset_px() as f32;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_order_bar(
    painter: &egui::Painter,
    origin: Pos2,
    span: Span,
    order: &WorkOrder,
    y: f32,
    is_selected: bool,
) -> Rect {
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + span.offset_px as f32, y + inset),
        Vec2::new((span.width_px as f32).max(4.0), ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, theme::status_color(order.data.status));

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(
            order.data.name.clone(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let text_rect = Rect::from_min_max(
            bar_rect.min,
            Pos2::new(bar_rect.right() - MENU_BUTTON_WIDTH, bar_rect.bottom()),
        );
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(text_rect).galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

use egui::{Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

use crate::model::Schedule;
use crate::ui::theme;

/// Render the left-side list of work centers, one per timeline row.
pub fn show_work_center_panel(schedule: &Schedule, ui: &mut Ui) {
    // Rows must line up with the timeline rows.
    ui.spacing_mut().item_spacing.y = 0.0;
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, theme::HEADER_HEIGHT), Sense::hover());
    ui.painter().text(
        Pos2::new(rect.left() + 12.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        "Work Center",
        theme::font_header(),
        theme::TEXT_DIM,
    );

    for (i, work_center) in schedule.work_centers().iter().enumerate() {
        let (row, _) = ui.allocate_exact_size(
            Vec2::new(width, theme::ROW_HEIGHT + theme::ROW_GAP),
            Sense::hover(),
        );
        let painter = ui.painter();
        if i % 2 == 0 {
            painter.rect_filled(
                Rect::from_min_size(row.min, Vec2::new(width, theme::ROW_HEIGHT)),
                0.0,
                theme::BG_DARK,
            );
        }
        painter.line_segment(
            [
                Pos2::new(row.left(), row.bottom() - theme::ROW_GAP / 2.0),
                Pos2::new(row.right(), row.bottom() - theme::ROW_GAP / 2.0),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        let count = schedule.orders_for(work_center.id()).count();
        painter.text(
            Pos2::new(row.left() + 12.0, row.top() + theme::ROW_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            work_center.name(),
            theme::font_bar(),
            theme::TEXT_PRIMARY,
        );
        painter.text(
            Pos2::new(row.right() - 10.0, row.top() + theme::ROW_HEIGHT / 2.0),
            egui::Align2::RIGHT_CENTER,
            count.to_string(),
            theme::font_small(),
            theme::TEXT_DIM,
        );
    }

    ui.add_space(8.0);
    ui.label(
        RichText::new("Click an empty row to schedule an order")
            .size(10.0)
            .color(theme::TEXT_DIM),
    );
}

use chrono::NaiveDate;

use super::position::PositionMapper;

/// Desired horizontal scroll offset of the timeline viewport.
///
/// Not clamped: values below zero or past the content width are passed
/// through for the scroll area to clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub left_px: f32,
}

/// Pixel offset of the "today" line.
pub fn today_offset(mapper: &PositionMapper, today: NaiveDate) -> i64 {
    mapper.date_to_x(today)
}

/// Scroll offset that puts `indicator_offset_px` in the middle of the viewport.
pub fn center_on(indicator_offset_px: i64, viewport_width_px: f32) -> ScrollTarget {
    ScrollTarget {
        left_px: indicator_offset_px as f32 - viewport_width_px / 2.0,
    }
}

/// The device's current calendar date, no timezone normalization.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

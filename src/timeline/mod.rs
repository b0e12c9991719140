//! Timeline layout and scale engine.
//!
//! Everything here is a pure function of the bounds, the scale table, the
//! granularity the caller passes in, and a calendar date.

pub mod partition;
pub mod position;
pub mod scale;
pub mod viewport;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::model::WorkOrder;

pub use partition::{Increment, Partitioner, WeekNumbering};
pub use position::{
    days_between, parse_calendar_date, Position, PositionMapper, Span, TimelineBounds,
    DATE_FORMAT,
};
pub use scale::{Granularity, ScaleTable};
pub use viewport::{center_on, local_today, today_offset, ScrollTarget};

/// Fixed configuration of the timeline.
#[derive(Debug, Clone, Copy)]
pub struct TimelineEngine {
    bounds: TimelineBounds,
    scale: ScaleTable,
    week_numbering: WeekNumbering,
}

impl TimelineEngine {
    pub fn new(bounds: TimelineBounds, scale: ScaleTable, week_numbering: WeekNumbering) -> Self {
        Self {
            bounds,
            scale,
            week_numbering,
        }
    }

    pub fn mapper(&self, granularity: Granularity) -> PositionMapper {
        PositionMapper::new(&self.bounds, &self.scale, granularity)
    }

    /// Run one full recomputation pass for `granularity`.
    ///
    /// Header, scale and today offset all derive from the single granularity
    /// value read here.
    pub fn layout(&self, granularity: Granularity, today: NaiveDate) -> TimelineLayout {
        let mapper = self.mapper(granularity);
        let increments = Partitioner::new(self.bounds, self.scale, self.week_numbering)
            .partition(granularity, today);
        let total_width_px = increments.iter().map(|i| i.width_px).sum();
        let today_offset_px = today_offset(&mapper, today);

        debug!(
            granularity = granularity.id(),
            increments = increments.len(),
            today_offset_px,
            "recomputed timeline layout"
        );

        TimelineLayout {
            granularity,
            mapper,
            increments,
            total_width_px,
            today_offset_px,
        }
    }
}

impl Default for TimelineEngine {
    fn default() -> Self {
        Self::new(
            TimelineBounds::reference(),
            ScaleTable::default(),
            WeekNumbering::default(),
        )
    }
}

/// Result of one recomputation pass.
#[derive(Debug, Clone)]
pub struct TimelineLayout {
    granularity: Granularity,
    mapper: PositionMapper,
    increments: Vec<Increment>,
    total_width_px: u64,
    today_offset_px: i64,
}

impl TimelineLayout {
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn pixels_per_day(&self) -> i64 {
        self.mapper.pixels_per_day()
    }

    pub fn increments(&self) -> &[Increment] {
        &self.increments
    }

    /// Sum of all increment widths.
    pub fn total_width_px(&self) -> u64 {
        self.total_width_px
    }

    pub fn today_offset_px(&self) -> i64 {
        self.today_offset_px
    }

    pub fn mapper(&self) -> &PositionMapper {
        &self.mapper
    }

    /// Bar placement for a work order under this layout's scale.
    pub fn place(&self, order: &WorkOrder) -> Result<Span> {
        self.mapper.place(order)
    }

    /// Scroll offset centering the today line in a viewport of the given width.
    pub fn scroll_target(&self, viewport_width_px: f32) -> ScrollTarget {
        center_on(self.today_offset_px, viewport_width_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_layout_is_consistent_with_granularity() {
        let engine = TimelineEngine::default();
        let today = date(2026, 1, 5);
        for g in Granularity::ALL {
            let layout = engine.layout(g, today);
            assert_eq!(layout.granularity(), g);
            assert_eq!(
                layout.pixels_per_day(),
                i64::from(ScaleTable::default().pixels_per_day(g))
            );
            assert_eq!(layout.today_offset_px(), 369 * layout.pixels_per_day());
        }
    }

    #[test]
    fn test_month_layout_scroll_target() {
        let layout = TimelineEngine::default().layout(Granularity::Month, date(2026, 1, 5));
        assert_eq!(layout.total_width_px(), 1095 * 3);
        assert_eq!(layout.scroll_target(1000.0).left_px, 607.0);
    }

    #[test]
    fn test_switch_and_back_reproduces_layout() {
        let engine = TimelineEngine::default();
        let today = date(2026, 10, 16);
        let week = engine.layout(Granularity::Week, today);
        let day = engine.layout(Granularity::Day, today);
        let week_again = engine.layout(Granularity::Week, today);
        assert_eq!(week.increments(), week_again.increments());
        assert_eq!(week.today_offset_px(), week_again.today_offset_px());
        assert_ne!(week.today_offset_px(), day.today_offset_px());
    }

    #[test]
    fn test_layout_places_orders() {
        let layout = TimelineEngine::default().layout(Granularity::Month, date(2026, 10, 16));
        let order = WorkOrder::new(
            "wo_x",
            "Broken",
            "wc_1",
            crate::model::WorkOrderStatus::Open,
            "2026-01-05",
            "15/04/2026",
        );
        assert!(layout.place(&order).is_err());
    }
}

use chrono::NaiveDate;

use crate::error::{Result, SchedulerError};
use crate::model::WorkOrder;

use super::scale::{Granularity, ScaleTable};

/// Canonical storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const REFERENCE_START: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 1) {
    Some(d) => d,
    None => panic!("invalid reference start date"),
};
const REFERENCE_END: NaiveDate = match NaiveDate::from_ymd_opt(2027, 12, 31) {
    Some(d) => d,
    None => panic!("invalid reference end date"),
};

/// The fixed calendar interval the timeline spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimelineBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl Default for TimelineBounds {
    fn default() -> Self {
        Self::reference()
    }
}

impl TimelineBounds {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SchedulerError::InvalidBounds { start, end });
        }
        Ok(Self { start, end })
    }

    /// Three calendar years, 2025-01-01 through 2027-12-31.
    pub const fn reference() -> Self {
        Self {
            start: REFERENCE_START,
            end: REFERENCE_END,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn total_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }
}

/// Parse a `YYYY-MM-DD` wall-clock date. No timezone is applied.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| {
        SchedulerError::InvalidDateFormat {
            value: value.to_string(),
            source,
        }
    })
}

/// Calendar-day difference `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Horizontal placement of a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset_px: i64,
}

/// Horizontal placement of a date range, e.g. a work-order bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset_px: i64,
    pub width_px: i64,
}

/// Maps calendar dates to pixel offsets from the timeline start.
///
/// Dates outside the bounds are not rejected; their offsets extrapolate
/// linearly (negative before the start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionMapper {
    origin: NaiveDate,
    pixels_per_day: i64,
}

impl PositionMapper {
    pub fn new(bounds: &TimelineBounds, scale: &ScaleTable, granularity: Granularity) -> Self {
        Self {
            origin: bounds.start(),
            pixels_per_day: i64::from(scale.pixels_per_day(granularity)),
        }
    }

    pub fn pixels_per_day(&self) -> i64 {
        self.pixels_per_day
    }

    /// Convert a date to an x-pixel offset from the timeline start.
    pub fn date_to_x(&self, date: NaiveDate) -> i64 {
        days_between(self.origin, date) * self.pixels_per_day
    }

    /// Convert an x-pixel offset back to the date whose day contains it.
    ///
    /// `None` for non-finite offsets and for dates chrono cannot represent.
    pub fn x_to_date(&self, x: f32) -> Option<NaiveDate> {
        if !x.is_finite() {
            return None;
        }
        let days = (f64::from(x) / self.pixels_per_day as f64).floor() as i64;
        self.origin.checked_add_signed(chrono::Duration::try_days(days)?)
    }

    /// Width of an inclusive date range. A single day is one day wide.
    ///
    /// `end < start` is not validated and yields a zero or negative width.
    pub fn range_width(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        (days_between(start, end) + 1) * self.pixels_per_day
    }

    pub fn position_of(&self, date: &str) -> Result<Position> {
        let date = parse_calendar_date(date)?;
        Ok(Position {
            offset_px: self.date_to_x(date),
        })
    }

    pub fn width_of(&self, start: &str, end: &str) -> Result<i64> {
        let start = parse_calendar_date(start)?;
        let end = parse_calendar_date(end)?;
        Ok(self.range_width(start, end))
    }

    pub fn span_of(&self, start: &str, end: &str) -> Result<Span> {
        let start_date = parse_calendar_date(start)?;
        let end_date = parse_calendar_date(end)?;
        Ok(Span {
            offset_px: self.date_to_x(start_date),
            width_px: self.range_width(start_date, end_date),
        })
    }

    /// Bar placement for a work order.
    pub fn place(&self, order: &WorkOrder) -> Result<Span> {
        self.span_of(&order.data.start_date, &order.data.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mapper(granularity: Granularity) -> PositionMapper {
        PositionMapper::new(&TimelineBounds::reference(), &ScaleTable::default(), granularity)
    }

    #[test]
    fn test_reference_bounds() {
        let bounds = TimelineBounds::reference();
        assert_eq!(bounds.start(), date(2025, 1, 1));
        assert_eq!(bounds.end(), date(2027, 12, 31));
        assert_eq!(bounds.total_days(), 1095);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = TimelineBounds::new(date(2026, 1, 2), date(2026, 1, 1)).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidBounds { .. }));
        assert!(TimelineBounds::new(date(2026, 1, 1), date(2026, 1, 1)).is_ok());
    }

    #[test]
    fn test_start_maps_to_zero_for_every_granularity() {
        for g in Granularity::ALL {
            assert_eq!(mapper(g).position_of("2025-01-01").unwrap().offset_px, 0);
        }
    }

    #[test]
    fn test_position_in_month_scale() {
        let pos = mapper(Granularity::Month).position_of("2026-01-05").unwrap();
        assert_eq!(pos.offset_px, 1107);
    }

    #[test]
    fn test_width_in_month_scale() {
        let width = mapper(Granularity::Month)
            .width_of("2026-01-05", "2026-04-15")
            .unwrap();
        assert_eq!(width, 303);
    }

    #[test]
    fn test_single_day_is_one_day_wide() {
        for g in Granularity::ALL {
            let m = mapper(g);
            assert_eq!(m.width_of("2026-03-10", "2026-03-10").unwrap(), m.pixels_per_day());
        }
    }

    #[test]
    fn test_out_of_bounds_extrapolates() {
        let m = mapper(Granularity::Day);
        assert_eq!(m.position_of("2024-12-31").unwrap().offset_px, -90);
        assert_eq!(m.position_of("2028-01-01").unwrap().offset_px, 1095 * 90);
    }

    #[test]
    fn test_inverted_range_does_not_fail() {
        let m = mapper(Granularity::Week);
        assert_eq!(m.width_of("2026-03-10", "2026-03-09").unwrap(), 0);
        assert_eq!(m.width_of("2026-03-10", "2026-03-01").unwrap(), -8 * 16);
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let m = mapper(Granularity::Month);
        for bad in ["", "2026/01/05", "2026-02-30", "yesterday", "2026-01-05T10:00:00"] {
            let err = m.position_of(bad).unwrap_err();
            assert!(
                matches!(err, SchedulerError::InvalidDateFormat { ref value, .. } if value == bad),
                "expected InvalidDateFormat for {bad:?}"
            );
        }
        assert!(m.width_of("2026-01-05", "nope").is_err());
    }

    #[test]
    fn test_leap_day_counts_as_calendar_day() {
        let m = mapper(Granularity::Day);
        let before = m.position_of("2028-02-28").unwrap().offset_px;
        let leap = m.position_of("2028-02-29").unwrap().offset_px;
        assert_eq!(leap - before, 90);
    }

    #[test]
    fn test_switching_scale_and_back_restores_positions() {
        let month = mapper(Granularity::Month).position_of("2026-07-19").unwrap();
        let _day = mapper(Granularity::Day).position_of("2026-07-19").unwrap();
        let month_again = mapper(Granularity::Month).position_of("2026-07-19").unwrap();
        assert_eq!(month, month_again);
    }

    #[test]
    fn test_x_to_date() {
        let m = mapper(Granularity::Day);
        assert_eq!(m.x_to_date(0.0), Some(date(2025, 1, 1)));
        assert_eq!(m.x_to_date(89.9), Some(date(2025, 1, 1)));
        assert_eq!(m.x_to_date(90.0), Some(date(2025, 1, 2)));
        assert_eq!(m.x_to_date(-1.0), Some(date(2024, 12, 31)));
        let month = mapper(Granularity::Month);
        assert_eq!(month.x_to_date(1107.0), Some(date(2026, 1, 5)));
    }

    #[test]
    fn test_x_to_date_rejects_unrepresentable_offsets() {
        let m = mapper(Granularity::Month);
        assert_eq!(m.x_to_date(f32::NAN), None);
        assert_eq!(m.x_to_date(f32::INFINITY), None);
        assert_eq!(m.x_to_date(f32::NEG_INFINITY), None);
        assert_eq!(m.x_to_date(f32::MAX), None);
    }

    #[test]
    fn test_place_work_order() {
        let order = WorkOrder::new(
            "wo_1",
            "Bicycle World",
            "wc_1",
            crate::model::WorkOrderStatus::Complete,
            "2026-01-05",
            "2026-04-15",
        );
        let span = mapper(Granularity::Month).place(&order).unwrap();
        assert_eq!(span, Span { offset_px: 1107, width_px: 303 });
    }

    proptest! {
        #[test]
        fn prop_offsets_are_linear_in_days(days in -2000i64..4000, ppd in 1u32..200) {
            let scale = ScaleTable::new(ppd, ppd, ppd).unwrap();
            let bounds = TimelineBounds::reference();
            let m = PositionMapper::new(&bounds, &scale, Granularity::Week);
            let d = bounds.start() + chrono::Duration::days(days);
            prop_assert_eq!(m.date_to_x(d), days * i64::from(ppd));
            prop_assert_eq!(m.range_width(d, d), i64::from(ppd));
        }
    }
}

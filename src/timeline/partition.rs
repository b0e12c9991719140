use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::position::{days_between, TimelineBounds};
use super::scale::{Granularity, ScaleTable};

/// Week-start and week-number convention for the week header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekNumbering {
    /// Weeks start on Sunday; week 1 is the week containing January 1.
    #[default]
    Locale,
    /// ISO-8601: weeks start on Monday, week 1 contains the first Thursday.
    Iso,
}

impl WeekNumbering {
    /// First day of the week containing `date`.
    pub fn week_start(self, date: NaiveDate) -> NaiveDate {
        let back = match self {
            WeekNumbering::Locale => date.weekday().num_days_from_sunday(),
            WeekNumbering::Iso => date.weekday().num_days_from_monday(),
        };
        date - chrono::Duration::days(i64::from(back))
    }

    pub fn week_number(self, date: NaiveDate) -> u32 {
        match self {
            WeekNumbering::Locale => {
                // The week belongs to the year its Saturday falls in.
                let saturday = self.week_start(date) + chrono::Duration::days(6);
                saturday.ordinal0() / 7 + 1
            }
            WeekNumbering::Iso => date.iso_week().week(),
        }
    }
}

/// One labeled bucket of the timeline header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Increment {
    pub label: String,
    pub width_px: u64,
    /// Whether this bucket's label matches the reference date's label.
    pub is_current: bool,
}

/// Splits the timeline bounds into header increments.
#[derive(Debug, Clone, Copy)]
pub struct Partitioner {
    bounds: TimelineBounds,
    scale: ScaleTable,
    week_numbering: WeekNumbering,
}

impl Partitioner {
    pub fn new(bounds: TimelineBounds, scale: ScaleTable, week_numbering: WeekNumbering) -> Self {
        Self {
            bounds,
            scale,
            week_numbering,
        }
    }

    /// Ordered increments for `granularity`, flagging those whose label equals
    /// the label of `reference`.
    ///
    /// Matching is by label text, not date containment: Day and Week labels
    /// carry no year, so the same label in another year is flagged too.
    pub fn partition(&self, granularity: Granularity, reference: NaiveDate) -> Vec<Increment> {
        let ppd = u64::from(self.scale.pixels_per_day(granularity));
        let end = self.bounds.end();

        match granularity {
            Granularity::Month => {
                let current = month_label(reference);
                month_starts(self.bounds)
                    .map(|first| {
                        let label = month_label(first);
                        Increment {
                            is_current: label == current,
                            width_px: days_in_month(first) * ppd,
                            label,
                        }
                    })
                    .collect()
            }
            Granularity::Week => {
                let current = self.week_label(reference);
                self.week_numbering
                    .week_start(self.bounds.start())
                    .iter_weeks()
                    .take_while(|week| *week <= end)
                    .map(|week| {
                        let label = self.week_label(week);
                        Increment {
                            is_current: label == current,
                            width_px: 7 * ppd,
                            label,
                        }
                    })
                    .collect()
            }
            Granularity::Day => {
                let current = day_label(reference);
                self.bounds
                    .start()
                    .iter_days()
                    .take_while(|day| *day <= end)
                    .map(|day| {
                        let label = day_label(day);
                        Increment {
                            is_current: label == current,
                            width_px: ppd,
                            label,
                        }
                    })
                    .collect()
            }
        }
    }

    fn week_label(&self, date: NaiveDate) -> String {
        format!(
            "Week {} ({})",
            self.week_numbering.week_number(date),
            date.format("%b")
        )
    }
}

fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

fn day_label(date: NaiveDate) -> String {
    date.format("%a, %d %b").to_string()
}

/// First day of every month touched by the bounds.
fn month_starts(bounds: TimelineBounds) -> impl Iterator<Item = NaiveDate> {
    let end = bounds.end();
    std::iter::successors(bounds.start().with_day(1), |first| {
        first.checked_add_months(Months::new(1))
    })
    .take_while(move |first| *first <= end)
}

fn days_in_month(first: NaiveDate) -> u64 {
    let days = match first.checked_add_months(Months::new(1)) {
        Some(next) => days_between(first, next),
        None => days_between(first, NaiveDate::MAX) + 1,
    };
    days.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn partitioner() -> Partitioner {
        Partitioner::new(
            TimelineBounds::reference(),
            ScaleTable::default(),
            WeekNumbering::Locale,
        )
    }

    fn total_width(increments: &[Increment]) -> u64 {
        increments.iter().map(|i| i.width_px).sum()
    }

    #[test]
    fn test_month_partition_of_reference_bounds() {
        let months = partitioner().partition(Granularity::Month, date(2026, 10, 16));
        assert_eq!(months.len(), 36);
        assert_eq!(months[0].label, "Jan 2025");
        assert_eq!(months[0].width_px, 93);
        assert_eq!(months[1].label, "Feb 2025");
        assert_eq!(months[1].width_px, 28 * 3);
        assert_eq!(months[35].label, "Dec 2027");
        assert_eq!(total_width(&months), 1095 * 3);
    }

    #[test]
    fn test_month_current_flag() {
        let months = partitioner().partition(Granularity::Month, date(2026, 10, 16));
        let current: Vec<_> = months.iter().filter(|m| m.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].label, "Oct 2026");
    }

    #[test]
    fn test_month_partition_includes_month_of_mid_month_start() {
        let bounds = TimelineBounds::new(date(2026, 1, 15), date(2026, 3, 2)).unwrap();
        let p = Partitioner::new(bounds, ScaleTable::default(), WeekNumbering::Locale);
        let labels: Vec<_> = p
            .partition(Granularity::Month, date(2026, 1, 1))
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, ["Jan 2026", "Feb 2026", "Mar 2026"]);
    }

    #[test]
    fn test_reference_outside_bounds_flags_nothing_in_month_mode() {
        let months = partitioner().partition(Granularity::Month, date(2030, 5, 1));
        assert!(months.iter().all(|m| !m.is_current));
    }

    #[test]
    fn test_day_partition() {
        let days = partitioner().partition(Granularity::Day, date(2026, 1, 5));
        assert_eq!(days.len(), 1095);
        assert_eq!(days[0].label, "Wed, 01 Jan");
        assert!(days.iter().all(|d| d.width_px == 90));
        assert_eq!(total_width(&days), 1095 * 90);
    }

    #[test]
    fn test_day_current_flag() {
        let days = partitioner().partition(Granularity::Day, date(2026, 1, 5));
        let current: Vec<_> = days.iter().filter(|d| d.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].label, "Mon, 05 Jan");
    }

    #[test]
    fn test_day_label_repeats_are_all_flagged() {
        // 2025-01-05 and 2031-01-05 are both Sundays.
        let bounds = TimelineBounds::new(date(2025, 1, 1), date(2031, 12, 31)).unwrap();
        let p = Partitioner::new(bounds, ScaleTable::default(), WeekNumbering::Locale);
        let days = p.partition(Granularity::Day, date(2025, 1, 5));
        let flagged = days.iter().filter(|d| d.is_current).count();
        assert_eq!(flagged, 2);
    }

    #[test]
    fn test_week_partition_locale() {
        let weeks = partitioner().partition(Granularity::Week, date(2026, 10, 16));
        // 2024-12-29 (Sunday) through 2027-12-26
        assert_eq!(weeks.len(), 157);
        assert_eq!(weeks[0].label, "Week 1 (Dec)");
        assert_eq!(weeks[1].label, "Week 2 (Jan)");
        assert!(weeks.iter().all(|w| w.width_px == 7 * 16));
        assert_eq!(total_width(&weeks), 157 * 7 * 16);
        assert!(total_width(&weeks) >= 1095 * 16);
    }

    #[test]
    fn test_week_current_flag_uses_reference_label() {
        // 2026-10-16 is a Friday; its week starts Sunday 2026-10-11.
        let weeks = partitioner().partition(Granularity::Week, date(2026, 10, 16));
        let current: Vec<_> = weeks.iter().filter(|w| w.is_current).map(|w| &w.label).collect();
        // Week 42 starts in October in 2025, 2026 and 2027 alike.
        assert_eq!(current, ["Week 42 (Oct)"; 3]);
    }

    #[test]
    fn test_week_label_mismatch_when_week_spans_months() {
        // Wednesday 2026-04-01 sits in the week starting Sunday 2026-03-29,
        // so its label "Week 14 (Apr)" never equals a week-start label.
        let weeks = partitioner().partition(Granularity::Week, date(2026, 4, 1));
        assert!(weeks.iter().all(|w| !w.is_current));
    }

    #[test]
    fn test_locale_week_numbers() {
        let n = WeekNumbering::Locale;
        assert_eq!(n.week_start(date(2025, 1, 1)), date(2024, 12, 29));
        assert_eq!(n.week_number(date(2025, 1, 1)), 1);
        assert_eq!(n.week_number(date(2025, 1, 5)), 2);
        assert_eq!(n.week_number(date(2025, 12, 28)), 1);
        assert_eq!(n.week_number(date(2026, 10, 11)), 42);
    }

    #[test]
    fn test_iso_week_partition() {
        let p = Partitioner::new(
            TimelineBounds::reference(),
            ScaleTable::default(),
            WeekNumbering::Iso,
        );
        let weeks = p.partition(Granularity::Week, date(2026, 10, 16));
        // Monday 2024-12-30 is ISO week 1 of 2025
        assert_eq!(weeks[0].label, "Week 1 (Dec)");
        assert_eq!(WeekNumbering::Iso.week_start(date(2026, 10, 16)), date(2026, 10, 12));
        let current: Vec<_> = weeks.iter().filter(|w| w.is_current).map(|w| &w.label).collect();
        assert_eq!(current, ["Week 42 (Oct)"; 3]);
    }

    #[test]
    fn test_week_day_week_reproduces_sequence() {
        let p = partitioner();
        let today = date(2026, 10, 16);
        let first = p.partition(Granularity::Week, today);
        let _days = p.partition(Granularity::Day, today);
        let again = p.partition(Granularity::Week, today);
        assert_eq!(first, again);
    }

    #[test]
    fn test_single_day_bounds() {
        let bounds = TimelineBounds::new(date(2026, 2, 14), date(2026, 2, 14)).unwrap();
        let p = Partitioner::new(bounds, ScaleTable::default(), WeekNumbering::Locale);
        assert_eq!(p.partition(Granularity::Day, date(2026, 2, 14)).len(), 1);
        assert_eq!(p.partition(Granularity::Week, date(2026, 2, 14)).len(), 1);
        let months = p.partition(Granularity::Month, date(2026, 2, 14));
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].width_px, 28 * 3);
    }

    #[test]
    fn test_huge_scale_does_not_overflow_widths() {
        let scale = ScaleTable::new(u32::MAX, u32::MAX, u32::MAX).unwrap();
        let p = Partitioner::new(TimelineBounds::reference(), scale, WeekNumbering::Locale);
        let ppd = u64::from(u32::MAX);

        let months = p.partition(Granularity::Month, date(2026, 10, 16));
        assert_eq!(months[0].width_px, 31 * ppd);
        assert_eq!(total_width(&months), 1095 * ppd);

        let weeks = p.partition(Granularity::Week, date(2026, 10, 16));
        assert!(weeks.iter().all(|w| w.width_px == 7 * ppd));
    }

    fn arb_bounds() -> impl Strategy<Value = TimelineBounds> {
        (0i64..3000, 0i64..800).prop_map(|(offset, len)| {
            let start = date(2020, 1, 1) + chrono::Duration::days(offset);
            TimelineBounds::new(start, start + chrono::Duration::days(len)).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_day_partition_covers_every_day(bounds in arb_bounds()) {
            let p = Partitioner::new(bounds, ScaleTable::default(), WeekNumbering::Locale);
            let days = p.partition(Granularity::Day, bounds.start());
            prop_assert_eq!(total_width(&days), bounds.total_days() as u64 * 90);
        }

        #[test]
        fn prop_month_partition_is_disjoint_cover(bounds in arb_bounds()) {
            let p = Partitioner::new(bounds, ScaleTable::default(), WeekNumbering::Locale);
            let months = p.partition(Granularity::Month, bounds.start());
            let first = bounds.start().with_day(1).unwrap();
            let last = bounds.end().with_day(1).unwrap().checked_add_months(Months::new(1)).unwrap();
            prop_assert_eq!(total_width(&months), days_between(first, last) as u64 * 3);
        }

        #[test]
        fn prop_week_partition_covers_bounds(bounds in arb_bounds()) {
            for numbering in [WeekNumbering::Locale, WeekNumbering::Iso] {
                let p = Partitioner::new(bounds, ScaleTable::default(), numbering);
                let weeks = p.partition(Granularity::Week, bounds.start());
                let covered = weeks.len() as i64 * 7;
                let lead = days_between(numbering.week_start(bounds.start()), bounds.start());
                prop_assert!(covered >= bounds.total_days() + lead);
                prop_assert!(covered < bounds.total_days() + lead + 7);
            }
        }

        #[test]
        fn prop_partition_is_idempotent(bounds in arb_bounds(), reference_offset in 0i64..1000) {
            let p = Partitioner::new(bounds, ScaleTable::default(), WeekNumbering::Locale);
            let reference = bounds.start() + chrono::Duration::days(reference_offset);
            for g in Granularity::ALL {
                prop_assert_eq!(p.partition(g, reference), p.partition(g, reference));
            }
        }
    }
}

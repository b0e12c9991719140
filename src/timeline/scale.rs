use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Controls the temporal detail the timeline displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    /// Interpret a selection value coming from the toolbar.
    ///
    /// Empty or unknown values yield `None`; callers keep their current
    /// granularity in that case.
    pub fn from_selection(value: Option<&str>) -> Option<Self> {
        match value?.trim().to_lowercase().as_str() {
            "day" => Some(Granularity::Day),
            "week" => Some(Granularity::Week),
            "month" => Some(Granularity::Month),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Day => "Day",
            Granularity::Week => "Week",
            Granularity::Month => "Month",
        }
    }
}

/// Pixels-per-day for each granularity.
///
/// Finer granularities need a wider day so a single-day bucket stays legible;
/// coarse ones need a narrow day so the whole range fits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleTable {
    day: u32,
    week: u32,
    month: u32,
}

impl Default for ScaleTable {
    fn default() -> Self {
        Self {
            day: 90,
            week: 16,
            month: 3,
        }
    }
}

impl ScaleTable {
    pub fn new(day: u32, week: u32, month: u32) -> Result<Self> {
        Self { day, week, month }.validated()
    }

    /// Reject zero entries (e.g. from a hand-edited settings file).
    pub fn validated(self) -> Result<Self> {
        for granularity in Granularity::ALL {
            if self.pixels_per_day(granularity) == 0 {
                return Err(SchedulerError::InvalidScale { granularity });
            }
        }
        Ok(self)
    }

    pub fn pixels_per_day(&self, granularity: Granularity) -> u32 {
        match granularity {
            Granularity::Day => self.day,
            Granularity::Week => self.week,
            Granularity::Month => self.month,
        }
    }
}

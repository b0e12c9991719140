//! Persisted user settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SchedulerError};
use crate::timeline::{Granularity, ScaleTable, TimelineBounds, TimelineEngine, WeekNumbering};

const SETTINGS_FILE: &str = "settings.json";
const ORDERS_FILE: &str = "work_orders.json";

/// Persisted user settings (lives in the OS config directory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Granularity selected when the app last ran.
    pub granularity: Granularity,
    pub week_numbering: WeekNumbering,
    pub scale: ScaleTable,
    /// Overrides the default work-order storage location.
    pub data_file: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            week_numbering: WeekNumbering::Locale,
            scale: ScaleTable::default(),
            data_file: None,
        }
    }
}

impl AppSettings {
    /// Load settings from `path`. A missing or unreadable file yields the
    /// defaults; an invalid scale table is replaced by the default one.
    pub fn load(path: &Path) -> Self {
        let mut settings: Self = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        if let Err(e) = settings.scale.validated() {
            warn!(error = %e, "falling back to default scale");
            settings.scale = ScaleTable::default();
        }
        settings
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SchedulerError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| SchedulerError::json(path, e))?;
        std::fs::write(path, json).map_err(|e| SchedulerError::io(path, e))?;
        info!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Where work orders are stored.
    pub fn orders_path(&self, config_dir: &Path) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| config_dir.join(ORDERS_FILE))
    }

    pub fn engine(&self) -> TimelineEngine {
        TimelineEngine::new(TimelineBounds::reference(), self.scale, self.week_numbering)
    }
}

/// OS config directory for the app, falling back to the working directory.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "WorkOrderScheduler")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE)
}

use std::path::Path;

use tracing::info;

use crate::error::{Result, SchedulerError};
use crate::model::WorkOrder;

/// Save work orders to a JSON file, creating parent directories as needed.
pub fn save_orders(orders: &[WorkOrder], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SchedulerError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(orders).map_err(|e| SchedulerError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| SchedulerError::io(path, e))?;
    info!(path = %path.display(), count = orders.len(), "saved work orders");
    Ok(())
}

/// Load work orders from a JSON file. `Ok(None)` when the file does not exist.
pub fn load_orders(path: &Path) -> Result<Option<Vec<WorkOrder>>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SchedulerError::io(path, e)),
    };
    let orders: Vec<WorkOrder> =
        serde_json::from_str(&json).map_err(|e| SchedulerError::json(path, e))?;
    info!(path = %path.display(), count = orders.len(), "loaded work orders");
    Ok(Some(orders))
}

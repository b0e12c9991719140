use std::path::PathBuf;

use tracing::{debug, info};
use uuid::Uuid;

use super::work_order::{WorkCenter, WorkOrder, WorkOrderStatus};
use crate::error::{Result, SchedulerError};
use crate::timeline::parse_calendar_date;

/// Work centers and their work orders, in insertion order.
///
/// Every mutation writes the order list to the attached data file, if any,
/// before it takes effect, then bumps `revision`.
#[derive(Debug, Clone)]
pub struct Schedule {
    work_centers: Vec<WorkCenter>,
    work_orders: Vec<WorkOrder>,
    revision: u64,
    data_file: Option<PathBuf>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(default_work_centers(), default_work_orders())
    }
}

impl Schedule {
    pub fn new(work_centers: Vec<WorkCenter>, work_orders: Vec<WorkOrder>) -> Self {
        Self {
            work_centers,
            work_orders,
            revision: 0,
            data_file: None,
        }
    }

    /// Load orders from `path`, seeding the defaults when the file does not
    /// exist yet. Subsequent mutations are saved to `path`.
    pub fn open(path: PathBuf) -> Result<Self> {
        let orders = match crate::io::load_orders(&path)? {
            Some(orders) => orders,
            None => {
                info!(path = %path.display(), "no stored work orders, using defaults");
                default_work_orders()
            }
        };
        let mut schedule = Self::new(default_work_centers(), orders);
        schedule.data_file = Some(path);
        Ok(schedule)
    }

    #[cfg(test)]
    pub(crate) fn with_data_file(mut self, path: PathBuf) -> Self {
        self.data_file = Some(path);
        self
    }

    pub fn work_centers(&self) -> &[WorkCenter] {
        &self.work_centers
    }

    pub fn work_orders(&self) -> &[WorkOrder] {
        &self.work_orders
    }

    /// Changes on every mutation; lets views detect stale snapshots.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn work_center(&self, id: &str) -> Option<&WorkCenter> {
        self.work_centers.iter().find(|wc| wc.id() == id)
    }

    pub fn find_order(&self, id: &str) -> Option<&WorkOrder> {
        self.work_orders.iter().find(|o| o.id() == id)
    }

    pub fn orders_for<'a>(&'a self, work_center_id: &'a str) -> impl Iterator<Item = &'a WorkOrder> {
        self.work_orders
            .iter()
            .filter(move |o| o.data.work_center_id == work_center_id)
    }

    /// Fresh unique id for a new work order.
    pub fn next_order_id() -> String {
        format!("wo_{}", Uuid::new_v4().simple())
    }

    /// Check an order before it is added or saved.
    pub fn validate_order(&self, order: &WorkOrder) -> Result<()> {
        if order.data.name.trim().is_empty() {
            return Err(SchedulerError::Validation("Name is required".to_string()));
        }
        if self.work_center(&order.data.work_center_id).is_none() {
            return Err(SchedulerError::Validation(format!(
                "Unknown work center '{}'",
                order.data.work_center_id
            )));
        }
        let start = parse_calendar_date(&order.data.start_date)?;
        let end = parse_calendar_date(&order.data.end_date)?;
        if end < start {
            return Err(SchedulerError::Validation(
                "End date must not be before start date".to_string(),
            ));
        }
        Ok(())
    }

    pub fn add_order(&mut self, order: WorkOrder) -> Result<()> {
        debug!(id = order.id(), "adding work order");
        let mut orders = self.work_orders.clone();
        orders.push(order);
        self.commit(orders)
    }

    /// Replace the order with the same id. Returns `false` if none exists.
    pub fn update_order(&mut self, order: WorkOrder) -> Result<bool> {
        let Some(index) = self.work_orders.iter().position(|o| o.id() == order.id()) else {
            return Ok(false);
        };
        debug!(id = order.id(), "updating work order");
        let mut orders = self.work_orders.clone();
        orders[index] = order;
        self.commit(orders)?;
        Ok(true)
    }

    /// Remove the order with `id`. Returns `false` if none exists.
    pub fn delete_order(&mut self, id: &str) -> Result<bool> {
        if self.find_order(id).is_none() {
            return Ok(false);
        }
        let orders: Vec<WorkOrder> = self
            .work_orders
            .iter()
            .filter(|o| o.id() != id)
            .cloned()
            .collect();
        self.commit(orders)?;
        debug!(id, "deleted work order");
        Ok(true)
    }

    /// Persist `orders` and only then make them current. A failed save leaves
    /// the schedule and its revision untouched.
    fn commit(&mut self, orders: Vec<WorkOrder>) -> Result<()> {
        if let Some(path) = &self.data_file {
            crate::io::save_orders(&orders, path)?;
        }
        self.work_orders = orders;
        self.revision += 1;
        Ok(())
    }
}

pub fn default_work_centers() -> Vec<WorkCenter> {
    vec![
        WorkCenter::new("wc_1", "Funnel Distribution"),
        WorkCenter::new("wc_2", "Software Handling"),
        WorkCenter::new("wc_3", "Assembled Electronics"),
        WorkCenter::new("wc_4", "Awesome Hardware"),
        WorkCenter::new("wc_5", "Tims Manufacturing"),
    ]
}

pub fn default_work_orders() -> Vec<WorkOrder> {
    use WorkOrderStatus::*;
    [
        ("wo_1", "Bicycle World", "wc_1", Complete, "2026-01-05", "2026-04-15"),
        ("wo_2", "Handlebar Systems", "wc_2", InProgress, "2025-11-10", "2026-08-20"),
        ("wo_3", "Final Distribution", "wc_3", Complete, "2025-10-15", "2026-01-15"),
        ("wo_4", "Paint Inspection Ltd", "wc_4", Blocked, "2025-12-01", "2026-04-15"),
        ("wo_5", "Crate Builders", "wc_5", Open, "2026-02-01", "2026-08-30"),
        ("wo_6", "Hammond Assembly Inc", "wc_3", InProgress, "2026-01-18", "2026-05-15"),
        ("wo_7", "Metrics Measured", "wc_1", Open, "2026-06-01", "2026-11-01"),
        ("wo_8", "Chain Inc", "wc_3", Open, "2026-06-01", "2027-04-01"),
        ("wo_9", "Global Logistics Corp", "wc_2", Open, "2027-01-15", "2027-06-15"),
        ("wo_10", "Vertex Systems", "wc_4", InProgress, "2026-04-21", "2027-08-01"),
    ]
    .into_iter()
    .map(|(id, name, wc, status, start, end)| WorkOrder::new(id, name, wc, status, start, end))
    .collect()
}

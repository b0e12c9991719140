pub mod schedule;
pub mod work_order;

pub use schedule::Schedule;
pub use work_order::{WorkCenter, WorkOrder, WorkOrderStatus};

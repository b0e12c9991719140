use serde::{Deserialize, Serialize};

const WORK_CENTER_DOC_TYPE: &str = "workCenter";
const WORK_ORDER_DOC_TYPE: &str = "workOrder";

/// Lifecycle state of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    #[default]
    Open,
    InProgress,
    Complete,
    Blocked,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 4] = [
        WorkOrderStatus::Open,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Complete,
        WorkOrderStatus::Blocked,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "Open",
            WorkOrderStatus::InProgress => "In progress",
            WorkOrderStatus::Complete => "Complete",
            WorkOrderStatus::Blocked => "Blocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCenterData {
    pub name: String,
}

/// A production line that work orders are scheduled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkCenter {
    pub doc_id: String,
    pub doc_type: String,
    pub data: WorkCenterData,
}

impl WorkCenter {
    pub fn new(doc_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            doc_type: WORK_CENTER_DOC_TYPE.to_string(),
            data: WorkCenterData { name: name.into() },
        }
    }

    pub fn id(&self) -> &str {
        &self.doc_id
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderData {
    pub name: String,
    /// References `WorkCenter::doc_id`.
    pub work_center_id: String,
    pub status: WorkOrderStatus,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`, inclusive
    pub end_date: String,
}

/// A scheduled job on a work center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub doc_id: String,
    pub doc_type: String,
    pub data: WorkOrderData,
}

impl WorkOrder {
    pub fn new(
        doc_id: impl Into<String>,
        name: impl Into<String>,
        work_center_id: impl Into<String>,
        status: WorkOrderStatus,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            doc_type: WORK_ORDER_DOC_TYPE.to_string(),
            data: WorkOrderData {
                name: name.into(),
                work_center_id: work_center_id.into(),
                status,
                start_date: start_date.into(),
                end_date: end_date.into(),
            },
        }
    }

    /// Stable identity used to key bars across frames.
    pub fn id(&self) -> &str {
        &self.doc_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_order_json_shape() {
        let order = WorkOrder::new(
            "wo_2",
            "Handlebar Systems",
            "wc_2",
            WorkOrderStatus::InProgress,
            "2025-11-10",
            "2026-08-20",
        );
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["docId"], "wo_2");
        assert_eq!(value["docType"], "workOrder");
        assert_eq!(value["data"]["workCenterId"], "wc_2");
        assert_eq!(value["data"]["status"], "in-progress");
        assert_eq!(value["data"]["startDate"], "2025-11-10");
    }

    #[test]
    fn test_parse_stored_document() {
        let json = r#"{
            "docId": "wo_4", "docType": "workOrder",
            "data": { "name": "Paint Inspection Ltd", "workCenterId": "wc_4",
                      "status": "blocked", "startDate": "2025-12-01", "endDate": "2026-04-15" }
        }"#;
        let order: WorkOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id(), "wo_4");
        assert_eq!(order.data.status, WorkOrderStatus::Blocked);
    }
}

use chrono::NaiveDate;
use serde::Deserialize;

use batchdesk_batches::{Batch, BatchDetails, RosterDelta};
use batchdesk_core::{EmployeeId, Entity};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /batches` and `PUT /batches/:id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    #[serde(flatten)]
    pub details: BatchDetails,
    #[serde(default)]
    pub employee_ids: Vec<EmployeeId>,
}

/// One entry of an add-employees list: `{"employeeId": 7}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub employee_id: EmployeeId,
}

pub fn employee_ids(items: Vec<EmployeeDto>) -> Vec<EmployeeId> {
    items.into_iter().map(|e| e.employee_id).collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub batch_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndDateRequest {
    pub end_date: NaiveDate,
}

// -------------------------
// Response mapping
// -------------------------

pub fn batch_to_json(batch: &Batch) -> serde_json::Value {
    let details = batch.details();
    serde_json::json!({
        "batchId": batch.batch_id(),
        "batchName": details.name,
        "batchDescription": details.description,
        "startDate": details.start_date,
        "endDate": details.end_date,
        "batchSize": details.size,
        "employeeIds": batch.employee_ids(),
        "version": batch.version(),
    })
}

pub fn delta_to_json(delta: &RosterDelta) -> serde_json::Value {
    serde_json::json!({
        "added": delta.new_ids,
        "alreadyPresent": delta.already_present_ids,
    })
}

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use batchdesk_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::EmptyInput => json_error(StatusCode::BAD_REQUEST, "empty_file", message),
        DomainError::MalformedInput(_) => json_error(StatusCode::BAD_REQUEST, "malformed_file", message),
        DomainError::NoRecordsFound => json_error(StatusCode::BAD_REQUEST, "no_records", message),
        DomainError::EmptyCandidateList => {
            json_error(StatusCode::BAD_REQUEST, "empty_employee_list", message)
        }
        DomainError::AllDuplicates => json_error(StatusCode::CONFLICT, "duplicate_employees", message),
        DomainError::DuplicateBatchName(_) => json_error(StatusCode::CONFLICT, "duplicate_batch", message),
        DomainError::BatchNotFound(_) => json_error(StatusCode::NOT_FOUND, "batch_not_found", message),
        DomainError::EmployeeNotFound(_) => {
            json_error(StatusCode::BAD_REQUEST, "employee_not_found", message)
        }
        DomainError::EmptyRoster(_) => json_error(StatusCode::NOT_FOUND, "empty_batch", message),
        DomainError::NoBatchesExist => json_error(StatusCode::NOT_FOUND, "no_batches", message),
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
        DomainError::Storage(_) => {
            tracing::error!(error = %message, "storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

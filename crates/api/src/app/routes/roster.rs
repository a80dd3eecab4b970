//! Roster endpoints: adding, listing and removing a batch's employees.

use std::sync::Arc;

use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use batchdesk_core::EmployeeId;
use batchdesk_infra::BatchRef;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/:id/employees",
            post(add_employees).get(list_employees).delete(remove_employees),
        )
        .route("/:id/employees/upload", post(add_employees_from_upload))
        .route("/:id/employees/details", get(list_employee_details))
        .route("/:id/employees/:employee_id", delete(remove_employee))
        .route(
            "/name/:name/employees",
            post(add_employees_by_name).get(list_employees_by_name),
        )
        .route("/name/:name/employees/upload", post(add_employees_from_upload_by_name))
        .route("/name/:name/employees/:employee_id", delete(remove_employee_by_name))
        .route("/:id/remaining", post(remaining_employees))
}

pub async fn add_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<Vec<dto::EmployeeDto>>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    add(services, BatchRef::Id(id), dto::employee_ids(body)).await
}

pub async fn add_employees_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    Json(body): Json<Vec<dto::EmployeeDto>>,
) -> axum::response::Response {
    add(services, BatchRef::Name(name), dto::employee_ids(body)).await
}

pub async fn add_employees_from_upload(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    add_upload(services, BatchRef::Id(id), multipart).await
}

pub async fn add_employees_from_upload_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    multipart: Multipart,
) -> axum::response::Response {
    add_upload(services, BatchRef::Name(name), multipart).await
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    roster(services, BatchRef::Id(id)).await
}

pub async fn list_employees_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    roster(services, BatchRef::Name(name)).await
}

/// Directory records for everyone on the roster.
pub async fn list_employee_details(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.resolver.roster_details(id).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn remove_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, employee_id)): Path<(String, String)>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let employee_id = match common::parse_employee_id(&employee_id) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    remove_one(services, BatchRef::Id(id), employee_id).await
}

pub async fn remove_employee_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path((name, employee_id)): Path<(String, String)>,
) -> axum::response::Response {
    let employee_id = match common::parse_employee_id(&employee_id) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    remove_one(services, BatchRef::Name(name), employee_id).await
}

/// Body is a bare list of ids; nothing is removed unless every id is on the roster.
pub async fn remove_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<Vec<EmployeeId>>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.registry.remove_employees(id, &body).await {
        Ok(batch) => (StatusCode::OK, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Body is every known employee id; responds with the directory records of those not on the batch.
pub async fn remaining_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<Vec<EmployeeId>>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.resolver.remaining(id, &body).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn add(
    services: Arc<AppServices>,
    batch: BatchRef,
    candidates: Vec<EmployeeId>,
) -> axum::response::Response {
    match services.registry.add_employees(&batch, &candidates).await {
        Ok(delta) => (StatusCode::OK, Json(dto::delta_to_json(&delta))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn add_upload(
    services: Arc<AppServices>,
    batch: BatchRef,
    multipart: Multipart,
) -> axum::response::Response {
    let file = match common::read_upload(multipart).await {
        Ok(mut form) => match form.require_file() {
            Ok(f) => f,
            Err(resp) => return resp,
        },
        Err(resp) => return resp,
    };
    match services.registry.add_employees_from_upload(&batch, &file).await {
        Ok(delta) => (StatusCode::OK, Json(dto::delta_to_json(&delta))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn roster(services: Arc<AppServices>, batch: BatchRef) -> axum::response::Response {
    match services.registry.get_roster(&batch).await {
        Ok(ids) => (StatusCode::OK, Json(serde_json::json!({ "items": ids }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn remove_one(
    services: Arc<AppServices>,
    batch: BatchRef,
    employee_id: EmployeeId,
) -> axum::response::Response {
    match services.registry.remove_employee(&batch, employee_id).await {
        Ok(batch) => (StatusCode::OK, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

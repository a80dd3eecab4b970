use std::sync::Arc;

use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use batchdesk_batches::BatchDetails;
use batchdesk_infra::BatchRef;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_batch).get(list_batches))
        .route("/upload", post(create_batch_from_upload))
        .route("/names", get(list_batch_names))
        .route("/names-with-ids", get(list_batch_names_with_ids))
        .route("/:id", get(get_batch).put(update_batch).delete(delete_batch))
        .route("/:id/name", patch(rename_batch))
        .route("/:id/end-date", patch(update_end_date))
        .route("/name/:name", get(get_batch_by_name).delete(delete_batch_by_name))
}

pub async fn create_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateBatchRequest>,
) -> axum::response::Response {
    match services
        .registry
        .create_with_roster(body.details, body.employee_ids)
        .await
    {
        Ok(batch) => (StatusCode::CREATED, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `multipart/form-data` with a `file` spreadsheet and a `data` JSON document.
pub async fn create_batch_from_upload(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> axum::response::Response {
    let mut form = match common::read_upload(multipart).await {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    let file = match form.require_file() {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    let data = match form.require_data() {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    match services.registry.create_from_upload(&file, &data).await {
        Ok(batch) => (StatusCode::CREATED, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_batches(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.registry.list_all().await {
        Ok(batches) => {
            let items = batches.iter().map(dto::batch_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_batch_names(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.registry.list_names().await {
        Ok(names) => (StatusCode::OK, Json(serde_json::json!({ "items": names }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_batch_names_with_ids(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.registry.list_names_with_ids().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    fetch(services, BatchRef::Id(id)).await
}

pub async fn get_batch_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    fetch(services, BatchRef::Name(name)).await
}

pub async fn update_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<BatchDetails>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.registry.update_details(id, body).await {
        Ok(batch) => (StatusCode::OK, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn rename_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::RenameRequest>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.registry.rename(id, &body.batch_name).await {
        Ok(batch) => (StatusCode::OK, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_end_date(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::EndDateRequest>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.registry.update_end_date(id, body.end_date).await {
        Ok(batch) => (StatusCode::OK, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_batch_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    remove(services, BatchRef::Id(id)).await
}

pub async fn delete_batch_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    remove(services, BatchRef::Name(name)).await
}

async fn fetch(services: Arc<AppServices>, batch: BatchRef) -> axum::response::Response {
    match services.registry.get(&batch).await {
        Ok(batch) => (StatusCode::OK, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn remove(services: Arc<AppServices>, batch: BatchRef) -> axum::response::Response {
    match services.registry.delete(&batch).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

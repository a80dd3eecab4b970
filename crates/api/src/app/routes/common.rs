use axum::extract::Multipart;
use axum::http::StatusCode;

use batchdesk_core::{BatchId, EmployeeId};

use crate::app::errors::json_error;

/// Parts of a `multipart/form-data` upload this API understands.
#[derive(Debug, Default)]
pub struct UploadForm {
    /// The spreadsheet (`file` part).
    pub file: Option<Vec<u8>>,
    /// Batch metadata JSON (`data` part).
    pub data: Option<String>,
}

impl UploadForm {
    pub fn require_file(&mut self) -> Result<Vec<u8>, axum::response::Response> {
        self.file.take().ok_or_else(|| {
            json_error(StatusCode::BAD_REQUEST, "missing_file", "multipart part 'file' is required")
        })
    }

    pub fn require_data(&mut self) -> Result<String, axum::response::Response> {
        self.data.take().ok_or_else(|| {
            json_error(StatusCode::BAD_REQUEST, "missing_data", "multipart part 'data' is required")
        })
    }
}

/// Drain a multipart body, keeping the `file` and `data` parts. Unknown parts are skipped.
pub async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, axum::response::Response> {
    let mut form = UploadForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => return Err(json_error(StatusCode::BAD_REQUEST, "invalid_multipart", e.to_string())),
        };

        match field.name() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_multipart", e.to_string()))?;
                form.file = Some(bytes.to_vec());
            }
            Some("data") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_multipart", e.to_string()))?;
                form.data = Some(text);
            }
            _ => {}
        }
    }
    Ok(form)
}

pub fn parse_batch_id(raw: &str) -> Result<BatchId, axum::response::Response> {
    raw.parse::<BatchId>()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_batch_id", "invalid batch id"))
}

pub fn parse_employee_id(raw: &str) -> Result<EmployeeId, axum::response::Response> {
    raw.parse::<EmployeeId>()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_employee_id", "invalid employee id"))
}

//! Handler for spreadsheet upload and validation.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::Json;
use poli_core::diagnostics::{DiagnosticsSink, PipelineEvent};
use poli_core::error::CoreError;
use poli_core::pipeline::process_with;
use poli_core::report::ValidationResult;
use poli_core::sheet::decode_xlsx;

use crate::error::{AppError, AppResult};
use crate::response::UploadResponse;

/// Multipart field carrying the workbook.
pub const FILE_FIELD: &str = "file";

/// MIME type of an `.xlsx` workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Message returned when the upload is not an `.xlsx` file.
pub const NOT_XLSX_MESSAGE: &str = "O arquivo deve ser um .xlsx";

/// Message returned when no file field was sent.
pub const MISSING_FILE_MESSAGE: &str = "Nenhum arquivo enviado no campo 'file'.";

/// Message returned when the body goes over the upload limit.
pub const TOO_LARGE_MESSAGE: &str = "O arquivo excede o tamanho máximo permitido.";

/// Forwards pipeline events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink {
    pub filename: String,
}

impl DiagnosticsSink for TracingSink {
    fn record(&mut self, event: PipelineEvent) {
        let filename = self.filename.as_str();
        match event {
            PipelineEvent::MissingColumns { missing } => {
                tracing::warn!(filename, ?missing, "Spreadsheet is missing required columns");
            }
            PipelineEvent::RowRejected { row, key, errors } => {
                tracing::debug!(filename, row, %key, errors, "Row rejected");
            }
            PipelineEvent::DuplicateValue { label, value, rows } => {
                tracing::debug!(filename, label, %value, rows, "Duplicate value in unique column");
            }
            PipelineEvent::Finished {
                rows,
                accepted,
                rejected_keys,
            } => {
                tracing::info!(filename, rows, accepted, rejected_keys, "Spreadsheet validated");
            }
        }
    }
}

/// POST /api/v1/upload_spreadsheet
///
/// Accept an `.xlsx` workbook in the `file` multipart field, validate every
/// row and answer with either the normalized records (200) or the error
/// report (400).
pub async fn upload_spreadsheet(
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    tracing::info!(%filename, size = bytes.len(), "Received spreadsheet upload");

    let mut sink = TracingSink { filename };
    let result = tokio::task::spawn_blocking(move || -> Result<ValidationResult, CoreError> {
        let table = decode_xlsx(&bytes)?;
        process_with(&table, &mut sink)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Spreadsheet task failed: {e}")))??;

    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(result.into())))
}

/// Pull the workbook out of the multipart body, enforcing the file checks.
async fn read_upload(multipart: &mut Multipart) -> AppResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.to_lowercase().ends_with(".xlsx") {
            return Err(AppError::BadRequest(NOT_XLSX_MESSAGE.to_string()));
        }
        if let Some(content_type) = field.content_type() {
            if !is_accepted_content_type(content_type) {
                return Err(AppError::BadRequest(NOT_XLSX_MESSAGE.to_string()));
            }
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok((filename, data));
    }

    Err(AppError::BadRequest(MISSING_FILE_MESSAGE.to_string()))
}

/// Keep the 413 that a body limit hit carries; anything else is a bad request.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %err, "Upload exceeded the body limit");
        AppError::PayloadTooLarge(TOO_LARGE_MESSAGE.to_string())
    } else {
        AppError::BadRequest(err.to_string())
    }
}

/// The xlsx MIME type, or the generic binary type browsers fall back to.
fn is_accepted_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == XLSX_CONTENT_TYPE || essence == "application/octet-stream"
}

//! Shared response envelope types for API handlers.
//!
//! Lookup and sample endpoints answer with a `{ "data": ... }` envelope.
//! The upload endpoint has its own `status`-tagged shape, see
//! [`UploadResponse`].

use poli_core::report::{ErrorReport, ValidationResult};
use poli_core::student::Student;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body of `POST /upload_spreadsheet`.
///
/// Serializes as `{"status":"success","data":[...]}` or
/// `{"status":"rejected","errors":{...}}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadResponse {
    Success { data: Vec<Student> },
    Rejected { errors: ErrorReport },
}

impl From<ValidationResult> for UploadResponse {
    fn from(result: ValidationResult) -> Self {
        match result {
            ValidationResult::Success { records } => Self::Success { data: records },
            ValidationResult::Rejected { errors } => Self::Rejected { errors },
        }
    }
}

//! Handlers for student lookup and sample records.

use axum::extract::{Path, State};
use axum::Json;
use poli_core::fakes::{sample_student, sample_students};
use poli_core::student::Student;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of records served by the sample roster endpoint.
pub const SAMPLE_ROSTER_SIZE: usize = 10;

/// Message returned when no student matches the CPF.
pub const NOT_FOUND_MESSAGE: &str = "Aluno não encontrado!";

/// Outcome of a CPF lookup.
#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub found: bool,
    pub message: String,
}

/// GET /api/v1/alunos
pub async fn list_samples() -> Json<DataResponse<Vec<Student>>> {
    Json(DataResponse {
        data: sample_students(SAMPLE_ROSTER_SIZE),
    })
}

/// GET /api/v1/alunos/exemplo
pub async fn get_sample() -> Json<DataResponse<Student>> {
    Json(DataResponse {
        data: sample_student(),
    })
}

/// GET /api/v1/alunos/{cpf}
///
/// Always 200; `found` tells whether the CPF is registered.
pub async fn find_student(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> AppResult<Json<DataResponse<LookupResult>>> {
    let student = state.directory.find_by_cpf(&cpf).await?;

    let data = match student {
        Some(_) => LookupResult {
            found: true,
            message: format!("Aluno {cpf} encontrado com sucesso!"),
        },
        None => {
            tracing::debug!(%cpf, "Student lookup missed");
            LookupResult {
                found: false,
                message: NOT_FOUND_MESSAGE.to_string(),
            }
        }
    };

    Ok(Json(DataResponse { data }))
}

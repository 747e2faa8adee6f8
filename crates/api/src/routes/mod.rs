pub mod health;
pub mod students;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /upload_spreadsheet                              validate an .xlsx upload (POST)
///
/// /alunos                                          sample roster
/// /alunos/exemplo                                  one sample record
/// /alunos/{cpf}                                    lookup by CPF
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(upload::router())
        .nest("/alunos", students::router())
}

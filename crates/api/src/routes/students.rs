//! Route definitions for student records.
//!
//! Mounted at `/alunos`.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/alunos`.
///
/// ```text
/// GET    /               -> list_samples
/// GET    /exemplo        -> get_sample
/// GET    /{cpf}          -> find_student
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::list_samples))
        .route("/exemplo", get(students::get_sample))
        .route("/{cpf}", get(students::find_student))
}

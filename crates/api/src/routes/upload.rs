//! Route definition for spreadsheet upload.

use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// ```text
/// POST   /upload_spreadsheet   -> upload_spreadsheet   (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/upload_spreadsheet", post(upload::upload_spreadsheet))
}

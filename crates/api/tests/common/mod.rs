#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use poli_core::directory::InMemoryDirectory;
use poli_core::fakes::sample_students;
use poli_core::schema::labels;
use rust_xlsxwriter::Workbook;
use tower::ServiceExt;

use poli_api::config::ServerConfig;
use poli_api::router::build_app_router;
use poli_api::state::AppState;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const BOUNDARY: &str = "poli-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
    }
}

/// Build the full application router with all middleware layers, with the
/// directory seeded from the first `seeded` sample students.
pub fn build_test_app_with(seeded: usize) -> Router {
    let config = test_config();
    let state = AppState {
        directory: Arc::new(InMemoryDirectory::with_students(sample_students(seeded))),
    };
    build_app_router(state, &config)
}

/// Build the full application router with the default seeded directory.
pub fn build_test_app() -> Router {
    build_test_app_with(10)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a multipart body with one file part.
pub async fn post_file(
    app: Router,
    uri: &str,
    field: &str,
    filename: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an xlsx workbook to the upload endpoint.
pub async fn upload_xlsx(app: Router, bytes: &[u8]) -> Response<Body> {
    post_file(
        app,
        "/api/v1/upload_spreadsheet",
        "file",
        "alunos.xlsx",
        Some(XLSX_MIME),
        bytes,
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Workbook fixtures
// ---------------------------------------------------------------------------

/// A cell written into a fixture workbook.
#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// Every required column, in sheet order.
pub fn required_header() -> Vec<&'static str> {
    vec![
        labels::NAME,
        labels::EMAIL,
        labels::UNIVERSITY,
        labels::COURSE,
        labels::GRADUATION_YEAR,
        labels::PHONE,
        labels::CITY,
        labels::STATE,
        labels::COUNTRY,
        labels::CPF,
        labels::INTERNSHIP_MODALITIES,
        labels::COMPETENCIES,
        labels::HAS_INTERNED,
        labels::SHARES_DATA,
    ]
}

/// A valid row for [`required_header`]; `n` (0..=9) keeps unique fields apart.
pub fn valid_row(name: &str, n: u32) -> Vec<Cell> {
    vec![
        name.into(),
        format!("aluno{n}@example.com").into(),
        "Universidade Federal".into(),
        "Engenharia".into(),
        Cell::Number(2026.0),
        format!("(11) 91234-567{n}").into(),
        "São Paulo".into(),
        "SP".into(),
        "Brasil".into(),
        format!("123.456.789-0{n}").into(),
        "Remoto, Presencial".into(),
        "Python, FastAPI".into(),
        "Não".into(),
        "Sim".into(),
    ]
}

/// Replace the cell under `label` in a row built for `header`.
pub fn set(header: &[&str], row: &mut [Cell], label: &str, value: Cell) {
    let position = header.iter().position(|l| *l == label).unwrap();
    row[position] = value;
}

/// Serialize a single-sheet workbook.
pub fn xlsx(header: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, label) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *label).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(r, col, s).unwrap();
                }
                Cell::Number(n) => {
                    sheet.write_number(r, col, *n).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

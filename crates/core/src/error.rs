/// Fatal failures of the core. Per-row validation problems are never
/// reported through this type; they are collected into an
/// [`ErrorReport`](crate::report::ErrorReport) instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Spreadsheet could not be decoded: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// One or more required column labels are absent from the table header.
///
/// Fatal for the whole upload: no row is evaluated once this is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Colunas obrigatórias ausentes: {}", .missing.join(", "))]
pub struct MissingColumnsError {
    /// Missing labels, in the order they are declared as required.
    pub missing: Vec<String>,
}
